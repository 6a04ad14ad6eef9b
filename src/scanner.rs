//! Recursive directory scanning for modules and assets.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File discovered by a directory scan.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileRecord {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// Path relative to the bundling root using `/` separators.
    pub relative_path: String,
    /// The file name.
    pub file_name: String,
    /// Relative path of the containing directory.
    pub dir: String,
}

impl FileRecord {
    /// File name without the final extension.
    pub fn stem(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(pos) if pos > 0 => &self.file_name[..pos],
            _ => &self.file_name,
        }
    }
}

/// Collect files below `dir` whose name ends with one of `extensions`.
///
/// Paths are made relative to `bundle_root`; any entry whose relative
/// path contains one of the `exclude` substrings is skipped, including
/// directories. Results follow the directory traversal order. A missing
/// `dir` yields no files.
pub fn scan_directory(
    dir: &Path,
    bundle_root: &Path,
    extensions: &[String],
    exclude: &[String],
) -> Result<Vec<FileRecord>> {
    let mut files = Vec::new();
    if dir.exists() {
        scan(dir, bundle_root, extensions, exclude, &mut files)?;
    }
    Ok(files)
}

fn scan(
    current: &Path,
    bundle_root: &Path,
    extensions: &[String],
    exclude: &[String],
    files: &mut Vec<FileRecord>,
) -> Result<()> {
    let entries = fs::read_dir(current).context(format!(
        "Failed to read directory {}",
        current.display()
    ))?;

    for entry in entries {
        let entry = entry.context(format!(
            "Failed to read directory entry in {}",
            current.display()
        ))?;
        let full_path = entry.path();
        let relative_path = relative_to(&full_path, bundle_root);

        if exclude.iter().any(|pattern| relative_path.contains(&pattern[..])) {
            log::trace!("Excluded {}", relative_path);
            continue;
        }

        let metadata = fs::metadata(&full_path)
            .context(format!("Failed to stat {}", full_path.display()))?;

        let file_name = entry.file_name().to_string_lossy().to_string();
        if metadata.is_dir() {
            scan(&full_path, bundle_root, extensions, exclude, files)?;
        } else if extensions.iter().any(|ext| file_name.ends_with(&ext[..])) {
            let dir = match relative_path.rfind('/') {
                Some(pos) => relative_path[..pos].to_string(),
                None => String::from("."),
            };
            files.push(FileRecord {
                absolute_path: full_path,
                relative_path,
                file_name,
                dir,
            });
        }
    }
    Ok(())
}

/// Compute the path of `path` relative to `base` as a `/` separated string.
///
/// Walks up out of `base` with `..` components when `path` is not
/// beneath it.
pub fn relative_to(path: &Path, base: &Path) -> String {
    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        parts.push(String::from(".."));
    }
    for part in &path_parts[common..] {
        parts.push(part.as_os_str().to_string_lossy().to_string());
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_below_base() {
        let rel = relative_to(
            Path::new("/project/dist/core/device.js"),
            Path::new("/project/dist"),
        );
        assert_eq!("core/device.js", rel);
    }

    #[test]
    fn relative_outside_base() {
        let rel = relative_to(
            Path::new("/project/src/shaders/basic.wgsl"),
            Path::new("/project/dist"),
        );
        assert_eq!("../src/shaders/basic.wgsl", rel);
    }

    #[test]
    fn record_stem() {
        let record = FileRecord {
            absolute_path: PathBuf::from("/p/dist/a.b.js"),
            relative_path: String::from("a.b.js"),
            file_name: String::from("a.b.js"),
            dir: String::from("."),
        };
        assert_eq!("a.b", record.stem());
    }
}

//! Helpers shared by the integration tests.
use std::fs;
use std::path::Path;

use anyhow::Result;

/// Read a file normalizing line endings.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut content = fs::read_to_string(path)?;
    if cfg!(target_os = "windows") {
        content = content.replace("\r\n", "\n");
    }
    Ok(content)
}

/// Write files below `root`, creating parent directories as needed.
pub fn write_files<P: AsRef<Path>>(root: P, files: &[(&str, &str)]) -> Result<()> {
    for (relative, content) in files {
        let path = root.as_ref().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

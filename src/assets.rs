//! Inline text assets (shader programs and the like) into modules.
//!
//! An asset `basic.wgsl` is referenced from a module with the statement
//! `import basicAsset from './basic.wgsl';`. Embedding replaces that
//! statement with `const basicAsset = "...";` holding the file content.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use swc_ecma_ast::{ImportDecl, ImportSpecifier, ModuleDecl, ModuleItem};

use crate::options::BundleOptions;
use crate::scanner::{scan_directory, FileRecord};
use crate::swc_utils::{apply_edits, parse_module, Edit};

/// Map from asset name (file name without extension) to content.
pub type AssetMap = IndexMap<String, String>;

/// Scan `dir` for asset files and read them into an asset map.
///
/// When two assets share a name the one scanned last wins.
pub fn load_assets(
    dir: &Path,
    bundle_root: &Path,
    extensions: &[String],
) -> Result<AssetMap> {
    let mut assets = AssetMap::new();
    for file in scan_directory(dir, bundle_root, extensions, &[])? {
        let content = fs::read_to_string(&file.absolute_path).context(
            format!("Failed to read asset {}", file.absolute_path.display()),
        )?;
        let name = asset_name(&file, extensions);
        if assets.insert(name.clone(), content).is_some() {
            log::debug!(
                "Asset {} replaced by {}",
                name,
                file.relative_path
            );
        }
    }
    Ok(assets)
}

/// Asset name for a file, the name without the matched extension.
fn asset_name(file: &FileRecord, extensions: &[String]) -> String {
    extensions
        .iter()
        .find(|ext| file.file_name.ends_with(&ext[..]))
        .map(|ext| &file.file_name[..file.file_name.len() - ext.len()])
        .unwrap_or_else(|| file.stem())
        .to_string()
}

/// Format content as a double quoted string literal.
///
/// Quotes, backslashes and control characters are escaped so the
/// literal decodes to exactly `content`.
pub fn string_literal(content: &str) -> String {
    serde_json::Value::String(content.to_string()).to_string()
}

/// Replace asset import statements in module source.
///
/// Returns `None` when no statement matched an asset.
pub fn embed_assets(
    name: &str,
    source: &str,
    assets: &AssetMap,
    options: &BundleOptions,
) -> Result<Option<String>> {
    if assets.is_empty() {
        return Ok(None);
    }

    let parsed = parse_module(name, source)?;
    let mut edits = Vec::new();
    for item in parsed.module.body.iter() {
        if let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item {
            if let Some((binding, content)) =
                match_asset_import(decl, assets, options)
            {
                log::debug!("Embed {} in {}", binding, name);
                let declaration =
                    format!("const {} = {};", binding, string_literal(content));
                edits.push(Edit::replace(parsed.range(decl.span), declaration));
            }
        }
    }

    if edits.is_empty() {
        return Ok(None);
    }

    // Swallow a semicolon the declaration span does not cover.
    let source = parsed.src();
    let edits = edits
        .into_iter()
        .map(|mut edit| {
            if source[edit.range.end..].starts_with(';') {
                edit.range.end += 1;
            }
            edit
        })
        .collect();

    Ok(Some(apply_edits(source, edits)))
}

/// Determine if an import declaration binds an asset.
///
/// The declaration must consist of a single default binding named
/// after the asset plus the configured suffix, and the source must be
/// a `./` path ending in the asset file name.
fn match_asset_import<'a>(
    decl: &ImportDecl,
    assets: &'a AssetMap,
    options: &BundleOptions,
) -> Option<(String, &'a str)> {
    if decl.specifiers.len() != 1 {
        return None;
    }
    let local = match &decl.specifiers[0] {
        ImportSpecifier::Default(default) => &*default.local.sym,
        _ => return None,
    };
    let src: &str = &*decl.src.value;
    if !src.starts_with("./") {
        return None;
    }

    for (name, content) in assets.iter() {
        if local != format!("{}{}", name, options.asset_suffix) {
            continue;
        }
        let matches_file = options
            .asset_extensions
            .iter()
            .any(|ext| src.ends_with(&format!("{}{}", name, ext)));
        if matches_file {
            return Some((local.to_string(), &content[..]));
        }
    }
    None
}

/// Embed assets into every module file, rewriting changed files in place.
///
/// Returns the number of files that were rewritten.
pub fn embed_in_modules(
    files: &[FileRecord],
    assets: &AssetMap,
    options: &BundleOptions,
) -> Result<usize> {
    let mut rewritten = 0;
    for file in files {
        let source = fs::read_to_string(&file.absolute_path).context(
            format!("Failed to read module {}", file.absolute_path.display()),
        )?;
        if let Some(content) =
            embed_assets(&file.relative_path, &source, assets, options)?
        {
            fs::write(&file.absolute_path, content).context(format!(
                "Failed to write module {}",
                file.absolute_path.display()
            ))?;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(entries: &[(&str, &str)]) -> AssetMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn literal_escapes_terminators() {
        assert_eq!(r#""a\"b\\c\nd""#, string_literal("a\"b\\c\nd"));
    }

    #[test]
    fn embed_basic_asset() -> Result<()> {
        let options = BundleOptions::default();
        let source = "import basicAsset from './basic.wgsl';\nexport const shaders = { basic: basicAsset };\n";
        let result = embed_assets(
            "graphics/shaders/index.js",
            source,
            &assets(&[("basic", "fn vs_main() {}")]),
            &options,
        )?;
        assert_eq!(
            Some(String::from("const basicAsset = \"fn vs_main() {}\";\nexport const shaders = { basic: basicAsset };\n")),
            result
        );
        Ok(())
    }

    #[test]
    fn unmatched_import_untouched() -> Result<()> {
        let options = BundleOptions::default();
        let source = "import otherAsset from './other.wgsl';\n";
        let result = embed_assets(
            "index.js",
            source,
            &assets(&[("basic", "fn vs_main() {}")]),
            &options,
        )?;
        assert_eq!(None, result);
        Ok(())
    }

    #[test]
    fn binding_must_use_suffix() -> Result<()> {
        let options = BundleOptions::default();
        let source = "import basic from './basic.wgsl';\n";
        let result = embed_assets(
            "index.js",
            source,
            &assets(&[("basic", "x")]),
            &options,
        )?;
        assert_eq!(None, result);
        Ok(())
    }

    #[test]
    fn custom_suffix() -> Result<()> {
        let mut options = BundleOptions::default();
        options.asset_suffix = String::from("Shader");
        let source = "import basicShader from './shaders/basic.wgsl';";
        let result = embed_assets(
            "index.js",
            source,
            &assets(&[("basic", "x")]),
            &options,
        )?;
        assert_eq!(Some(String::from("const basicShader = \"x\";")), result);
        Ok(())
    }
}

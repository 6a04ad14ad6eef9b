use anyhow::Result;

use sketchpack::assets::{embed_in_modules, load_assets};
use sketchpack::options::BundleOptions;
use sketchpack::scanner::scan_directory;
use testing::{read_to_string, write_files};

/// Decode the string literal assigned to `binding` in `code`.
fn embedded_value(code: &str, binding: &str) -> Result<String> {
    let prefix = format!("const {} = ", binding);
    let start = code
        .find(&prefix)
        .ok_or_else(|| anyhow::anyhow!("no declaration for {}", binding))?
        + prefix.len();
    let end = start
        + code[start..]
            .find(";\n")
            .ok_or_else(|| anyhow::anyhow!("unterminated declaration"))?;
    Ok(serde_json::from_str(&code[start..end])?)
}

#[test]
fn load_assets_by_name() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_files(
        dir.path(),
        &[
            ("src/shaders/basic.wgsl", "fn vs_main() {}"),
            ("src/shaders/post.wgsl", "fn fs_main() {}"),
            ("src/shaders/readme.md", "ignored"),
        ],
    )?;
    let assets = load_assets(
        &dir.path().join("src"),
        &dir.path().join("dist"),
        &[String::from(".wgsl")],
    )?;
    assert_eq!(2, assets.len());
    assert_eq!(Some("fn vs_main() {}"), assets.get("basic").map(|s| &s[..]));
    assert_eq!(Some("fn fs_main() {}"), assets.get("post").map(|s| &s[..]));
    Ok(())
}

#[test]
fn load_assets_later_file_wins() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_files(
        dir.path(),
        &[
            ("src/a/basic.wgsl", "fn from_a() {}"),
            ("src/b/basic.wgsl", "fn from_b() {}"),
        ],
    )?;
    let src = dir.path().join("src");
    let dist = dir.path().join("dist");
    let extensions = [String::from(".wgsl")];

    let assets = load_assets(&src, &dist, &extensions)?;
    assert_eq!(1, assets.len());

    let scanned = scan_directory(&src, &dist, &extensions, &[])?;
    let last = scanned.last().expect("scanned asset");
    let expected = read_to_string(&last.absolute_path)?;
    assert_eq!(Some(&expected), assets.get("basic"));
    Ok(())
}

#[test]
fn embed_round_trip() -> Result<()> {
    let shader = "struct U {\n    t: f32,\n};\n\n// \"quoted\" `tick` \\ slash\n@vertex\nfn vs_main() {}\n";
    let dir = tempfile::tempdir()?;
    write_files(
        dir.path(),
        &[
            ("src/graphics/shaders/basic.wgsl", shader),
            (
                "dist/graphics/shaders/index.js",
                "import basicAsset from './basic.wgsl';\nexport const shaders = {\n    basic: basicAsset,\n};\n",
            ),
            ("dist/sketch.js", "const untouched = 1;\n"),
        ],
    )?;

    let options = BundleOptions {
        root: dir.path().to_path_buf(),
        ..Default::default()
    };
    let assets = load_assets(
        &options.src_path(),
        &options.out_path(),
        &options.asset_extensions,
    )?;
    let files = scan_directory(
        &options.out_path(),
        &options.out_path(),
        &options.module_extensions,
        &[],
    )?;
    let rewritten = embed_in_modules(&files, &assets, &options)?;
    assert_eq!(1, rewritten);

    let code = read_to_string(options.out_path().join("graphics/shaders/index.js"))?;
    assert!(!code.contains("import basicAsset"));
    assert_eq!(shader, embedded_value(&code, "basicAsset")?);
    assert!(code.ends_with("export const shaders = {\n    basic: basicAsset,\n};\n"));

    let entry = read_to_string(options.out_path().join("sketch.js"))?;
    assert_eq!("const untouched = 1;\n", entry);
    Ok(())
}

#[test]
fn embed_without_matching_asset() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let module = "import postAsset from './post.wgsl';\nconsole.log(postAsset);\n";
    write_files(
        dir.path(),
        &[
            ("src/basic.wgsl", "fn vs_main() {}"),
            ("dist/index.js", module),
        ],
    )?;
    let options = BundleOptions {
        root: dir.path().to_path_buf(),
        ..Default::default()
    };
    let assets = load_assets(
        &options.src_path(),
        &options.out_path(),
        &options.asset_extensions,
    )?;
    let files = scan_directory(
        &options.out_path(),
        &options.out_path(),
        &options.module_extensions,
        &[],
    )?;
    assert_eq!(0, embed_in_modules(&files, &assets, &options)?);
    assert_eq!(module, read_to_string(options.out_path().join("index.js"))?);
    Ok(())
}

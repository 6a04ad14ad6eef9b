use anyhow::Result;

use sketchpack::scanner::scan_directory;
use testing::write_files;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn scan_filters_extensions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let dist = dir.path().join("dist");
    write_files(
        &dist,
        &[
            ("sketch.js", ""),
            ("core/webgpu/device.js", ""),
            ("core/webgpu/device.js.map", ""),
            ("types/stats.d.ts", ""),
        ],
    )?;

    let files = scan_directory(&dist, &dist, &strings(&[".js"]), &[])?;
    let mut paths: Vec<_> =
        files.iter().map(|f| f.relative_path.clone()).collect();
    paths.sort();
    assert_eq!(vec!["core/webgpu/device.js", "sketch.js"], paths);

    let device = files
        .iter()
        .find(|f| f.file_name == "device.js")
        .expect("device module");
    assert_eq!("core/webgpu", device.dir);
    assert_eq!(dist.join("core/webgpu/device.js"), device.absolute_path);
    Ok(())
}

#[test]
fn scan_excludes_substrings() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let dist = dir.path().join("dist");
    write_files(
        &dist,
        &[("sketch.js", ""), ("a.js", ""), ("vendor/b.js", "")],
    )?;

    let files = scan_directory(
        &dist,
        &dist,
        &strings(&[".js"]),
        &strings(&["sketch.js", "vendor"]),
    )?;
    let paths: Vec<_> = files.iter().map(|f| &f.relative_path[..]).collect();
    assert_eq!(vec!["a.js"], paths);
    Ok(())
}

#[test]
fn scan_relative_to_bundle_root() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_files(dir.path(), &[("src/shaders/basic.wgsl", "")])?;

    let files = scan_directory(
        &dir.path().join("src"),
        &dir.path().join("dist"),
        &strings(&[".wgsl"]),
        &[],
    )?;
    assert_eq!(1, files.len());
    assert_eq!("../src/shaders/basic.wgsl", files[0].relative_path);
    assert_eq!("../src/shaders", files[0].dir);
    Ok(())
}

#[test]
fn scan_missing_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing");
    let files = scan_directory(&missing, &missing, &strings(&[".js"]), &[])?;
    assert!(files.is_empty());
    Ok(())
}

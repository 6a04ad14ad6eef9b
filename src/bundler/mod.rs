//! Generate bundles.
//!
//! The phases run strictly in sequence because asset embedding
//! rewrites module files that the graph builder reads afterwards.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::assets::{embed_in_modules, load_assets};
use crate::module::{resolve_order, Graph};
use crate::options::BundleOptions;
use crate::scanner::{relative_to, scan_directory, FileRecord};

pub mod builder;
pub mod serializer;

pub use builder::{Bundle, BundleBuilder, Fragment, ENTRY_MARKER};

/// Summary of a completed build.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BuildReport {
    /// Number of assets loaded.
    pub assets: usize,
    /// Number of module files rewritten with embedded assets.
    pub embedded: usize,
    /// Number of modules in the dependency graph.
    pub modules: usize,
    /// Number of module fragments written to the bundle.
    pub fragments: usize,
    /// Path the bundle was written to.
    pub output: PathBuf,
}

/// Scan the module files of the bundling root.
pub fn scan_modules(options: &BundleOptions) -> Result<Vec<FileRecord>> {
    let out_dir = options.out_path();
    scan_directory(
        &out_dir,
        &out_dir,
        &options.module_extensions,
        &options.exclude,
    )
}

/// Relative path of the entry module within the bundling root.
pub fn entry_key(options: &BundleOptions) -> String {
    relative_to(&options.entry_path(), &options.out_path())
}

/// Build the dependency graph for the modules on disc.
pub fn load_graph(options: &BundleOptions) -> Result<Graph> {
    let files = scan_modules(options)?;
    Graph::build(&files, &entry_key(options))
}

/// Generate a bundle from the given options.
pub fn bundle(options: &BundleOptions) -> Result<BuildReport> {
    let out_dir = options.out_path();
    log::info!("Scanning source files in {}", options.root.display());

    let assets = load_assets(
        &options.src_path(),
        &out_dir,
        &options.asset_extensions,
    )?;
    let files = scan_modules(options)?;
    let embedded = embed_in_modules(&files, &assets, options)?;
    log::info!("Embedded {} asset(s) in {} file(s)", assets.len(), embedded);

    let entry = entry_key(options);
    let graph = Graph::build(&files, &entry)?;
    log::info!("Found {} module file(s)", graph.len());

    let ordered = resolve_order(&graph);
    log::info!("Resolved dependency order");

    let mut builder = BundleBuilder::new().modules(&ordered)?;
    let entry_path = options.entry_path();
    if entry_path.is_file() {
        let content = fs::read_to_string(&entry_path).context(format!(
            "Failed to read entry module {}",
            entry_path.display()
        ))?;
        builder = builder.entry(&entry, &content)?;
    } else {
        log::warn!("Entry module {} does not exist", entry_path.display());
    }
    let bundle = builder.finalize();

    let output = options.output_path();
    bundle.write(&output)?;
    cleanup(&out_dir, &options.clean_dirs)?;

    log::info!(
        "Combined {} module(s) into {}",
        ordered.len(),
        output.display()
    );

    Ok(BuildReport {
        assets: assets.len(),
        embedded,
        modules: graph.len(),
        fragments: bundle.fragments.len(),
        output,
    })
}

/// Delete the listed subdirectories of the output directory.
pub fn cleanup(out_dir: &Path, dirs: &[String]) -> Result<()> {
    for dir in dirs {
        let path = out_dir.join(dir);
        if path.exists() {
            log::debug!("Remove {}", path.display());
            fs::remove_dir_all(&path)
                .context(format!("Failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}

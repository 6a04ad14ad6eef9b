//! Bundle a tree of compiled modules and text assets into a single
//! script file.
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};

pub mod assets;
pub mod bundler;
pub mod cli;
pub mod module;
pub mod options;
pub mod printer;
pub mod scanner;
mod swc_utils;
pub mod transform;

use options::BundleOptions;

/// Run the bundle pipeline.
pub fn build(options: BundleOptions) -> Result<()> {
    let report = bundler::bundle(&options)?;
    log::info!(
        "Bundled {} fragment(s) from {} module(s)",
        report.fragments,
        report.modules
    );
    Ok(())
}

/// Print the dependency tree of the modules.
pub fn tree(options: BundleOptions, include_file: bool) -> Result<()> {
    let graph = bundler::load_graph(&options)?;
    let printer = printer::Printer::new(&graph);
    let print_options = printer::PrintOptions { include_file };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    printer.print(&mut out, &print_options)?;
    Ok(())
}

/// Print the order the modules are bundled in.
pub fn order(options: BundleOptions) -> Result<()> {
    let graph = bundler::load_graph(&options)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (i, node) in module::resolve_order(&graph).iter().enumerate() {
        writeln!(out, "{:>3} {}", i + 1, node.key())?;
    }
    writeln!(out, "    {}", bundler::entry_key(&options))?;
    Ok(())
}

/// Print a module with the module syntax removed.
pub fn transform(module: PathBuf) -> Result<()> {
    if !module.is_file() {
        bail!("Module {:?} does not exist", module);
    }
    let code = transform::transform(transform::TransformSource::File(module))?;
    println!("{}", code);
    Ok(())
}

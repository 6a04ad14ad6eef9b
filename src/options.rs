//! Options for a bundle build.
//!
//! Defaults describe the conventional project layout; a JSON file
//! and command line flags may override any of them.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE: &str = "sketchpack.json";

/// Options for bundling.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleOptions {
    /// Project root; every other path is relative to it.
    pub root: PathBuf,
    /// Directory holding the asset files.
    pub src_dir: PathBuf,
    /// Directory holding the compiled modules, the bundling root.
    pub out_dir: PathBuf,
    /// Entry module file name inside `out_dir`.
    pub entry: String,
    /// Bundle destination, defaults to the entry module itself.
    pub output: Option<PathBuf>,
    /// Suffixes identifying module files.
    pub module_extensions: Vec<String>,
    /// Suffixes identifying asset files.
    pub asset_extensions: Vec<String>,
    /// Suffix appended to an asset name to form its binding.
    pub asset_suffix: String,
    /// Substrings of relative paths to leave out of the graph.
    pub exclude: Vec<String>,
    /// Subdirectories of `out_dir` deleted after the bundle is written.
    pub clean_dirs: Vec<String>,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            src_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("dist"),
            entry: String::from("sketch.js"),
            output: None,
            module_extensions: vec![String::from(".js")],
            asset_extensions: vec![String::from(".wgsl")],
            asset_suffix: String::from("Asset"),
            exclude: Vec::new(),
            clean_dirs: ["core", "graphics", "scenes", "types"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl BundleOptions {
    /// Load options from a JSON file, missing fields take the defaults.
    pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let f = File::open(file).context(format!(
            "Unable to open config file {}",
            file.display()
        ))?;
        let reader = BufReader::new(f);
        let options: BundleOptions = serde_json::from_reader(reader)
            .context(format!("Failed to parse JSON in {}", file.display()))?;
        Ok(options)
    }

    /// Resolve the options for a project.
    ///
    /// An explicit config file must exist; otherwise `sketchpack.json`
    /// in the project root is used when present.
    pub fn discover(root: &Path, config: Option<&Path>) -> Result<Self> {
        let mut options = if let Some(config) = config {
            Self::load(config)?
        } else {
            let candidate = root.join(CONFIG_FILE);
            if candidate.is_file() {
                log::debug!("Using config {}", candidate.display());
                Self::load(candidate)?
            } else {
                Default::default()
            }
        };
        if options.root.is_relative() {
            options.root = root.join(&options.root);
        }
        Ok(options)
    }

    /// Absolute directory holding the assets.
    pub fn src_path(&self) -> PathBuf {
        self.root.join(&self.src_dir)
    }

    /// Absolute directory holding the modules, the bundling root.
    pub fn out_path(&self) -> PathBuf {
        self.root.join(&self.out_dir)
    }

    /// Absolute path to the entry module.
    pub fn entry_path(&self) -> PathBuf {
        self.out_path().join(&self.entry)
    }

    /// Absolute path the bundle is written to.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => self.root.join(output),
            None => self.entry_path(),
        }
    }
}

/// Overrides collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub entry: Option<String>,
    pub output: Option<PathBuf>,
    pub keep_dirs: bool,
}

impl BundleOptions {
    /// Apply command line overrides.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(entry) = &overrides.entry {
            self.entry = entry.clone();
        }
        if let Some(output) = &overrides.output {
            self.output = Some(output.clone());
        }
        if overrides.keep_dirs {
            self.clean_dirs.clear();
        }
    }
}

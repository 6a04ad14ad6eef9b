//! Module node stored in the dependency graph.
use std::fs;

use anyhow::{Context, Result};

use crate::module::dependencies::analyze_dependencies;
use crate::scanner::FileRecord;
use crate::swc_utils::parse_module;

/// Encapsulates a module and the specifiers of its dependencies.
#[derive(Debug, Clone)]
pub struct DependencyNode {
    /// The scanned file for the module.
    pub file: FileRecord,
    /// Raw dependency specifiers in declaration order.
    pub imports: Vec<String>,
    /// The module source as read from disc.
    pub content: String,
}

impl DependencyNode {
    /// Create a node from module source.
    pub fn new(file: FileRecord, content: String) -> Result<Self> {
        let parsed = parse_module(&file.relative_path, &content)?;
        let imports = analyze_dependencies(&parsed.module);
        Ok(Self {
            file,
            imports,
            content,
        })
    }

    /// Read and analyze a scanned module file.
    pub fn load(file: FileRecord) -> Result<Self> {
        let content = fs::read_to_string(&file.absolute_path).context(
            format!("Failed to read module {}", file.absolute_path.display()),
        )?;
        Self::new(file, content)
    }

    /// The graph key for this node.
    pub fn key(&self) -> &str {
        &self.file.relative_path
    }
}

//! Dependency graph of the modules to bundle.
use indexmap::IndexMap;

use anyhow::Result;

use super::node::DependencyNode;
use crate::scanner::FileRecord;

/// Modules keyed by relative path in scan order.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: IndexMap<String, DependencyNode>,
}

impl Graph {
    /// Load and analyze every scanned module except the entry module.
    pub fn build(files: &[FileRecord], entry: &str) -> Result<Self> {
        let mut graph: Graph = Default::default();
        for file in files {
            if file.relative_path == entry {
                continue;
            }
            let node = DependencyNode::load(file.clone())?;
            log::debug!("{} imports {:?}", node.key(), node.imports);
            graph.insert(node);
        }
        Ok(graph)
    }

    /// Insert a node, replacing any node with the same key.
    pub fn insert(&mut self, node: DependencyNode) {
        self.nodes.insert(node.key().to_string(), node);
    }

    /// Get a node by key.
    pub fn get(&self, key: &str) -> Option<&DependencyNode> {
        self.nodes.get(key)
    }

    /// Iterate the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|k| &k[..])
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Determine if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the node a specifier refers to.
    ///
    /// This is a loose textual match: the first key (in insertion order)
    /// whose path without extension occurs in the specifier, or which
    /// contains the last path segment of the specifier, wins.
    pub fn resolve_specifier(&self, specifier: &str) -> Option<&str> {
        let segment = specifier.rsplit('/').next().unwrap_or(specifier);
        self.keys().find(|key| {
            specifier.contains(strip_extension(key))
                || (!segment.is_empty() && key.contains(segment))
        })
    }

    /// Keys of the nodes the specifiers of `key` resolve to, in
    /// declaration order. Unresolved specifiers are dropped.
    pub fn edges(&self, key: &str) -> Vec<&str> {
        let node = match self.get(key) {
            Some(node) => node,
            None => return Vec::new(),
        };
        node.imports
            .iter()
            .filter_map(|spec| {
                let resolved = self.resolve_specifier(spec);
                if resolved.is_none() {
                    log::trace!("Unresolved {} in {}", spec, key);
                }
                resolved
            })
            .collect()
    }
}

/// Path without the extension of its final segment.
fn strip_extension(path: &str) -> &str {
    let start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[start..].rfind('.') {
        Some(pos) if pos > 0 => &path[..start + pos],
        _ => path,
    }
}

//! Builder for creating bundles.
use anyhow::Result;

use crate::module::DependencyNode;
use crate::transform::{transform, TransformSource};

/// Marker line preceding the entry module.
pub const ENTRY_MARKER: &str = "// === Main Entry Point ===";

/// Transformed module text with the path it came from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Fragment {
    /// Path relative to the bundling root.
    pub relative_path: String,
    /// Module text with module syntax removed.
    pub text: String,
}

/// Ordered module fragments followed by the entry module.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Bundle {
    /// Fragments in dependency order.
    pub fragments: Vec<Fragment>,
    /// The transformed entry module.
    pub entry: Option<String>,
}

#[derive(Default)]
pub struct BundleBuilder {
    bundle: Bundle,
}

impl BundleBuilder {
    /// Create a bundle builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Transform and append the modules in the given order.
    ///
    /// Modules without any remaining text are skipped.
    pub fn modules(mut self, ordered: &[&DependencyNode]) -> Result<Self> {
        for node in ordered {
            self = self.module(&node.file.relative_path, &node.content)?;
        }
        Ok(self)
    }

    /// Transform and append a single module.
    pub fn module(mut self, relative_path: &str, content: &str) -> Result<Self> {
        let text = transform(TransformSource::Str {
            content: content.to_string(),
            file_name: relative_path.to_string(),
        })?;
        if text.is_empty() {
            log::debug!("Skip empty module {}", relative_path);
        } else {
            self.bundle.fragments.push(Fragment {
                relative_path: relative_path.to_string(),
                text,
            });
        }
        Ok(self)
    }

    /// Transform the entry module, it is always emitted last.
    pub fn entry(mut self, relative_path: &str, content: &str) -> Result<Self> {
        let text = transform(TransformSource::Str {
            content: content.to_string(),
            file_name: relative_path.to_string(),
        })?;
        self.bundle.entry = Some(text);
        Ok(self)
    }

    /// Finalize the bundle.
    pub fn finalize(self) -> Bundle {
        self.bundle
    }
}

//! Serialize a bundle to script text.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::builder::{Bundle, ENTRY_MARKER};

/// Provenance line naming the module a fragment came from.
pub fn provenance(relative_path: &str) -> String {
    format!("// === {} ===", relative_path)
}

impl Bundle {
    /// Concatenate the fragments, each under its provenance line, and
    /// the entry module last.
    pub fn serialize(&self) -> String {
        let mut output = String::new();
        for fragment in self.fragments.iter() {
            output.push_str(&provenance(&fragment.relative_path));
            output.push('\n');
            output.push_str(&fragment.text);
            output.push_str("\n\n");
        }
        if let Some(entry) = &self.entry {
            output.push_str(ENTRY_MARKER);
            output.push('\n');
            output.push_str(entry);
        }
        output
    }

    /// Write the serialized bundle, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.serialize())
            .context(format!("Failed to write bundle {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::builder::Fragment;
    use super::*;

    #[test]
    fn serialize_layout() {
        let bundle = Bundle {
            fragments: vec![
                Fragment {
                    relative_path: String::from("a.js"),
                    text: String::from("const a = 1;"),
                },
                Fragment {
                    relative_path: String::from("core/b.js"),
                    text: String::from("const b = a;"),
                },
            ],
            entry: Some(String::from("main();")),
        };
        let expected = "// === a.js ===\nconst a = 1;\n\n// === core/b.js ===\nconst b = a;\n\n// === Main Entry Point ===\nmain();";
        assert_eq!(expected, bundle.serialize());
    }

    #[test]
    fn serialize_without_entry() {
        let bundle = Bundle {
            fragments: vec![Fragment {
                relative_path: String::from("a.js"),
                text: String::from("const a = 1;"),
            }],
            entry: None,
        };
        assert_eq!("// === a.js ===\nconst a = 1;\n\n", bundle.serialize());
    }
}

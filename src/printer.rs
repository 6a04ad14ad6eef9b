//! Print the dependency tree of a module graph.
use std::collections::HashSet;
use std::io::Write;

use anyhow::Result;

use crate::module::Graph;

const TREE_BAR: &str = "│";
const TREE_BRANCH: &str = "├──";
const TREE_CORNER: &str = "└──";

#[derive(Debug, Default)]
pub struct PrintOptions {
    /// Print the file path for each module.
    pub include_file: bool,
}

#[derive(Debug)]
struct PrintBranchState {
    last: bool,
}

#[derive(Debug, Default)]
struct PrintState<'g> {
    open: Vec<PrintBranchState>,
    parents: Vec<&'g str>,
}

pub struct Printer<'g> {
    graph: &'g Graph,
}

impl<'g> Printer<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Printer { graph }
    }

    /// Modules no other module depends upon.
    ///
    /// When every module is imported by another (a graph made only of
    /// cycles) all modules are roots.
    pub fn roots(&self) -> Vec<&'g str> {
        let imported: HashSet<&str> = self
            .graph
            .keys()
            .flat_map(|key| self.graph.edges(key))
            .collect();
        let roots: Vec<&str> = self
            .graph
            .keys()
            .filter(|key| !imported.contains(key))
            .collect();
        if roots.is_empty() {
            self.graph.keys().collect()
        } else {
            roots
        }
    }

    /// Print the tree for each root module.
    pub fn print<W: Write>(
        &self,
        out: &mut W,
        options: &PrintOptions,
    ) -> Result<()> {
        for root in self.roots() {
            self.print_label(out, root, options)?;
            writeln!(out)?;
            let mut state: PrintState = Default::default();
            state.parents.push(root);
            self.print_imports(out, root, options, &mut state)?;
        }
        Ok(())
    }

    fn print_label<W: Write>(
        &self,
        out: &mut W,
        key: &str,
        options: &PrintOptions,
    ) -> Result<()> {
        write!(out, "{}", key)?;
        if options.include_file {
            if let Some(node) = self.graph.get(key) {
                write!(out, " {}", node.file.absolute_path.display())?;
            }
        }
        Ok(())
    }

    fn print_imports<W: Write>(
        &self,
        out: &mut W,
        key: &'g str,
        options: &PrintOptions,
        state: &mut PrintState<'g>,
    ) -> Result<()> {
        let edges = self.graph.edges(key);
        state.open.push(PrintBranchState { last: false });
        for (i, dependency) in edges.iter().enumerate() {
            let last = i == (edges.len() - 1);
            if let Some(branch) = state.open.last_mut() {
                branch.last = last;
            }

            let mark = if last { TREE_CORNER } else { TREE_BRANCH };
            for (j, iter_state) in state.open.iter().enumerate() {
                let end = j == (state.open.len() - 1);
                if !end {
                    if !iter_state.last {
                        write!(out, "{}   ", TREE_BAR)?;
                    } else {
                        write!(out, "    ")?;
                    }
                } else {
                    write!(out, "{} ", mark)?;
                }
            }

            self.print_label(out, dependency, options)?;

            let cycles = state.parents.iter().find(|p| *p == dependency);
            if let Some(cycle) = cycles {
                write!(out, " (∞ -> {})", cycle)?;
            }
            writeln!(out)?;

            if cycles.is_some() {
                continue;
            }

            state.parents.push(*dependency);
            self.print_imports(out, *dependency, options, state)?;
            state.parents.pop();
        }
        state.open.pop();
        Ok(())
    }
}

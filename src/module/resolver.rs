//! Order the graph so dependencies precede their dependents.
use std::collections::HashSet;

use indexmap::IndexSet;

use super::graph::Graph;
use super::node::DependencyNode;

/// Traversal state owned by a single resolution.
#[derive(Debug, Default)]
pub struct ResolutionState<'g> {
    /// Keys in the order they were emitted.
    pub resolved: IndexSet<&'g str>,
    /// Keys on the active traversal path, used to detect cycles.
    pub visiting: HashSet<&'g str>,
}

/// Resolve the bundle order for all nodes in the graph.
///
/// A depth first traversal starting from each key in graph order.
/// A dependency that is already on the traversal path (a cycle) is
/// skipped, so a cycle member may precede its dependency.
pub fn resolve_order(graph: &Graph) -> Vec<&DependencyNode> {
    let mut state: ResolutionState = Default::default();
    for key in graph.keys() {
        visit(graph, key, &mut state);
    }
    state
        .resolved
        .iter()
        .filter_map(|key| graph.get(key))
        .collect()
}

fn visit<'g>(graph: &'g Graph, key: &'g str, state: &mut ResolutionState<'g>) {
    if state.visiting.contains(key) {
        log::trace!("Cycle detected at {}", key);
        return;
    }
    if state.resolved.contains(key) || graph.get(key).is_none() {
        return;
    }

    state.visiting.insert(key);
    for dependency in graph.edges(key) {
        visit(graph, dependency, state);
    }
    state.visiting.remove(key);
    state.resolved.insert(key);
}

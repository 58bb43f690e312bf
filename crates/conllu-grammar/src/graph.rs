//! The enhanced dependency graph of a sentence.

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::IndexSet;
use thiserror::Error;

use crate::deps::Dep;
use crate::deps::parse_deps;
use crate::row::Record;
use crate::row::TokenId;
use crate::sentence::Sentence;

/// The identifier of the virtual root of the enhanced graph.
pub const ROOT_ID: &str = "0";

/// An error for a sentence whose enhanced graph is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A row lacks columns or has an unparsable `DEPS` column; this is
    /// reported elsewhere.
    #[error("the sentence has malformed enhanced dependencies")]
    Malformed,
    /// Some nodes cannot be reached from the virtual root.
    #[error("Enhanced graph is not connected. Nodes {0:?} are not reachable from any root")]
    Unconnected(Vec<String>),
}

/// A node of a [`Graph`].
#[derive(Debug, Clone)]
pub struct GraphNode<'a> {
    /// The ten columns of the node.
    pub record: Record<'a>,
    /// The line of the node (the sentence start for the root).
    pub line: usize,
    /// The parsed `DEPS` entries of the node.
    pub deps: Vec<Dep<'a>>,
}

impl GraphNode<'_> {
    /// Determines if the node is an empty node.
    pub fn is_empty_node(&self) -> bool {
        TokenId::parse(self.record.id).is_empty_node()
    }
}

/// The enhanced dependency graph of a sentence.
///
/// Nodes are keyed by identifier and kept in file order, after the virtual
/// root. A node may have several parents.
#[derive(Debug, Clone)]
pub struct Graph<'a> {
    /// The nodes of the graph.
    nodes: IndexMap<&'a str, GraphNode<'a>>,
    /// The children of each referenced head.
    ///
    /// Heads that do not name a node of the sentence may appear here.
    children: IndexMap<&'a str, IndexSet<&'a str>>,
}

/// Builds the enhanced dependency graph of a sentence.
///
/// Returns `Ok(None)` when the sentence has no enhanced annotation: no row
/// has a `DEPS` entry and there are no empty nodes.
pub fn build_graph(sentence: &Sentence) -> Result<Option<Graph<'_>>, GraphError> {
    let mut nodes = IndexMap::new();
    nodes.insert(
        ROOT_ID,
        GraphNode {
            record: Record::ROOT,
            line: sentence.start_line(),
            deps: Vec::new(),
        },
    );

    let mut children: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    let mut exists = false;
    for row in sentence.rows().iter().filter(|r| !r.id().is_range()) {
        let record = row.record().ok_or(GraphError::Malformed)?;
        let deps = parse_deps(record.deps).map_err(|_| GraphError::Malformed)?;
        exists |= row.id().is_empty_node() || !deps.is_empty();
        for dep in &deps {
            children.entry(dep.head).or_default().insert(record.id);
        }

        nodes.insert(
            record.id,
            GraphNode {
                record,
                line: row.line(),
                deps,
            },
        );
    }

    if !exists {
        return Ok(None);
    }

    let graph = Graph { nodes, children };
    let reachable = graph.projection(ROOT_ID);
    let unreachable: Vec<String> = graph
        .nodes
        .keys()
        .filter(|id| !reachable.contains(*id))
        .map(|id| id.to_string())
        .collect();
    if !unreachable.is_empty() {
        return Err(GraphError::Unconnected(unreachable));
    }

    Ok(Some(graph))
}

impl<'a> Graph<'a> {
    /// Iterates the nodes of the graph, starting with the virtual root.
    pub fn nodes(&self) -> impl Iterator<Item = (&'a str, &GraphNode<'a>)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Gets a node by identifier.
    pub fn node(&self, id: &str) -> Option<&GraphNode<'a>> {
        self.nodes.get(id)
    }

    /// Iterates the children of a node.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &'a str> {
        self.children.get(id).into_iter().flatten().copied()
    }

    /// Iterates the parents of a node.
    pub fn parents(&self, id: &str) -> impl Iterator<Item = &'a str> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|n| n.deps.iter().map(|d| d.head))
    }

    /// Gets the set of nodes reachable from a node, including the node itself.
    pub fn projection(&self, id: &'a str) -> HashSet<&'a str> {
        let mut projection = HashSet::from([id]);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            for child in self.children(next) {
                if projection.insert(child) {
                    pending.push(child);
                }
            }
        }

        projection
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_without_enhanced_annotation() {
        let sentence = Sentence::parse("1\tx\tx\tX\t_\t_\t0\troot\t_\t_");
        assert!(build_graph(&sentence).unwrap().is_none());
    }

    #[test]
    fn builds_a_connected_graph() {
        let sentence = Sentence::parse(
            "1\tx\tx\tX\t_\t_\t0\troot\t0:root\t_\n\
             1.1\ty\ty\tX\t_\t_\t_\t_\t1:conj\t_\n\
             2\tz\tz\tX\t_\t_\t1\tobj\t1:obj|1.1:obj\t_",
        );
        let graph = build_graph(&sentence).unwrap().expect("should exist");
        let ids: Vec<_> = graph.nodes().map(|(id, _)| id).collect();
        assert_eq!(ids, ["0", "1", "1.1", "2"]);
        assert!(graph.node("1.1").unwrap().is_empty_node());
        assert_eq!(graph.children("1").collect::<Vec<_>>(), ["1.1", "2"]);
        assert_eq!(graph.parents("2").collect::<Vec<_>>(), ["1", "1.1"]);
    }

    #[test]
    fn reports_unconnected_nodes() {
        let sentence = Sentence::parse(
            "1\tx\tx\tX\t_\t_\t0\troot\t0:root\t_\n\
             2\ty\ty\tX\t_\t_\t1\tdep\t3:dep\t_\n\
             3\tz\tz\tX\t_\t_\t1\tdep\t2:dep\t_",
        );
        let err = build_graph(&sentence).unwrap_err();
        assert_eq!(
            err,
            GraphError::Unconnected(vec!["2".to_string(), "3".to_string()])
        );
        assert_eq!(
            err.to_string(),
            "Enhanced graph is not connected. Nodes [\"2\", \"3\"] are not reachable from any root"
        );
    }

    #[test]
    fn malformed_deps_yield_no_graph() {
        let sentence = Sentence::parse("1\tx\tx\tX\t_\t_\t0\troot\t0\t_");
        assert_eq!(build_graph(&sentence).unwrap_err(), GraphError::Malformed);
    }
}

//! The basic dependency tree of a sentence.

use std::collections::BTreeSet;

use itertools::Itertools;
use thiserror::Error;

use crate::row::Record;
use crate::row::TokenId;
use crate::sentence::Sentence;

/// An error for a sentence whose words do not form a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The rows have elementary defects (missing columns, unparsable `ID` or
    /// `HEAD`, words not numbered `1..N`) that are reported elsewhere.
    #[error("the sentence has malformed word rows")]
    Malformed,
    /// A word is its own head.
    #[error("HEAD == ID for {id}")]
    SelfLoop {
        /// The identifier of the word.
        id: u32,
        /// The line of the word.
        line: usize,
    },
    /// More than one word depends on the virtual root.
    #[error("Multiple root words: {roots:?}")]
    MultipleRoots {
        /// The words attached to the root.
        roots: Vec<usize>,
    },
    /// Some words cannot be reached from the virtual root.
    #[error(
        "Non-tree structure. Words {words} are not reachable from the root 0.",
        words = .0.iter().join(",")
    )]
    Unreachable(Vec<usize>),
}

/// A node of a [`Tree`].
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    /// The ten columns of the word.
    pub record: Record<'a>,
    /// The line of the word (the sentence start for the root).
    pub line: usize,
    /// The index of the head (zero for the root itself).
    pub head: usize,
}

/// The basic dependency tree of a sentence.
///
/// Nodes are indexed by word number; index zero is the virtual root.
#[derive(Debug, Clone)]
pub struct Tree<'a> {
    /// The nodes of the tree.
    nodes: Vec<TreeNode<'a>>,
    /// The sorted children of each node.
    children: Vec<Vec<usize>>,
}

/// Builds the basic dependency tree of a sentence.
///
/// Only word rows take part; multiword tokens and empty nodes are skipped.
/// With `single_root`, a sentence with more than one word attached to the
/// root is rejected.
pub fn build_tree(sentence: &Sentence, single_root: bool) -> Result<Tree<'_>, TreeError> {
    let mut nodes = vec![TreeNode {
        record: Record::ROOT,
        line: sentence.start_line(),
        head: 0,
    }];
    let mut heads = Vec::new();
    for row in sentence.words() {
        let record = row.record().ok_or(TreeError::Malformed)?;
        let TokenId::Word(id) = row.id() else {
            continue;
        };

        if usize::try_from(id).ok() != Some(nodes.len()) {
            return Err(TreeError::Malformed);
        }

        let head = parse_head(record.head).ok_or(TreeError::Malformed)?;
        if head == nodes.len() {
            return Err(TreeError::SelfLoop {
                id,
                line: row.line(),
            });
        }

        heads.push(head);
        nodes.push(TreeNode {
            record,
            line: row.line(),
            head,
        });
    }

    let mut children = vec![Vec::new(); nodes.len()];
    for (i, &head) in heads.iter().enumerate() {
        children
            .get_mut(head)
            .ok_or(TreeError::Malformed)?
            .push(i + 1);
    }

    if single_root && children[0].len() > 1 {
        return Err(TreeError::MultipleRoots {
            roots: children[0].clone(),
        });
    }

    let tree = Tree { nodes, children };
    let reachable = tree.projection(0);
    let unreachable: Vec<_> = (1..tree.nodes.len())
        .filter(|i| !reachable.contains(i))
        .collect();
    if !unreachable.is_empty() {
        return Err(TreeError::Unreachable(unreachable));
    }

    Ok(tree)
}

/// Parses a basic `HEAD` value (`0` or a positive integer).
fn parse_head(text: &str) -> Option<usize> {
    if text == "0" {
        return Some(0);
    }

    match text.as_bytes().first() {
        Some(b'1'..=b'9') if text.bytes().all(|b| b.is_ascii_digit()) => text.parse().ok(),
        _ => None,
    }
}

impl<'a> Tree<'a> {
    /// Gets the number of words in the tree (excluding the virtual root).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Determines if the tree has no words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets a node by index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn node(&self, index: usize) -> &TreeNode<'a> {
        &self.nodes[index]
    }

    /// Gets the record of a node.
    pub fn record(&self, index: usize) -> Record<'a> {
        self.nodes[index].record
    }

    /// Gets the index of the head of a node.
    pub fn head(&self, index: usize) -> usize {
        self.nodes[index].head
    }

    /// Gets the sorted children of a node.
    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    /// Iterates the word indices of the tree in order.
    pub fn words(&self) -> std::ops::Range<usize> {
        1..self.nodes.len()
    }

    /// Gets the set of nodes reachable from a node, including the node itself.
    pub fn projection(&self, index: usize) -> BTreeSet<usize> {
        let mut projection = BTreeSet::from([index]);
        let mut pending = vec![index];
        while let Some(next) = pending.pop() {
            for &child in &self.children[next] {
                if projection.insert(child) {
                    pending.push(child);
                }
            }
        }

        projection
    }

    /// Gets the ancestors of a node, nearest first, ending with the root.
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut ancestors = Vec::new();
        let mut current = index;
        while current != 0 {
            let head = self.nodes[current].head;
            if ancestors.contains(&head) {
                break;
            }

            ancestors.push(head);
            current = head;
        }

        ancestors
    }

    /// Gets the gap of a node: the words strictly between the node and its
    /// head that do not belong to the projection of the head.
    pub fn gap(&self, index: usize) -> BTreeSet<usize> {
        let head = self.nodes[index].head;
        let (low, high) = if index < head {
            (index, head)
        } else {
            (head, index)
        };

        if high - low < 2 {
            return BTreeSet::new();
        }

        let projection = self.projection(head);
        (low + 1..high)
            .filter(|i| !projection.contains(i))
            .collect()
    }

    /// Gets the nodes whose attachment crosses over the given node, causing
    /// a nonprojectivity.
    ///
    /// Ancestors of the node are excluded, as are crossings caused by nodes
    /// that lie beyond the head of the node: those are attributed to the head.
    pub fn caused_nonprojectivities(&self, index: usize) -> Vec<usize> {
        let ancestors: BTreeSet<_> = self.ancestors(index).into_iter().collect();
        let last = self.len();
        let head = self.nodes[index].head;
        let (left, right) = if head < index {
            (head + 1..index, index + 1..last + 1)
        } else {
            (1..index, index + 1..head)
        };

        let head_of = |i: usize| self.nodes[i].head;
        let mut crossing: Vec<usize> = left
            .filter(|i| !ancestors.contains(i) && head_of(*i) > index)
            .filter(|i| head < index || head_of(*i) < head)
            .chain(
                right
                    .filter(|i| !ancestors.contains(i) && head_of(*i) < index)
                    .filter(|i| head > index || head_of(*i) > head),
            )
            .collect();
        crossing.sort_unstable();
        crossing
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Builds a sentence whose words have the given heads.
    fn sentence(heads: &[&str]) -> Sentence {
        let text = heads
            .iter()
            .enumerate()
            .map(|(i, head)| format!("{id}\tw\tw\tX\t_\t_\t{head}\tdep\t_\t_", id = i + 1))
            .join("\n");
        Sentence::parse(&text)
    }

    #[test]
    fn builds_a_valid_tree() {
        let sentence = sentence(&["0", "1", "1"]);
        let tree = build_tree(&sentence, true).expect("should build");
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.children(0), [1]);
        assert_eq!(tree.children(1), [2, 3]);
        assert_eq!(tree.projection(0), BTreeSet::from([0, 1, 2, 3]));
        assert_eq!(tree.ancestors(3), [1, 0]);
    }

    #[test]
    fn rejects_self_loops() {
        let sentence = sentence(&["0", "1", "3"]);
        let err = build_tree(&sentence, true).unwrap_err();
        assert_eq!(err, TreeError::SelfLoop { id: 3, line: 3 });
        assert_eq!(err.to_string(), "HEAD == ID for 3");
    }

    #[test]
    fn single_root_policy() {
        let sentence = sentence(&["0", "0", "1"]);
        assert_eq!(
            build_tree(&sentence, true).unwrap_err(),
            TreeError::MultipleRoots { roots: vec![1, 2] }
        );

        let tree = build_tree(&sentence, false).expect("should build");
        assert_eq!(tree.children(0), [1, 2]);
    }

    #[test]
    fn reports_all_unreachable_words() {
        let sentence = sentence(&["0", "3", "2"]);
        let err = build_tree(&sentence, true).unwrap_err();
        assert_eq!(err, TreeError::Unreachable(vec![2, 3]));
        assert_eq!(
            err.to_string(),
            "Non-tree structure. Words 2,3 are not reachable from the root 0."
        );
    }

    #[test]
    fn malformed_rows_yield_no_tree() {
        assert_eq!(
            build_tree(&sentence(&["0", "x"]), true).unwrap_err(),
            TreeError::Malformed
        );
        assert_eq!(
            build_tree(&sentence(&["0", "7"]), true).unwrap_err(),
            TreeError::Malformed
        );
        let gap = Sentence::parse("1\tw\tw\tX\t_\t_\t0\troot\t_\t_\n3\tw\tw\tX\t_\t_\t1\tdep\t_\t_");
        assert_eq!(build_tree(&gap, true).unwrap_err(), TreeError::Malformed);
    }

    #[test]
    fn gaps_and_nonprojectivities() {
        // The edge 4 -> 2 crosses over 3, which is not below 4.
        let sentence = sentence(&["3", "4", "0", "3"]);
        let tree = build_tree(&sentence, true).expect("should build");
        assert_eq!(tree.gap(2), BTreeSet::from([3]));
        assert_eq!(tree.gap(1), BTreeSet::new());
        assert_eq!(tree.caused_nonprojectivities(3), [2]);
        assert_eq!(tree.caused_nonprojectivities(4), Vec::<usize>::new());
    }
}

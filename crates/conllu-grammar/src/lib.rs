//! A crate for reading CoNLL-U treebank files.
//!
//! The crate splits a line stream into [`Sentence`]s with a [`Segmenter`],
//! which reports stream-level malformations as it goes, and reconstructs the
//! basic dependency [`Tree`] and the enhanced dependency [`Graph`] of a
//! sentence.
//!
//! # Examples
//!
//! ```rust
//! use conllu_grammar::Segmenter;
//! use conllu_grammar::build_tree;
//!
//! let input = "# text = Cats run.\n\
//!              1\tCats\tcat\tNOUN\t_\t_\t2\tnsubj\t_\t_\n\
//!              2\trun\trun\tVERB\t_\t_\t0\troot\t_\t_\n\n";
//!
//! let mut segmenter = Segmenter::new(input.as_bytes());
//! let sentence = segmenter
//!     .next_sentence(&mut ())
//!     .expect("reading from memory should not fail")
//!     .expect("there should be a sentence");
//!
//! let tree = build_tree(&sentence, true).expect("the words should form a tree");
//! assert_eq!(tree.children(0), [2]);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

mod deps;
mod graph;
mod row;
mod segmenter;
mod sentence;
mod tree;

pub use deps::*;
pub use graph::*;
pub use row::*;
pub use segmenter::*;
pub use sentence::*;
pub use tree::*;

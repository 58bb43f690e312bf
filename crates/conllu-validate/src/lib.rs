//! Layered conformance rules for CoNLL-U treebank files.
//!
//! The rules are organized in five cumulative levels:
//!
//! 1. the syntax of the stream, the rows and the identifiers;
//! 2. the format of every column and the metadata of every sentence, and that
//!    the basic dependencies form a tree;
//! 3. language-neutral content rules of the annotation guidelines;
//! 4. the language-specific relation labels, features and words with
//!    spaces;
//! 5. the language-specific lemmas of auxiliaries and copulas.
//!
//! Every finding is recorded as a [`Diagnostic`]; a run passes when nothing
//! was recorded.
//!
//! # Examples
//!
//! ```rust
//! use conllu_validate::BuiltinLexicon;
//! use conllu_validate::Config;
//! use conllu_validate::Tagsets;
//! use conllu_validate::Validator;
//!
//! let input = "# sent_id = 1\n# text = Cats run.\n\
//!              1\tCats\tcat\tNOUN\t_\t_\t2\tnsubj\t_\t_\n\
//!              2\trun\trun\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No\n\
//!              3\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\n";
//!
//! let lexicon = BuiltinLexicon::new().expect("the embedded lemma lists should load");
//! let mut validator = Validator::new(Config::default(), Tagsets::unchecked(), Box::new(lexicon));
//! validator
//!     .validate(None, input.as_bytes())
//!     .expect("reading from memory should not fail");
//!
//! let summary = validator.finish();
//! assert!(summary.passed());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

mod config;
mod diagnostic;
mod diagnostics;
mod level;
mod lexicon;
pub mod rules;
mod session;
mod tags;
mod tagset;
pub(crate) mod util;
mod validator;
mod visitor;

pub use config::*;
pub use conllu_grammar as grammar;
pub use diagnostic::*;
pub use diagnostics::*;
pub use level::*;
pub use lexicon::*;
pub use rules::Rule;
pub use rules::find_rule;
pub use rules::rules;
pub use session::*;
pub use tags::*;
pub use tagset::*;
pub use validator::*;
pub use visitor::*;

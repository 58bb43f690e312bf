//! Approved auxiliary and copula lemmas per language.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// The embedded lemma lists.
const BUILTIN: &str = include_str!("../data/lexicon.toml");

/// The role a lemma is looked up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LemmaRole {
    /// An auxiliary verb or particle (`UPOS` of `AUX`).
    Auxiliary,
    /// A copula (`DEPREL` of `cop`).
    Copula,
}

impl fmt::Display for LemmaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auxiliary => write!(f, "auxiliary"),
            Self::Copula => write!(f, "copula"),
        }
    }
}

/// An error for lemma lists that cannot be loaded.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lemma lists are not valid TOML or have an unexpected shape.
    #[error("invalid lemma lists")]
    Toml(#[from] toml::de::Error),
}

/// Provides the approved lemmas of a language.
pub trait Lexicon: fmt::Debug {
    /// Gets the approved lemmas for a role in a language.
    ///
    /// Returns `None` if the language has no list for the role.
    fn lookup(&self, lang: &str, role: LemmaRole) -> Option<&BTreeSet<String>>;
}

/// The lemma lists of one language.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
struct Entry {
    /// Approved auxiliary lemmas.
    #[serde(default)]
    aux: BTreeSet<String>,
    /// Approved copula lemmas.
    #[serde(default)]
    cop: BTreeSet<String>,
}

/// The lemma lists shipped with the validator.
#[derive(Debug, Clone, Default)]
pub struct BuiltinLexicon(IndexMap<String, Entry>);

impl BuiltinLexicon {
    /// Loads the embedded lemma lists.
    pub fn new() -> Result<Self, LexiconError> {
        Self::from_toml(BUILTIN)
    }

    /// Parses lemma lists from TOML text with one table per language code,
    /// each holding optional `aux` and `cop` arrays.
    pub fn from_toml(text: &str) -> Result<Self, LexiconError> {
        Ok(Self(toml::from_str(text)?))
    }

    /// Gets the number of languages with lemma lists.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Determines if there are no lemma lists.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Lexicon for BuiltinLexicon {
    fn lookup(&self, lang: &str, role: LemmaRole) -> Option<&BTreeSet<String>> {
        let entry = self.0.get(lang)?;
        let lemmas = match role {
            LemmaRole::Auxiliary => &entry.aux,
            LemmaRole::Copula => &entry.cop,
        };

        (!lemmas.is_empty()).then_some(lemmas)
    }
}

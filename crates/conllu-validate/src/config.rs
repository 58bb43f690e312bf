//! Validator config definition.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::Level;

/// The language code that selects only the universal tag sets.
pub const UNIVERSAL_LANGUAGE: &str = "ud";

/// The default number of diagnostics reported per category.
pub const DEFAULT_MAX_ERR: usize = 20;

/// The configuration for a validation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct Config {
    /// The conformance level to validate against.
    ///
    /// ## Example
    ///
    /// ```toml
    /// level = 2
    /// ```
    pub level: Level,
    /// The language code used to select language-specific tag sets and
    /// lemma lists.
    pub lang: String,
    /// Whether a sentence must have exactly one word attached to the root.
    pub single_root: bool,
    /// Whether the `# text` comment is checked against the word forms.
    pub check_tree_text: bool,
    /// Whether a missing `SpaceAfter=No` is reported.
    pub check_space_after: bool,
    /// How many diagnostics of one category are reported; `0` reports all.
    pub max_err: usize,
    /// Diagnostic identifiers that are excepted from being recorded.
    pub except: BTreeSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::default(),
            lang: UNIVERSAL_LANGUAGE.to_string(),
            single_root: true,
            check_tree_text: true,
            check_space_after: true,
            max_err: DEFAULT_MAX_ERR,
            except: BTreeSet::new(),
        }
    }
}

impl Config {
    /// Normalizes the configuration.
    ///
    /// Language-specific tag sets only apply from level 4, so the language is
    /// forced to [`UNIVERSAL_LANGUAGE`] below that.
    pub fn normalize(mut self) -> Self {
        if self.level < Level::Four && self.lang != UNIVERSAL_LANGUAGE {
            debug!(
                lang = %self.lang,
                level = %self.level,
                "ignoring the language below level 4"
            );
            self.lang = UNIVERSAL_LANGUAGE.to_string();
        }

        self.except = self
            .except
            .into_iter()
            .map(|id| id.to_lowercase())
            .collect();
        self
    }

    /// Determines if a diagnostic identifier is excepted.
    pub fn is_excepted(&self, rule: &str) -> bool {
        self.except.contains(&rule.to_lowercase())
    }
}

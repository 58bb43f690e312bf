//! Permitted tag sets loaded from data files.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use conllu_grammar::is_basic_relation;
use conllu_grammar::is_enhanced_relation;
use conllu_grammar::universal_part;
use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::config::UNIVERSAL_LANGUAGE;

/// The file stem of the universal part-of-speech tags.
pub const UPOS_FILE: &str = "cpos";
/// The file stem of the basic dependency relations.
pub const DEPREL_FILE: &str = "deprel";
/// The file stem of the enhanced-only dependency relations.
pub const EDEPREL_FILE: &str = "edeprel";
/// The file stem of the feature-value pairs.
pub const FEATS_FILE: &str = "feat_val";
/// The file stem of the patterns of tokens that may contain whitespace.
pub const TOKENS_WITH_SPACE_FILE: &str = "tokens_w_space";

/// The relation permitted in `DEPS` in addition to the basic relations.
pub const REF_RELATION: &str = "ref";

/// An error that occurred while loading tag sets.
#[derive(Error, Debug)]
pub enum TagsetError {
    /// A tag set file could not be read.
    #[error("failed to read tag set `{path}`")]
    Io {
        /// The path of the file.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A whitespace exception is not a valid regular expression.
    #[error("invalid whitespace exception pattern `{pattern}` in `{name}`")]
    Pattern {
        /// The name of the file.
        name: String,
        /// The offending pattern.
        pattern: String,
        /// The underlying error.
        #[source]
        source: regex::Error,
    },
}

/// A source of tag set files.
pub trait TagsetSource {
    /// Reads the named tag set file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    fn read(&self, name: &str) -> Result<Option<String>, TagsetError>;

    /// Describes where the named file is (or would be) found.
    fn describe(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Reads tag set files from a data directory.
#[derive(Debug, Clone)]
pub struct DataDir(PathBuf);

impl DataDir {
    /// Creates a source reading from the given directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Gets the path of the directory.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl TagsetSource for DataDir {
    fn read(&self, name: &str) -> Result<Option<String>, TagsetError> {
        let path = self.0.join(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TagsetError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    fn describe(&self, name: &str) -> String {
        self.0.join(name).display().to_string()
    }
}

/// Serves tag set files from memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource(IndexMap<String, String>);

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given contents.
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.0.insert(name.into(), contents.into());
        self
    }
}

impl TagsetSource for MemorySource {
    fn read(&self, name: &str) -> Result<Option<String>, TagsetError> {
        Ok(self.0.get(name).cloned())
    }
}

/// The kind of a defect in a language-specific relation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The relation does not match the relation grammar.
    Malformed,
    /// The universal part of the relation is not a universal relation.
    NotExtension,
}

/// A language-specific relation that was rejected while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsetIssue {
    /// The kind of defect.
    pub kind: IssueKind,
    /// The rejected relation.
    pub relation: String,
    /// Whether the relation came from the enhanced relation list.
    pub enhanced: bool,
    /// Where the relation was read from.
    pub resource: String,
}

/// The permitted values of each checked column.
///
/// A `None` set means the values of that column are not checked.
#[derive(Debug, Default)]
pub struct Tagsets {
    /// Permitted universal part-of-speech tags.
    upos: Option<HashSet<String>>,
    /// Permitted basic relations.
    deprel: Option<HashSet<String>>,
    /// Permitted enhanced relations.
    deps: Option<HashSet<String>>,
    /// Permitted `Feature=Value` pairs.
    feats: Option<HashSet<String>>,
    /// Patterns of forms and lemmas that may contain whitespace.
    tokens_with_space: Option<Vec<Regex>>,
    /// Language-specific files that do not exist, with where they were
    /// looked for.
    missing: BTreeMap<String, String>,
    /// Relations rejected while loading.
    issues: Vec<TagsetIssue>,
}

impl Tagsets {
    /// Creates tag sets that check nothing.
    pub fn unchecked() -> Self {
        Self::default()
    }

    /// Loads the tag sets for a language.
    ///
    /// The universal file of each kind (`<stem>.ud`) is read first; the
    /// language-specific file (`<stem>.<lang>`) extends it when it exists.
    /// Language-specific relations must be well formed and must extend a
    /// universal relation; rejected relations are kept as
    /// [issues](Self::issues).
    pub fn load(source: &dyn TagsetSource, lang: &str) -> Result<Self, TagsetError> {
        let mut tagsets = Self::default();

        tagsets.deprel = tagsets.load_set(source, DEPREL_FILE, DEPREL_FILE, lang, Some(false))?;
        let enhanced = tagsets.load_set(source, DEPREL_FILE, EDEPREL_FILE, lang, Some(true))?;
        tagsets.deps = tagsets.deprel.as_ref().map(|deprel| {
            deprel
                .iter()
                .cloned()
                .chain([REF_RELATION.to_string()])
                .chain(enhanced.into_iter().flatten())
                .collect()
        });
        tagsets.feats = tagsets.load_set(source, FEATS_FILE, FEATS_FILE, lang, None)?;
        tagsets.upos = read_list(source, &format!("{UPOS_FILE}.{UNIVERSAL_LANGUAGE}"))?
            .map(|list| list.into_iter().collect());

        let name = format!("{TOKENS_WITH_SPACE_FILE}.{lang}");
        tagsets.tokens_with_space = tagsets
            .load_set(
                source,
                TOKENS_WITH_SPACE_FILE,
                TOKENS_WITH_SPACE_FILE,
                lang,
                None,
            )?
            .map(|patterns| {
                let mut patterns: Vec<_> = patterns.into_iter().collect();
                patterns.sort();
                patterns
                    .into_iter()
                    .map(|pattern| {
                        Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                            TagsetError::Pattern {
                                name: name.clone(),
                                pattern,
                                source,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        info!(
            lang,
            upos = tagsets.upos.is_some(),
            deprel = tagsets.deprel.is_some(),
            deps = tagsets.deps.is_some(),
            feats = tagsets.feats.is_some(),
            tokens_with_space = tagsets.tokens_with_space.is_some(),
            "loaded tag sets"
        );
        Ok(tagsets)
    }

    /// Loads a universal set and its language-specific extension.
    ///
    /// `relations` selects validation of language-specific entries: `None`
    /// accepts them as they are, `Some(enhanced)` requires well-formed
    /// extensions of the universal relations.
    fn load_set(
        &mut self,
        source: &dyn TagsetSource,
        universal_stem: &str,
        specific_stem: &str,
        lang: &str,
        relations: Option<bool>,
    ) -> Result<Option<HashSet<String>>, TagsetError> {
        let universal_name = format!("{universal_stem}.{UNIVERSAL_LANGUAGE}");
        let Some(universal) = read_list(source, &universal_name)? else {
            debug!(name = universal_name, "universal tag set is absent");
            return Ok(None);
        };

        let mut set: HashSet<String> = universal.into_iter().collect();
        let specific_name = format!("{specific_stem}.{lang}");
        if specific_name == universal_name {
            return Ok(Some(set));
        }

        let Some(specific) = read_list(source, &specific_name)? else {
            debug!(name = specific_name, "language-specific tag set is absent");
            let location = source.describe(&specific_name);
            self.missing.insert(specific_name, location);
            return Ok(Some(set));
        };

        for value in specific {
            if let Some(enhanced) = relations {
                let kind = if enhanced && !is_enhanced_relation(&value)
                    || !enhanced && !is_basic_relation(&value)
                {
                    Some(IssueKind::Malformed)
                } else {
                    let universal = universal_part(&value);
                    (!set.contains(universal) && universal != REF_RELATION)
                        .then_some(IssueKind::NotExtension)
                };

                if let Some(kind) = kind {
                    self.issues.push(TagsetIssue {
                        kind,
                        relation: value,
                        enhanced,
                        resource: source.describe(&specific_name),
                    });
                    continue;
                }
            }

            set.insert(value);
        }

        Ok(Some(set))
    }

    /// Gets the permitted universal part-of-speech tags.
    pub fn upos(&self) -> Option<&HashSet<String>> {
        self.upos.as_ref()
    }

    /// Gets the permitted basic relations.
    pub fn deprel(&self) -> Option<&HashSet<String>> {
        self.deprel.as_ref()
    }

    /// Gets the permitted enhanced relations.
    pub fn deps(&self) -> Option<&HashSet<String>> {
        self.deps.as_ref()
    }

    /// Gets the permitted `Feature=Value` pairs.
    pub fn feats(&self) -> Option<&HashSet<String>> {
        self.feats.as_ref()
    }

    /// Gets the patterns of tokens that may contain whitespace.
    pub fn tokens_with_space(&self) -> Option<&[Regex]> {
        self.tokens_with_space.as_deref()
    }

    /// Gets the relations rejected while loading.
    pub fn issues(&self) -> &[TagsetIssue] {
        &self.issues
    }

    /// Gets where an absent language-specific file (such as `feat_val.cs`)
    /// was looked for.
    ///
    /// Returns `None` if the file was found or never looked for.
    pub fn missing(&self, name: &str) -> Option<&str> {
        self.missing.get(name).map(String::as_str)
    }

    /// Sets the permitted universal part-of-speech tags.
    pub fn with_upos<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.upos = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the permitted basic relations; the permitted enhanced relations
    /// become these plus `ref`.
    pub fn with_deprel<S: Into<String>>(mut self, relations: impl IntoIterator<Item = S>) -> Self {
        let deprel: HashSet<String> = relations.into_iter().map(Into::into).collect();
        self.deps = Some(
            deprel
                .iter()
                .cloned()
                .chain([REF_RELATION.to_string()])
                .collect(),
        );
        self.deprel = Some(deprel);
        self
    }

    /// Sets the permitted `Feature=Value` pairs.
    pub fn with_feats<S: Into<String>>(mut self, pairs: impl IntoIterator<Item = S>) -> Self {
        self.feats = Some(pairs.into_iter().map(Into::into).collect());
        self
    }
}

/// Reads a list file: one value per line, skipping blank lines and lines
/// starting with `#`.
fn read_list(source: &dyn TagsetSource, name: &str) -> Result<Option<Vec<String>>, TagsetError> {
    Ok(source.read(name)?.map(|text| {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file("cpos.ud", "NOUN\nVERB\n# comment\n\nPUNCT\n")
            .with_file("deprel.ud", "nsubj\nroot\npunct\nobl\n")
            .with_file("deprel.xx", "nsubj:pass\nObl:Bad\nfoo:bar\n")
            .with_file("edeprel.xx", "obl:на\nref:x\nbaz:qux\n")
            .with_file("feat_val.ud", "Number=Sing\n")
            .with_file("tokens_w_space.ud", "[0-9]+ [0-9]+\n")
    }

    #[test]
    fn loads_universal_sets() {
        let tagsets = Tagsets::load(&source(), "ud").expect("should load");
        assert_eq!(tagsets.upos().map(HashSet::len), Some(3));
        assert!(tagsets.deprel().unwrap().contains("nsubj"));
        assert!(tagsets.deps().unwrap().contains("ref"));
        assert!(tagsets.issues().is_empty());
        assert!(tagsets.missing("deprel.ud").is_none());

        let patterns = tagsets.tokens_with_space().unwrap();
        assert!(patterns[0].is_match("10 000"));
        assert!(!patterns[0].is_match("10 000 x"));
    }

    #[test]
    fn validates_language_specific_relations() {
        let tagsets = Tagsets::load(&source(), "xx").expect("should load");
        assert!(tagsets.deprel().unwrap().contains("nsubj:pass"));
        assert!(!tagsets.deprel().unwrap().contains("Obl:Bad"));
        assert!(tagsets.deps().unwrap().contains("obl:на"));
        assert!(tagsets.deps().unwrap().contains("ref:x"));
        assert!(tagsets.deps().unwrap().contains("nsubj:pass"));
        assert_eq!(tagsets.missing("feat_val.xx"), Some("feat_val.xx"));

        let issues: Vec<_> = tagsets
            .issues()
            .iter()
            .map(|i| (i.kind, i.relation.as_str(), i.enhanced))
            .collect();
        assert_eq!(
            issues,
            [
                (IssueKind::Malformed, "Obl:Bad", false),
                (IssueKind::NotExtension, "foo:bar", false),
                (IssueKind::NotExtension, "baz:qux", true),
            ]
        );
    }

    #[test]
    fn absent_files_leave_sets_unchecked() {
        let tagsets = Tagsets::load(&MemorySource::new(), "xx").expect("should load");
        assert!(tagsets.upos().is_none());
        assert!(tagsets.deps().is_none());
        assert!(tagsets.tokens_with_space().is_none());
    }

    #[test]
    fn reads_files_from_a_data_directory() {
        let dir = tempfile::tempdir().expect("should create a temporary directory");
        std::fs::write(dir.path().join("cpos.ud"), "NOUN\nVERB\n").expect("should write");
        std::fs::write(dir.path().join("deprel.ud"), "root\nnsubj\n").expect("should write");
        std::fs::write(dir.path().join("deprel.xx"), "nsubj:pass\n").expect("should write");

        let tagsets = Tagsets::load(&DataDir::new(dir.path()), "xx").expect("should load");
        assert_eq!(tagsets.upos().map(HashSet::len), Some(2));
        assert!(tagsets.deprel().unwrap().contains("nsubj:pass"));
        assert!(tagsets.feats().is_none());
        assert!(tagsets.missing("deprel.xx").is_none());

        let expected = dir.path().join("edeprel.xx").display().to_string();
        assert_eq!(tagsets.missing("edeprel.xx"), Some(expected.as_str()));
        assert!(tagsets.missing("feat_val.xx").is_none());
    }
}

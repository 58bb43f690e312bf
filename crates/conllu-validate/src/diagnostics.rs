//! The diagnostic sink of a validation run.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::Category;
use crate::Diagnostic;

/// A report delivered to the reporter of a [`Diagnostics`] sink.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    /// A diagnostic was recorded.
    Diagnostic(&'a Diagnostic),
    /// The cap for a category was reached; further diagnostics of the
    /// category are recorded but not reported.
    Suppressed(Category),
}

/// A callback that receives reports as diagnostics are recorded.
pub type Reporter = Box<dyn FnMut(Report<'_>)>;

/// A collection of diagnostics.
///
/// Every recorded diagnostic is kept and counted; only the first
/// `max_err - 1` diagnostics of each category are forwarded to the reporter,
/// followed by a single [`Report::Suppressed`] notice.
#[derive(Default)]
pub struct Diagnostics {
    /// The recorded diagnostics, in order.
    recorded: Vec<Diagnostic>,
    /// The number of diagnostics recorded per category.
    counts: BTreeMap<Category, usize>,
    /// The per-category reporting cap; `0` is unlimited.
    max_err: usize,
    /// Lower case diagnostic identifiers that are not recorded.
    except: BTreeSet<String>,
    /// The optional reporter.
    reporter: Option<Reporter>,
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("recorded", &self.recorded)
            .field("counts", &self.counts)
            .field("max_err", &self.max_err)
            .field("except", &self.except)
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}

impl Diagnostics {
    /// Creates a new sink with the given per-category reporting cap.
    pub fn new(max_err: usize) -> Self {
        Self {
            max_err,
            ..Default::default()
        }
    }

    /// Sets the diagnostic identifiers that are not recorded.
    pub fn with_except(mut self, except: impl IntoIterator<Item = String>) -> Self {
        self.except = except.into_iter().map(|id| id.to_lowercase()).collect();
        self
    }

    /// Sets the reporter that receives diagnostics as they are recorded.
    pub fn with_reporter(mut self, reporter: impl FnMut(Report<'_>) + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Adds a diagnostic to the collection.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if self.except.contains(diagnostic.rule()) {
            return;
        }

        let count = self.counts.entry(diagnostic.category()).or_default();
        *count += 1;
        if let Some(reporter) = &mut self.reporter {
            if self.max_err > 0 && *count == self.max_err {
                reporter(Report::Suppressed(diagnostic.category()));
            } else if self.max_err == 0 || *count < self.max_err {
                reporter(Report::Diagnostic(&diagnostic));
            }
        }

        self.recorded.push(diagnostic);
    }

    /// Gets the recorded diagnostics.
    pub fn recorded(&self) -> &[Diagnostic] {
        &self.recorded
    }

    /// Gets the number of diagnostics recorded per category, sorted by
    /// category name.
    pub fn counts(&self) -> Vec<(Category, usize)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(c, n)| (*c, *n)).collect();
        counts.sort_by_key(|(c, _)| c.name());
        counts
    }

    /// Gets the total number of recorded diagnostics.
    pub fn total(&self) -> usize {
        self.recorded.len()
    }

    /// Determines if no diagnostic was recorded.
    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }
}

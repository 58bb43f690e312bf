//! Implementation of the validator.

use std::fmt;
use std::io;
use std::io::BufRead;

use conllu_grammar::Malformation;
use conllu_grammar::SegmentVisitor;
use conllu_grammar::Segmenter;
use conllu_grammar::Sentence;
use conllu_grammar::TokenRow;
use conllu_grammar::build_graph;
use conllu_grammar::build_tree;
use indexmap::IndexMap;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::Config;
use crate::Context;
use crate::Diagnostic;
use crate::Diagnostics;
use crate::Level;
use crate::Lexicon;
use crate::Report;
use crate::Rule;
use crate::Session;
use crate::StreamEnd;
use crate::Tagsets;
use crate::rules;

/// The diagnostic identifier of an unexpected failure during a run.
pub const EXCEPTION_CAUGHT_ID: &str = "exception-caught";

/// The outcome of a validation run.
#[derive(Debug)]
pub struct Summary {
    /// The recorded diagnostics.
    diagnostics: Diagnostics,
    /// Where the language-specific resources that failing checks hinted at
    /// were looked for.
    missing_resources: Vec<String>,
}

impl Summary {
    /// Gets the recorded diagnostics.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Gets the absent language-specific resources that failing checks
    /// hinted at.
    pub fn missing_resources(&self) -> &[String] {
        &self.missing_resources
    }

    /// Determines if the run passed, that is, no diagnostic was recorded.
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Validates CoNLL-U inputs against a set of rules.
///
/// By default, the validator runs all rules up to the configured level.
///
/// A validator performs one run, which may span several inputs: sentence
/// identifiers must be unique across all of them.
#[allow(missing_debug_implementations)]
pub struct Validator {
    /// The map of rule id to rule, in the order the rules run.
    rules: IndexMap<&'static str, Box<dyn Rule>>,
    /// The configuration of the run.
    config: Config,
    /// The permitted tag sets.
    tagsets: Tagsets,
    /// The approved lemma lists.
    lexicon: Box<dyn Lexicon>,
    /// The state of the run.
    session: Session,
    /// Whether the start of the run was visited.
    started: bool,
}

impl Validator {
    /// Creates a new validator running the default rules.
    ///
    /// The configuration is normalized first.
    pub fn new(config: Config, tagsets: Tagsets, lexicon: Box<dyn Lexicon>) -> Self {
        let config = config.normalize();
        let diagnostics =
            Diagnostics::new(config.max_err).with_except(config.except.iter().cloned());
        Self {
            rules: rules().into_iter().map(|r| (r.id(), r)).collect(),
            config,
            tagsets,
            lexicon,
            session: Session::new(diagnostics),
            started: false,
        }
    }

    /// Replaces the rules run by the validator.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Box<dyn Rule>>) -> Self {
        self.rules = rules.into_iter().map(|r| (r.id(), r)).collect();
        self
    }

    /// Replaces the diagnostic sink.
    ///
    /// This must be called before any input is validated.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.session = Session::new(diagnostics);
        self
    }

    /// Sets the reporter that receives diagnostics as they are recorded.
    ///
    /// The reporter is subject to the configured cap and exceptions. This
    /// must be called before any input is validated.
    pub fn with_reporter(self, reporter: impl FnMut(Report<'_>) + 'static) -> Self {
        let diagnostics = Diagnostics::new(self.config.max_err)
            .with_except(self.config.except.iter().cloned())
            .with_reporter(reporter);
        self.with_diagnostics(diagnostics)
    }

    /// Gets the normalized configuration of the run.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the state of the run.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Validates one input.
    ///
    /// The `name` is shown in diagnostics; `None` is used for standard input.
    ///
    /// A read failure is recorded as a diagnostic and then returned.
    pub fn validate(&mut self, name: Option<&str>, reader: impl BufRead) -> io::Result<()> {
        let Self {
            rules,
            config,
            tagsets,
            lexicon,
            session,
            started,
        } = self;

        let mut dispatcher = Dispatcher {
            rules,
            session,
            ctx: Context {
                config: &*config,
                tagsets: &*tagsets,
                lexicon: lexicon.as_ref(),
            },
        };

        if !*started {
            *started = true;
            info!(
                level = %dispatcher.ctx.config.level,
                lang = %dispatcher.ctx.config.lang,
                rules = dispatcher.rules.len(),
                "starting validation run"
            );
            dispatcher.each(|rule, state, ctx| rule.start(state, ctx));
        }

        dispatcher.session.start_input(name.map(str::to_string));
        let mut segmenter = Segmenter::new(reader);
        let mut sentences = 0;
        loop {
            match segmenter.next_sentence(&mut dispatcher) {
                Ok(Some(sentence)) => {
                    sentences += 1;
                    dispatcher.sentence(&sentence);
                }
                Ok(None) => break,
                Err(e) => {
                    record_failure(dispatcher.session, segmenter.line(), &e);
                    return Err(e);
                }
            }
        }

        debug!(
            input = name.unwrap_or("-"),
            lines = segmenter.line(),
            sentences,
            "finished reading input"
        );

        let end = StreamEnd {
            line_endings: segmenter.line_endings(),
            lines: segmenter.line(),
        };
        dispatcher.each(|rule, state, ctx| rule.finish(state, ctx, &end));
        Ok(())
    }

    /// Finishes the run and returns its summary.
    pub fn finish(self) -> Summary {
        let lang = &self.config.lang;
        let missing_resources = self
            .session
            .hints()
            .iter()
            .filter_map(|stem| self.tagsets.missing(&format!("{stem}.{lang}")))
            .map(str::to_string)
            .collect();

        let diagnostics = self.session.into_diagnostics();
        info!(
            diagnostics = diagnostics.total(),
            "finished validation run"
        );

        Summary {
            diagnostics,
            missing_resources,
        }
    }
}

/// Records an unexpected failure on the given line.
fn record_failure(session: &mut Session, line: usize, error: &dyn fmt::Display) {
    error!("validation failed on line {line}: {error}");
    session.add(
        Diagnostic::format("Exception caught")
            .with_rule(EXCEPTION_CAUGHT_ID)
            .with_level(Level::One)
            .with_line(line),
    );
}

/// Dispatches the events of one input to the enabled rules.
struct Dispatcher<'a> {
    /// The rules of the run.
    rules: &'a mut IndexMap<&'static str, Box<dyn Rule>>,
    /// The state of the run.
    session: &'a mut Session,
    /// The resources of the run.
    ctx: Context<'a>,
}

impl Dispatcher<'_> {
    /// Invokes a callback on each rule enabled at the configured level.
    fn each(&mut self, mut cb: impl FnMut(&mut dyn Rule, &mut Session, &Context<'_>)) {
        for rule in self.rules.values_mut() {
            if rule.level() > self.ctx.config.level {
                continue;
            }

            cb(rule.as_mut(), &mut *self.session, &self.ctx);
        }
    }

    /// Visits a complete sentence and the structures built from it.
    fn sentence(&mut self, sentence: &Sentence) {
        let config = self.ctx.config;
        self.session.start_sentence(sentence.start_line());
        self.each(|rule, state, ctx| rule.sentence(state, ctx, sentence));
        if config.level < Level::Two {
            return;
        }

        let tree = build_tree(sentence, config.single_root);
        let graph = build_graph(sentence);
        self.each(|rule, state, ctx| {
            rule.structure(
                state,
                ctx,
                tree.as_ref(),
                graph.as_ref().map(Option::as_ref),
            )
        });

        if config.level < Level::Three {
            return;
        }

        if let Ok(tree) = &tree {
            self.each(|rule, state, ctx| rule.tree(state, ctx, tree));
        }

        if let Ok(Some(graph)) = &graph {
            self.each(|rule, state, ctx| rule.graph(state, ctx, graph));
        }
    }
}

impl SegmentVisitor for Dispatcher<'_> {
    fn malformation(&mut self, malformation: &Malformation) {
        self.each(|rule, state, ctx| rule.malformation(state, ctx, malformation));
    }

    fn sent_id(&mut self, _: usize, id: &str) {
        self.session.set_label(id);
    }

    fn row(&mut self, row: &TokenRow) {
        self.each(|rule, state, ctx| rule.row(state, ctx, row));
    }
}

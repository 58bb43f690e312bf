//! Definition of diagnostics displayed to users.

use std::fmt;

use crate::Category;
use crate::Level;

/// The location a diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// A line of the input.
    Line(usize),
    /// A whole sentence, identified by its running number and start line.
    Tree {
        /// The running number of the sentence within the run.
        number: usize,
        /// The line of the first token row of the sentence.
        line: usize,
    },
    /// A resource (such as a tag set file) read before validation.
    Resource(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => write!(f, "Line {line}"),
            Self::Tree { number, line } => write!(f, "Tree number {number} on line {line}"),
            Self::Resource(name) => write!(f, "{name}"),
        }
    }
}

/// Represents a diagnostic to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The category of the diagnostic.
    category: Category,
    /// The conformance level the diagnostic belongs to.
    level: Level,
    /// The identifier of the check that produced the diagnostic.
    rule: &'static str,
    /// The diagnostic message.
    message: String,
    /// The location of the diagnostic.
    location: Location,
    /// The node the diagnostic refers to, if any.
    node: Option<String>,
    /// The label of the sentence being read when the diagnostic was recorded.
    sentence: Option<String>,
    /// The name of the input the diagnostic was found in.
    input: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic of the given category.
    ///
    /// The diagnostic is placed at level 1 on line 0 until a level and
    /// location are given.
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            level: Level::One,
            rule: "",
            message: message.into(),
            location: Location::Line(0),
            node: None,
            sentence: None,
            input: None,
        }
    }

    /// Creates a new [`Category::Format`] diagnostic.
    pub fn format(message: impl Into<String>) -> Self {
        Self::new(Category::Format, message)
    }

    /// Creates a new [`Category::Morpho`] diagnostic.
    pub fn morpho(message: impl Into<String>) -> Self {
        Self::new(Category::Morpho, message)
    }

    /// Creates a new [`Category::Syntax`] diagnostic.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(Category::Syntax, message)
    }

    /// Creates a new [`Category::Enhanced`] diagnostic.
    pub fn enhanced(message: impl Into<String>) -> Self {
        Self::new(Category::Enhanced, message)
    }

    /// Creates a new [`Category::Metadata`] diagnostic.
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::new(Category::Metadata, message)
    }

    /// Creates a new [`Category::Unicode`] diagnostic.
    pub fn unicode(message: impl Into<String>) -> Self {
        Self::new(Category::Unicode, message)
    }

    /// Sets the identifier of the check that produced the diagnostic.
    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the conformance level of the diagnostic.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Places the diagnostic on a line of the input.
    pub fn with_line(mut self, line: usize) -> Self {
        self.location = Location::Line(line);
        self
    }

    /// Sets the location of the diagnostic.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets the node the diagnostic refers to.
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Sets the label of the sentence the diagnostic was found in.
    pub fn with_sentence(mut self, sentence: Option<String>) -> Self {
        self.sentence = sentence;
        self
    }

    /// Sets the name of the input the diagnostic was found in.
    pub fn with_input(mut self, input: Option<String>) -> Self {
        self.input = input;
        self
    }

    /// Gets the category of the diagnostic.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Gets the conformance level of the diagnostic.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Gets the identifier of the check that produced the diagnostic.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    /// Gets the message of the diagnostic.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the location of the diagnostic.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Gets the node the diagnostic refers to.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Gets the label of the sentence the diagnostic was found in.
    pub fn sentence(&self) -> Option<&str> {
        self.sentence.as_deref()
    }

    /// Gets the name of the input the diagnostic was found in.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Gets the bracketed location prefix of the one-line rendering.
    pub fn origin(&self) -> String {
        let mut origin = String::new();
        if let (Some(input), false) = (&self.input, matches!(self.location, Location::Resource(_)))
        {
            origin.push_str(&format!("(in {input}) "));
        }

        origin.push_str(&self.location.to_string());
        if let Some(sentence) = &self.sentence {
            origin.push_str(&format!(" Sent {sentence}"));
        }

        if let Some(node) = &self.node {
            origin.push_str(&format!(" Node {node}"));
        }

        origin
    }

    /// Gets the bracketed classification of the one-line rendering.
    pub fn classification(&self) -> String {
        format!(
            "L{level} {category} {rule}",
            level = self.level,
            category = self.category,
            rule = self.rule
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{origin}]: [{classification}] {message}",
            origin = self.origin(),
            classification = self.classification(),
            message = self.message
        )
    }
}

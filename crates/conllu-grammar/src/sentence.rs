//! Sentence blocks and their comment lines.

use crate::row::TokenId;
use crate::row::TokenRow;

/// Represents a comment line preceding the token rows of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The one-based line number of the comment.
    line: usize,
    /// The text of the comment, including the leading `#`.
    text: String,
}

impl Comment {
    /// Creates a new comment.
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }

    /// Gets the one-based line number of the comment.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Gets the text of the comment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Gets the value of a well-formed `# sent_id = <id>` comment.
    pub fn sent_id(&self) -> Option<&str> {
        sent_id_value(&self.text)
    }

    /// Gets the value of a well-formed `# text = <text>` comment.
    pub fn sentence_text(&self) -> Option<&str> {
        attribute_value(&self.text, "# text").and_then(|rest| {
            let value = rest.trim_start();
            if !value.is_empty() {
                return Some(value);
            }

            // A whitespace-only value still matches; it keeps the last
            // whitespace character.
            rest.char_indices().last().map(|(i, _)| &rest[i..])
        })
    }
}

/// Gets the text after `<prefix> =` (with optional whitespace around the
/// equals sign), if the comment has that shape.
fn attribute_value<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.strip_prefix(prefix)?
        .trim_start()
        .strip_prefix('=')
}

/// Gets the sentence identifier of a `# sent_id = <id>` comment.
///
/// The identifier must be non-empty and must not contain whitespace.
pub fn sent_id_value(text: &str) -> Option<&str> {
    let value = attribute_value(text, "# sent_id")?.trim_start();
    (!value.is_empty() && !value.contains(char::is_whitespace)).then_some(value)
}

/// Represents one sentence of the input: leading comments followed by token
/// rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    /// The leading comment lines.
    comments: Vec<Comment>,
    /// The token rows.
    rows: Vec<TokenRow>,
}

impl Sentence {
    /// Creates a sentence from its comments and rows.
    pub fn new(comments: Vec<Comment>, rows: Vec<TokenRow>) -> Self {
        Self { comments, rows }
    }

    /// Parses a sentence from text without reporting malformations.
    ///
    /// Blank lines and lines that are neither comments nor token rows are
    /// skipped; this is intended for building sentences in tests.
    pub fn parse(text: &str) -> Self {
        let mut sentence = Self::default();
        for (i, line) in text.lines().enumerate() {
            if line.starts_with('#') {
                sentence.comments.push(Comment::new(i + 1, line));
            } else if line.starts_with(|c: char| c.is_ascii_digit()) {
                sentence.rows.push(TokenRow::new(i + 1, line));
            }
        }

        sentence
    }

    /// Gets the comment lines of the sentence.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Gets the token rows of the sentence.
    pub fn rows(&self) -> &[TokenRow] {
        &self.rows
    }

    /// Iterates the rows that are syntactic words.
    pub fn words(&self) -> impl Iterator<Item = &TokenRow> {
        self.rows.iter().filter(|r| r.id().is_word())
    }

    /// Iterates the rows that are syntactic words or empty nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &TokenRow> {
        self.rows
            .iter()
            .filter(|r| matches!(r.id(), TokenId::Word(_) | TokenId::Empty(..)))
    }

    /// Determines if the sentence has neither comments nor rows.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.rows.is_empty()
    }

    /// Gets the line number the sentence starts on.
    ///
    /// This is the line of the first token row or, for a sentence without
    /// rows, the line of its first comment.
    pub fn start_line(&self) -> usize {
        self.rows
            .first()
            .map(TokenRow::line)
            .or_else(|| self.comments.first().map(Comment::line))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sent_id_comments() {
        assert_eq!(sent_id_value("# sent_id = s1"), Some("s1"));
        assert_eq!(sent_id_value("# sent_id=a/b"), Some("a/b"));
        assert_eq!(sent_id_value("# sent_id = two words"), None);
        assert_eq!(sent_id_value("# sent_id = "), None);
        assert_eq!(sent_id_value("#sent_id = s1"), None);
        assert_eq!(sent_id_value("# sent_idx = s1"), None);
    }

    #[test]
    fn text_comments() {
        let text = |t: &str| Comment::new(1, t).sentence_text().map(str::to_string);
        assert_eq!(text("# text = Cats run."), Some("Cats run.".to_string()));
        assert_eq!(text("# text=trailing "), Some("trailing ".to_string()));
        assert_eq!(text("# text =  "), Some(" ".to_string()));
        assert_eq!(text("# text ="), None);
        assert_eq!(text("# textual = no"), None);
    }

    #[test]
    fn start_line() {
        let sentence = Sentence::parse("# sent_id = a\n1\tx\tx\tX\t_\t_\t0\troot\t_\t_");
        assert_eq!(sentence.start_line(), 2);
        assert_eq!(sentence.comments().len(), 1);
        assert_eq!(sentence.words().count(), 1);
        assert_eq!(Sentence::default().start_line(), 0);
    }
}

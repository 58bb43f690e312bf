//! Splitting of a line stream into sentences.

use std::fmt;
use std::io;
use std::io::BufRead;

use tracing::debug;

use crate::COLUMN_COUNT;
use crate::row::TokenRow;
use crate::sentence::Comment;
use crate::sentence::Sentence;
use crate::sentence::sent_id_value;

/// The kind of a stream-level malformation found while segmenting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformationKind {
    /// A line that contains only whitespace characters.
    PseudoEmptyLine,
    /// A blank line that does not terminate a sentence.
    ExtraEmptyLine,
    /// A comment line after the first token row of a sentence.
    MisplacedComment,
    /// A token row with the given number of columns instead of ten.
    ColumnCount(usize),
    /// A line that is neither blank, a comment, nor a token row.
    InvalidLine(String),
    /// The stream does not end with a blank line.
    MissingEmptyLine,
    /// The line is not valid UTF-8; it was decoded lossily.
    InvalidEncoding,
}

/// A stream-level malformation and the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformation {
    /// The kind of malformation.
    pub kind: MalformationKind,
    /// The one-based line number.
    pub line: usize,
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MalformationKind::PseudoEmptyLine => write!(
                f,
                "Spurious line that appears empty but is not; there are whitespace characters."
            ),
            MalformationKind::ExtraEmptyLine => write!(
                f,
                "Spurious empty line. Only one empty line is expected after every sentence."
            ),
            MalformationKind::MisplacedComment => write!(
                f,
                "Spurious comment line. Comments are only allowed before a sentence."
            ),
            MalformationKind::ColumnCount(n) => write!(
                f,
                "The line has {n} columns but {COLUMN_COUNT} are expected."
            ),
            MalformationKind::InvalidLine(text) => write!(
                f,
                "Spurious line: {text:?} All non-empty lines should start with a digit or the # \
                 character."
            ),
            MalformationKind::MissingEmptyLine => {
                write!(f, "Missing empty line after the last sentence.")
            }
            MalformationKind::InvalidEncoding => {
                write!(f, "The line is not valid UTF-8.")
            }
        }
    }
}

/// Receives events from a [`Segmenter`] while it reads a sentence.
///
/// Events are delivered as soon as the corresponding line is read, before
/// the sentence containing it is complete.
pub trait SegmentVisitor {
    /// Called for each stream-level malformation.
    fn malformation(&mut self, malformation: &Malformation) {
        let _ = malformation;
    }

    /// Called when a comment of the form `# sent_id = <id>` is read.
    fn sent_id(&mut self, line: usize, id: &str) {
        let _ = (line, id);
    }

    /// Called for each token row, before the next line is read.
    fn row(&mut self, row: &TokenRow) {
        let _ = row;
    }
}

impl SegmentVisitor for () {}

/// Counts of the line terminators observed in a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineEndings {
    /// The number of lines terminated by `\n`.
    pub lf: usize,
    /// The number of lines terminated by `\r\n`.
    pub crlf: usize,
}

impl LineEndings {
    /// Determines if any line used a terminator other than `\n`.
    pub fn has_non_unix(&self) -> bool {
        self.crlf > 0
    }
}

/// Reads sentences from a line stream.
///
/// Sentences are delimited by blank lines. A whitespace-only line also ends
/// the current sentence (and is reported), as does the end of the stream
/// (which is reported when the sentence was not followed by a blank line).
#[derive(Debug)]
pub struct Segmenter<R> {
    /// The underlying reader.
    reader: R,
    /// The line buffer.
    buffer: Vec<u8>,
    /// The number of lines read so far.
    line: usize,
    /// The observed line terminators.
    endings: LineEndings,
    /// Whether the end of the stream was reached.
    finished: bool,
}

impl<R: BufRead> Segmenter<R> {
    /// Creates a new segmenter over the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line: 0,
            endings: LineEndings::default(),
            finished: false,
        }
    }

    /// Gets the number of lines read so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Gets the line terminators observed so far.
    pub fn line_endings(&self) -> LineEndings {
        self.endings
    }

    /// Reads the next sentence.
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    pub fn next_sentence(
        &mut self,
        visitor: &mut impl SegmentVisitor,
    ) -> io::Result<Option<Sentence>> {
        if self.finished {
            return Ok(None);
        }

        let mut comments = Vec::new();
        let mut rows = Vec::new();
        loop {
            let Some(text) = self.read_line(visitor)? else {
                self.finished = true;
                debug!(lines = self.line, "reached the end of the stream");
                if comments.is_empty() && rows.is_empty() {
                    return Ok(None);
                }

                self.report(visitor, MalformationKind::MissingEmptyLine);
                return Ok(Some(Sentence::new(comments, rows)));
            };

            if text.is_empty() {
                if !rows.is_empty() {
                    return Ok(Some(Sentence::new(comments, rows)));
                }

                self.report(visitor, MalformationKind::ExtraEmptyLine);
            } else if text.chars().all(char::is_whitespace) {
                self.report(visitor, MalformationKind::PseudoEmptyLine);
                if !rows.is_empty() {
                    return Ok(Some(Sentence::new(comments, rows)));
                }
            } else if text.starts_with('#') {
                if let Some(id) = sent_id_value(&text) {
                    visitor.sent_id(self.line, id);
                }

                if rows.is_empty() {
                    comments.push(Comment::new(self.line, text));
                } else {
                    self.report(visitor, MalformationKind::MisplacedComment);
                }
            } else if text.starts_with(|c: char| c.is_ascii_digit()) {
                let row = TokenRow::new(self.line, &text);
                if row.fields().len() != COLUMN_COUNT {
                    self.report(visitor, MalformationKind::ColumnCount(row.fields().len()));
                }

                visitor.row(&row);
                rows.push(row);
            } else {
                self.report(visitor, MalformationKind::InvalidLine(text));
            }
        }
    }

    /// Reports a malformation on the current line.
    fn report(&self, visitor: &mut impl SegmentVisitor, kind: MalformationKind) {
        visitor.malformation(&Malformation {
            kind,
            line: self.line,
        });
    }

    /// Reads the next line without its terminator.
    fn read_line(&mut self, visitor: &mut impl SegmentVisitor) -> io::Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }

        self.line += 1;
        if self.buffer.ends_with(b"\r\n") {
            self.endings.crlf += 1;
            self.buffer.truncate(self.buffer.len() - 2);
        } else if self.buffer.ends_with(b"\n") {
            self.endings.lf += 1;
            self.buffer.pop();
        }

        match std::str::from_utf8(&self.buffer) {
            Ok(text) => Ok(Some(text.to_string())),
            Err(_) => {
                self.report(visitor, MalformationKind::InvalidEncoding);
                Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
        }
    }

    /// Reads all remaining sentences, ignoring every event.
    pub fn collect_sentences(mut self) -> io::Result<Vec<Sentence>> {
        let mut sentences = Vec::new();
        while let Some(sentence) = self.next_sentence(&mut ())? {
            sentences.push(sentence);
        }

        Ok(sentences)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Records the events delivered by the segmenter.
    #[derive(Default)]
    struct Events {
        /// Malformations, rendered as `line: kind`.
        malformations: Vec<(usize, MalformationKind)>,
        /// Sentence identifiers seen.
        ids: Vec<String>,
        /// Line numbers of the rows seen.
        rows: Vec<usize>,
    }

    impl SegmentVisitor for Events {
        fn malformation(&mut self, malformation: &Malformation) {
            self.malformations
                .push((malformation.line, malformation.kind.clone()));
        }

        fn sent_id(&mut self, _: usize, id: &str) {
            self.ids.push(id.to_string());
        }

        fn row(&mut self, row: &TokenRow) {
            self.rows.push(row.line());
        }
    }

    fn segment(input: &str) -> (Vec<Sentence>, Events, LineEndings) {
        let mut segmenter = Segmenter::new(input.as_bytes());
        let mut events = Events::default();
        let mut sentences = Vec::new();
        while let Some(s) = segmenter.next_sentence(&mut events).unwrap() {
            sentences.push(s);
        }

        let endings = segmenter.line_endings();
        (sentences, events, endings)
    }

    const ROW: &str = "1\tx\tx\tX\t_\t_\t0\troot\t_\t_";

    #[test]
    fn splits_on_blank_lines() {
        let input = format!("# sent_id = a\n{ROW}\n\n# sent_id = b\n{ROW}\n\n");
        let (sentences, events, endings) = segment(&input);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].start_line(), 5);
        assert_eq!(events.ids, ["a", "b"]);
        assert_eq!(events.rows, [2, 5]);
        assert!(events.malformations.is_empty());
        assert_eq!(endings, LineEndings { lf: 6, crlf: 0 });
    }

    #[test]
    fn reports_malformations() {
        let input = format!("\n{ROW}\n# late\n \nfoo\n1\tx\n");
        let (sentences, events, _) = segment(&input);
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            events.malformations,
            [
                (1, MalformationKind::ExtraEmptyLine),
                (3, MalformationKind::MisplacedComment),
                (4, MalformationKind::PseudoEmptyLine),
                (5, MalformationKind::InvalidLine("foo".to_string())),
                (6, MalformationKind::ColumnCount(2)),
                (6, MalformationKind::MissingEmptyLine),
            ]
        );
        assert_eq!(sentences[1].rows().len(), 1);
    }

    #[test]
    fn records_crlf_terminators() {
        let input = format!("{ROW}\r\n\r\n");
        let (sentences, events, endings) = segment(&input);
        assert_eq!(sentences.len(), 1);
        assert!(events.malformations.is_empty());
        assert!(endings.has_non_unix());
    }

    #[test]
    fn decodes_invalid_utf8_lossily() {
        let mut input = b"1\tx".to_vec();
        input.extend_from_slice(&[0xff]);
        input.extend_from_slice(b"\tx\tX\t_\t_\t0\troot\t_\t_\n\n");
        let mut segmenter = Segmenter::new(input.as_slice());
        let mut events = Events::default();
        let sentence = segmenter.next_sentence(&mut events).unwrap().unwrap();
        assert_eq!(
            events.malformations,
            [(1, MalformationKind::InvalidEncoding)]
        );
        assert_eq!(sentence.rows()[0].fields()[1], "x\u{fffd}");
    }
}

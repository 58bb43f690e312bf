//! Token rows and their identifiers.

use std::fmt;

/// The number of tab-separated columns expected on a token row.
pub const COLUMN_COUNT: usize = 10;

/// Represents one of the ten columns of a token row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    /// The token identifier.
    Id,
    /// The surface form.
    Form,
    /// The lemma.
    Lemma,
    /// The universal part-of-speech tag.
    Upos,
    /// The language-specific part-of-speech tag.
    Xpos,
    /// The morphological feature list.
    Feats,
    /// The head of the token in the basic tree.
    Head,
    /// The basic dependency relation.
    Deprel,
    /// The enhanced dependency list.
    Deps,
    /// Miscellaneous annotations.
    Misc,
}

impl Column {
    /// All columns in file order.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Self::Id,
        Self::Form,
        Self::Lemma,
        Self::Upos,
        Self::Xpos,
        Self::Feats,
        Self::Head,
        Self::Deprel,
        Self::Deps,
        Self::Misc,
    ];

    /// Gets the zero-based position of the column on a row.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Gets the column for the given zero-based position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Gets the canonical (upper case) name of the column.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Form => "FORM",
            Self::Lemma => "LEMMA",
            Self::Upos => "UPOS",
            Self::Xpos => "XPOS",
            Self::Feats => "FEATS",
            Self::Head => "HEAD",
            Self::Deprel => "DEPREL",
            Self::Deps => "DEPS",
            Self::Misc => "MISC",
        }
    }

    /// Determines if the column may contain single interior whitespace
    /// characters.
    pub const fn allows_whitespace(self) -> bool {
        matches!(self, Self::Form | Self::Lemma | Self::Misc)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the identifier of a token row.
///
/// The variant is derived purely from the syntax of the `ID` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenId {
    /// A syntactic word (`n`).
    Word(u32),
    /// A multiword token range (`b-e`).
    Range(u32, u32),
    /// An empty node (`w.k`).
    Empty(u32, u32),
    /// The identifier matches none of the known forms.
    Invalid,
}

impl TokenId {
    /// Classifies an identifier.
    pub fn parse(text: &str) -> Self {
        if let Some(n) = positive(text) {
            return Self::Word(n);
        }

        if let Some((begin, end)) = text.split_once('-') {
            return match (positive(begin), positive(end)) {
                (Some(b), Some(e)) => Self::Range(b, e),
                _ => Self::Invalid,
            };
        }

        if let Some((word, index)) = text.split_once('.') {
            let word = (!word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()))
                .then(|| word.parse().ok())
                .flatten();
            return match (word, positive(index)) {
                (Some(w), Some(k)) => Self::Empty(w, k),
                _ => Self::Invalid,
            };
        }

        Self::Invalid
    }

    /// Determines if the identifier denotes a syntactic word.
    pub fn is_word(&self) -> bool {
        matches!(self, Self::Word(_))
    }

    /// Determines if the identifier denotes a multiword token range.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range(..))
    }

    /// Determines if the identifier denotes an empty node.
    pub fn is_empty_node(&self) -> bool {
        matches!(self, Self::Empty(..))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(n) => write!(f, "{n}"),
            Self::Range(b, e) => write!(f, "{b}-{e}"),
            Self::Empty(w, k) => write!(f, "{w}.{k}"),
            Self::Invalid => write!(f, "<invalid>"),
        }
    }
}

/// Parses a positive integer without a leading zero.
fn positive(text: &str) -> Option<u32> {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(b'1'..=b'9') if bytes.all(|b| b.is_ascii_digit()) => text.parse().ok(),
        _ => None,
    }
}

/// Represents a single token row as read from the input.
///
/// The row keeps every tab-separated field, regardless of how many there
/// are; use [`TokenRow::record`] to get the ten-column view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    /// The one-based line number of the row.
    line: usize,
    /// The classified identifier.
    id: TokenId,
    /// The raw fields of the row.
    fields: Vec<String>,
}

impl TokenRow {
    /// Creates a token row from a line of text (without its terminator).
    pub fn new(line: usize, text: &str) -> Self {
        let fields: Vec<String> = text.split('\t').map(str::to_string).collect();
        let id = TokenId::parse(&fields[0]);
        Self { line, id, fields }
    }

    /// Gets the one-based line number of the row.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Gets the classified identifier of the row.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Gets the raw fields of the row.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Gets the text of a column, if the row has it.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.fields.get(column.index()).map(String::as_str)
    }

    /// Gets the ten-column view of the row.
    ///
    /// Returns `None` if the row has fewer than ten fields.
    pub fn record(&self) -> Option<Record<'_>> {
        if self.fields.len() < COLUMN_COUNT {
            return None;
        }

        let f = &self.fields;
        Some(Record {
            id: &f[0],
            form: &f[1],
            lemma: &f[2],
            upos: &f[3],
            xpos: &f[4],
            feats: &f[5],
            head: &f[6],
            deprel: &f[7],
            deps: &f[8],
            misc: &f[9],
        })
    }
}

/// A ten-column view of a token row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// The `ID` column.
    pub id: &'a str,
    /// The `FORM` column.
    pub form: &'a str,
    /// The `LEMMA` column.
    pub lemma: &'a str,
    /// The `UPOS` column.
    pub upos: &'a str,
    /// The `XPOS` column.
    pub xpos: &'a str,
    /// The `FEATS` column.
    pub feats: &'a str,
    /// The `HEAD` column.
    pub head: &'a str,
    /// The `DEPREL` column.
    pub deprel: &'a str,
    /// The `DEPS` column.
    pub deps: &'a str,
    /// The `MISC` column.
    pub misc: &'a str,
}

impl<'a> Record<'a> {
    /// The record of the virtual root node `0`.
    pub const ROOT: Record<'static> = Record {
        id: "0",
        form: "_",
        lemma: "_",
        upos: "_",
        xpos: "_",
        feats: "_",
        head: "_",
        deprel: "_",
        deps: "_",
        misc: "_",
    };

    /// Gets the text of a column.
    pub fn get(&self, column: Column) -> &'a str {
        match column {
            Column::Id => self.id,
            Column::Form => self.form,
            Column::Lemma => self.lemma,
            Column::Upos => self.upos,
            Column::Xpos => self.xpos,
            Column::Feats => self.feats,
            Column::Head => self.head,
            Column::Deprel => self.deprel,
            Column::Deps => self.deps,
            Column::Misc => self.misc,
        }
    }

    /// Iterates the `|`-separated entries of the `FEATS` column.
    pub fn features(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.feats.split('|')
    }

    /// Iterates the `|`-separated entries of the `MISC` column.
    pub fn misc_attributes(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.misc.split('|')
    }

    /// Determines if the `FEATS` column contains the exact `Attribute=Value`
    /// entry.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features().any(|f| f == feature)
    }

    /// Determines if the `MISC` column contains the exact entry.
    pub fn has_misc(&self, entry: &str) -> bool {
        self.misc_attributes().any(|m| m == entry)
    }

    /// Gets the universal part of the `DEPREL` column (the text before the
    /// first colon).
    pub fn universal_deprel(&self) -> &'a str {
        crate::universal_part(self.deprel)
    }
}

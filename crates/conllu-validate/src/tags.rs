//! Definition of diagnostic categories.

use std::fmt;

/// The category of a diagnostic.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::EnumString,
    strum::VariantArray,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Category {
    /// Stream and row syntax.
    Format,

    /// Part-of-speech tags and morphological features.
    Morpho,

    /// Basic dependency relations and the basic tree.
    Syntax,

    /// Enhanced dependency relations and the enhanced graph.
    Enhanced,

    /// Sentence-level comment attributes.
    Metadata,

    /// Unicode normalization.
    Unicode,
}

impl Category {
    /// Gets the name of the category.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Format => "Format",
            Self::Morpho => "Morpho",
            Self::Syntax => "Syntax",
            Self::Enhanced => "Enhanced",
            Self::Metadata => "Metadata",
            Self::Unicode => "Unicode",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A set of diagnostic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategorySet(u32);

impl CategorySet {
    /// Constructs a category set from a slice of categories.
    ///
    /// # Panics
    ///
    /// This method will panic if the provided slice is empty.
    pub const fn new(categories: &[Category]) -> Self {
        if categories.is_empty() {
            panic!("a category set must be non-empty");
        }

        let mut bits = 0u32;
        let mut i = 0;
        while i < categories.len() {
            bits |= Self::mask(categories[i]);
            i += 1;
        }
        Self(bits)
    }

    /// Unions two category sets together.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Checks if the category is contained in the set.
    pub const fn contains(&self, category: Category) -> bool {
        self.0 & Self::mask(category) != 0
    }

    /// Gets the count of categories in the set.
    pub const fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Masks the given category to a `u32`.
    const fn mask(category: Category) -> u32 {
        1u32 << (category as u8)
    }

    /// Iterates the categories in the set.
    pub fn iter(&self) -> impl Iterator<Item = Category> + use<> {
        let bits = self.0;
        <Category as strum::VariantArray>::VARIANTS
            .iter()
            .copied()
            .filter(move |c| bits & Self::mask(*c) != 0)
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories = self.iter().collect::<Vec<_>>();
        write!(f, "{:?}", categories)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn category_sets() {
        let set = CategorySet::new(&[Category::Syntax, Category::Format]);
        assert!(set.contains(Category::Format));
        assert!(!set.contains(Category::Morpho));
        assert_eq!(set.count(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [Category::Format, Category::Syntax]
        );
        assert_eq!(set.to_string(), "[Format, Syntax]");

        let set = set.union(CategorySet::new(&[Category::Unicode]));
        assert_eq!(set.count(), 3);
    }

    #[test]
    fn parses_category_names() {
        assert_eq!(Category::from_str("enhanced"), Ok(Category::Enhanced));
        assert!(Category::from_str("lexicon").is_err());
    }
}

// Lexical categories for generated word lists.

/// Lexical category of a generated word.
///
/// Variants are declared in ascending priority so the derived `Ord` gives
/// the fixed resolution order `Profanity > Acronym > ProperNoun > Common`:
/// a word produced under several categories is emitted only under the
/// `max` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Lowercase stems: everyday vocabulary.
    Common,
    /// Title-case or otherwise mixed-case stems: "Aaron", "McDonald".
    ProperNoun,
    /// All-caps stems: "NASA", "DNA".
    Acronym,
    /// Words derived from NOSUGGEST-flagged stems.
    Profanity,
}

impl Category {
    /// All categories in output-file order.
    pub const ALL: [Category; 4] = [
        Category::Common,
        Category::ProperNoun,
        Category::Acronym,
        Category::Profanity,
    ];

    /// File-name slug for this category's word list.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Common => "common",
            Category::ProperNoun => "proper_nouns",
            Category::Acronym => "acronyms",
            Category::Profanity => "profanity",
        }
    }

    /// Human-readable label used in CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Category::Common => "common words",
            Category::ProperNoun => "proper nouns",
            Category::Acronym => "acronyms",
            Category::Profanity => "profanity",
        }
    }
}

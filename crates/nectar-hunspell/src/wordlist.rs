// Classification and aggregation of expanded forms into word lists.
//
// Classification is two-phase. Phase one folds every (form, origin)
// occurrence into a map from lowercased word to the best category seen so
// far; a word's final category depends on *all* of its origins, so
// nothing is emitted while stems are still being expanded. Phase two
// filters, resolves and sorts into the four final lists.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use nectar_core::case::CaseClass;
use nectar_core::category::Category;

/// Derive the tentative category of one occurrence of a form.
///
/// Restriction wins over casing; otherwise the stem's case class decides.
pub fn tentative_category(restricted: bool, origin: CaseClass) -> Category {
    if restricted {
        return Category::Profanity;
    }
    match origin {
        CaseClass::AllUpper => Category::Acronym,
        CaseClass::Mixed => Category::ProperNoun,
        CaseClass::AllLower => Category::Common,
    }
}

/// Accumulates (form, category) occurrences across all stems.
#[derive(Debug, Default)]
pub struct WordListBuilder {
    best: HashMap<String, Category>,
}

impl WordListBuilder {
    pub fn new() -> Self {
        WordListBuilder::default()
    }

    /// Record one occurrence of `text`. The lowercased text is the dedup
    /// and output key; a category only sticks if it outranks the best one
    /// recorded so far.
    pub fn add(&mut self, text: &str, category: Category) {
        let slot = self.best.entry(text.to_lowercase()).or_insert(category);
        if category > *slot {
            *slot = category;
        }
    }

    /// Resolve categories and produce the final sorted lists.
    ///
    /// Words of length <= 1 and words containing non-letter characters
    /// are dropped here, after priority resolution, not during expansion,
    /// so intermediate forms stay visible to earlier stages.
    pub fn finish(self) -> WordLists {
        let mut lists = WordLists::default();
        for (word, category) in self.best {
            if word.chars().count() <= 1 {
                continue;
            }
            if !word.chars().all(char::is_alphabetic) {
                continue;
            }
            lists.get_mut(category).push(word);
        }
        for category in Category::ALL {
            sort_words(lists.get_mut(category));
        }
        lists
    }
}

/// Case-insensitive ascending order, code-point order as the
/// deterministic tie-break.
fn sort_words(words: &mut [String]) {
    words.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

/// The four final word lists, one per category, sorted and distinct.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WordLists {
    pub common: Vec<String>,
    pub proper_nouns: Vec<String>,
    pub acronyms: Vec<String>,
    pub profanity: Vec<String>,
}

impl WordLists {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Common => &self.common,
            Category::ProperNoun => &self.proper_nouns,
            Category::Acronym => &self.acronyms,
            Category::Profanity => &self.profanity,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Common => &mut self.common,
            Category::ProperNoun => &mut self.proper_nouns,
            Category::Acronym => &mut self.acronyms,
            Category::Profanity => &mut self.profanity,
        }
    }

    /// Render one category as file contents, one word per line.
    pub fn render(&self, category: Category) -> String {
        let words = self.get(category);
        let mut out = String::with_capacity(words.iter().map(|w| w.len() + 1).sum());
        for word in words {
            out.push_str(word);
            out.push('\n');
        }
        out
    }

    /// Path of one category's output file for dictionary `name` in `dir`.
    pub fn path_for(dir: &Path, name: &str, category: Category) -> PathBuf {
        dir.join(format!("{name}_{}.txt", category.slug()))
    }

    /// Write the four word-list files for dictionary `name` into `dir`,
    /// returning the written paths in [`Category::ALL`] order.
    ///
    /// Callers run this only after conversion has fully succeeded, so a
    /// fatal parse error never leaves behind partially rewritten output.
    pub fn write_to(&self, dir: &Path, name: &str) -> io::Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let path = Self::path_for(dir, name, category);
            let mut out = BufWriter::new(File::create(&path)?);
            out.write_all(self.render(category).as_bytes())?;
            out.flush()?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Read a word-list file back, one word per non-blank line.
///
/// This is the read side handed to downstream consumers (puzzle solvers):
/// an opaque ordered list for membership queries, with no normalization
/// beyond trimming.
pub fn load_wordlist(path: &Path) -> io::Result<Vec<String>> {
    let mut words = Vec::new();
    for line in BufReader::new(File::open(path)?).lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

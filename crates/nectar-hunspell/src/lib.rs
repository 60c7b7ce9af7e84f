//! Hunspell dictionary expansion engine.
//!
//! Converts a Hunspell-style dictionary (a `.dic` stem list plus a `.aff`
//! affix-rule file) into plain-text word lists partitioned by lexical
//! category. Only the directive subset needed for word expansion is
//! supported: `PFX`/`SFX` rule blocks plus the `NOSUGGEST` and
//! `ONLYINCOMPOUND` flag declarations. Every other directive is skipped
//! with a diagnostic rather than guessed at.
//!
//! # Architecture
//!
//! - [`aff`] -- Affix-rule file parsing (PFX/SFX blocks, special flags)
//! - [`dic`] -- Stem-list parsing
//! - [`condition`] -- Anchored condition-pattern matching
//! - [`expand`] -- Stem expansion (affix application, cross-product)
//! - [`wordlist`] -- Classification, aggregation, word-list file I/O
//!
//! The pipeline is a strict single pass: parse both files, expand every
//! stem, classify the accumulated forms, then write. A parse failure
//! aborts before anything is written, so a previous run's output files
//! are never clobbered by a half-converted dictionary.

pub mod aff;
pub mod condition;
pub mod dic;
pub mod expand;
pub mod wordlist;

use std::fmt;
use std::path::Path;

use hashbrown::HashSet;

use crate::aff::AffFile;
use crate::dic::DicFile;
use crate::wordlist::{WordListBuilder, WordLists, tentative_category};

/// Error type for dictionary parsing and conversion.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("malformed affix rule at line {line}: {text:?}")]
    MalformedAffixRule { line: usize, text: String },
    #[error("malformed stem entry at line {line}: {text:?}")]
    MalformedStemLine { line: usize, text: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A non-fatal condition noticed while parsing or expanding.
///
/// Recoverable conditions (unsupported directives, stem flags that
/// reference no rule group, count-hint mismatches) never abort the run;
/// they are collected here and surfaced by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line, when the condition is tied to one.
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn at(line: usize, message: String) -> Self {
        Diagnostic {
            line: Some(line),
            message,
        }
    }

    pub(crate) fn global(message: String) -> Self {
        Diagnostic {
            line: None,
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug)]
pub struct Conversion {
    /// The four category word lists, sorted and deduplicated.
    pub lists: WordLists,
    /// Warnings accumulated across parsing and expansion.
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert in-memory affix and stem-list file contents into word lists.
///
/// This is the whole pipeline: parse both inputs, expand every stem,
/// classify every surface form, resolve category collisions, sort.
pub fn convert(aff_text: &str, dic_text: &str) -> Result<Conversion, DictError> {
    let aff = aff::parse_aff(aff_text)?;
    let dic = dic::parse_dic(dic_text)?;

    let mut diagnostics = Vec::new();
    diagnostics.extend(aff.diagnostics.iter().cloned());
    diagnostics.extend(dic.diagnostics.iter().cloned());
    collect_unknown_flags(&aff, &dic, &mut diagnostics);

    let mut builder = WordListBuilder::new();
    for stem in &dic.stems {
        for form in expand::expand_stem(stem, &aff) {
            builder.add(&form.text, tentative_category(form.restricted, stem.case));
        }
    }

    Ok(Conversion {
        lists: builder.finish(),
        diagnostics,
    })
}

/// Convert the dictionary pair `<prefix>.aff` / `<prefix>.dic`.
///
/// Hunspell dictionaries are distributed as a file pair sharing a path
/// prefix; this appends the two extensions and reads both files.
pub fn convert_pair(prefix: &Path) -> Result<Conversion, DictError> {
    let aff_text = std::fs::read_to_string(prefix.with_extension("aff"))?;
    let dic_text = std::fs::read_to_string(prefix.with_extension("dic"))?;
    convert(&aff_text, &dic_text)
}

/// Report each distinct stem flag that names no affix group and is not one
/// of the special flags. Such flags are no-ops during expansion.
fn collect_unknown_flags(aff: &AffFile, dic: &DicFile, diagnostics: &mut Vec<Diagnostic>) {
    let mut reported: HashSet<char> = HashSet::new();
    for stem in &dic.stems {
        for &flag in &stem.flags {
            if aff.groups.contains_key(&flag)
                || Some(flag) == aff.nosuggest_flag
                || Some(flag) == aff.onlyincompound_flag
            {
                continue;
            }
            if reported.insert(flag) {
                diagnostics.push(Diagnostic::global(format!(
                    "stem flag '{flag}' references no affix rule group; treated as a no-op"
                )));
            }
        }
    }
}

// Stem expansion: affix application and cross-product combination.

use hashbrown::HashSet;

use crate::aff::{AffFile, AffixGroup, AffixKind};
use crate::dic::Stem;

/// One candidate output word produced from a stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceForm {
    /// Surface text, casing inherited from the stem.
    pub text: String,
    /// True when the producing stem is NOSUGGEST-flagged.
    pub restricted: bool,
}

/// Expand one stem into every surface form its flags license.
///
/// The bare stem is itself a candidate unless the stem carries the
/// ONLYINCOMPOUND flag; such stems never stand alone, but their affixed
/// forms are still produced per their own rules. Within one group every
/// matching rule fires (distinct suffix variants are independent, not
/// first-match-wins). A flag naming no known group is a no-op here; the
/// pipeline reports those separately.
///
/// Cross-product: when a suffix group and a prefix group on the same stem
/// both allow it, each prefix rule is additionally applied to every word
/// the suffix group produced, with the prefix condition re-evaluated
/// against that suffixed intermediate rather than the original stem.
///
/// Forms that collapse to identical text are emitted once. Single-character
/// forms are kept; length filtering belongs to classification, which keeps
/// this function purely about expansion semantics.
pub fn expand_stem(stem: &Stem, aff: &AffFile) -> Vec<SurfaceForm> {
    let restricted = stem.has_flag(aff.nosuggest_flag);
    let compound_only = stem.has_flag(aff.onlyincompound_flag);
    let stem_chars: Vec<char> = stem.text.chars().collect();

    let mut prefix_groups: Vec<&AffixGroup> = Vec::new();
    let mut suffix_groups: Vec<&AffixGroup> = Vec::new();
    for flag in &stem.flags {
        match aff.groups.get(flag) {
            Some(group) if group.kind == AffixKind::Prefix => prefix_groups.push(group),
            Some(group) => suffix_groups.push(group),
            None => {}
        }
    }

    let mut expansion = Expansion {
        seen: HashSet::new(),
        forms: Vec::new(),
        restricted,
    };

    if !compound_only {
        expansion.emit(stem.text.clone());
    }

    // Suffixes first, remembering cross-product eligible results.
    let mut crossable: Vec<String> = Vec::new();
    for group in &suffix_groups {
        for rule in &group.rules {
            if rule.applies_to(&stem_chars, AffixKind::Suffix) {
                let word = rule.apply(&stem_chars, AffixKind::Suffix);
                if group.cross_product {
                    crossable.push(word.clone());
                }
                expansion.emit(word);
            }
        }
    }

    for group in &prefix_groups {
        for rule in &group.rules {
            if rule.applies_to(&stem_chars, AffixKind::Prefix) {
                expansion.emit(rule.apply(&stem_chars, AffixKind::Prefix));
            }
        }
        if !group.cross_product {
            continue;
        }
        for suffixed in &crossable {
            let suffixed_chars: Vec<char> = suffixed.chars().collect();
            for rule in &group.rules {
                if rule.applies_to(&suffixed_chars, AffixKind::Prefix) {
                    expansion.emit(rule.apply(&suffixed_chars, AffixKind::Prefix));
                }
            }
        }
    }

    expansion.forms
}

/// Accumulator deduplicating forms within one stem's expansion.
struct Expansion {
    seen: HashSet<String>,
    forms: Vec<SurfaceForm>,
    restricted: bool,
}

impl Expansion {
    fn emit(&mut self, text: String) {
        if self.seen.insert(text.clone()) {
            self.forms.push(SurfaceForm {
                text,
                restricted: self.restricted,
            });
        }
    }
}

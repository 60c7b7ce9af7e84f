// Affix-rule file parsing.
//
// An affix file is line-oriented. A `PFX`/`SFX` header
// (`PFX flag Y|N count`) opens a rule block of exactly `count` rule lines
// (`PFX flag strip add condition`), whose kind and flag must match the
// header. `NOSUGGEST` and `ONLYINCOMPOUND` declare the special flags.
// Directives outside this subset (SET, TRY, REP, ...) are skipped with a
// diagnostic; a dropped *rule*, by contrast, would silently change the
// output word set, so anything wrong inside a PFX/SFX block is fatal.

use hashbrown::{HashMap, HashSet};

use crate::condition::Condition;
use crate::{DictError, Diagnostic};

/// Whether an affix group attaches at the start or the end of a stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

impl AffixKind {
    fn directive(self) -> &'static str {
        match self {
            AffixKind::Prefix => "PFX",
            AffixKind::Suffix => "SFX",
        }
    }
}

/// One transformation of an affix group: strip `strip` from the stem's
/// edge, then attach `add`, provided `condition` matches the unstripped
/// stem. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct AffixRule {
    /// Characters removed from the stem edge; empty when the file says `0`.
    pub strip: Vec<char>,
    /// Characters appended (suffix) or prepended (prefix) after stripping.
    pub add: String,
    /// Precondition on the unstripped stem edge.
    pub condition: Condition,
}

impl AffixRule {
    /// Whether this rule can fire on `word` when used as `kind`.
    ///
    /// Both checks run against the unstripped word: the condition spans
    /// the relevant edge, and the strip string must actually occur there
    /// (a condition that accepts a word the strip does not fit is treated
    /// as a non-match).
    pub fn applies_to(&self, word: &[char], kind: AffixKind) -> bool {
        match kind {
            AffixKind::Suffix => {
                self.condition.matches_end(word) && word.ends_with(&self.strip)
            }
            AffixKind::Prefix => {
                self.condition.matches_start(word) && word.starts_with(&self.strip)
            }
        }
    }

    /// Produce the transformed word. Callers must have checked
    /// [`AffixRule::applies_to`] first.
    pub fn apply(&self, word: &[char], kind: AffixKind) -> String {
        match kind {
            AffixKind::Suffix => {
                let keep = &word[..word.len() - self.strip.len()];
                let mut out = String::with_capacity(keep.len() + self.add.len());
                out.extend(keep.iter());
                out.push_str(&self.add);
                out
            }
            AffixKind::Prefix => {
                let keep = &word[self.strip.len()..];
                let mut out = String::with_capacity(self.add.len() + keep.len());
                out.push_str(&self.add);
                out.extend(keep.iter());
                out
            }
        }
    }
}

/// A group of affix rules sharing one flag, ordered as in the file.
#[derive(Debug, Clone)]
pub struct AffixGroup {
    pub kind: AffixKind,
    pub flag: char,
    /// Whether rules of this group may combine with a cross-product
    /// eligible group of the opposite kind on the same stem.
    pub cross_product: bool,
    pub rules: Vec<AffixRule>,
}

/// All parsed data from an affix file.
#[derive(Debug, Default)]
pub struct AffFile {
    /// Rule groups keyed by the flag stems use to reference them.
    pub groups: HashMap<char, AffixGroup>,
    /// Flag marking stems whose words are restricted (profanity).
    pub nosuggest_flag: Option<char>,
    /// Flag marking stems that never stand alone as words.
    pub onlyincompound_flag: Option<char>,
    /// Warnings for skipped directives.
    pub diagnostics: Vec<Diagnostic>,
}

/// A PFX/SFX block whose rule lines are still being collected.
struct OpenBlock {
    group: AffixGroup,
    remaining: usize,
    header_line: usize,
    header_text: String,
}

/// Parse the contents of an affix file.
pub fn parse_aff(text: &str) -> Result<AffFile, DictError> {
    let mut aff = AffFile::default();
    let mut open: Option<OpenBlock> = None;
    let mut skipped: HashSet<String> = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        if let Some(mut block) = open.take() {
            // Every line inside an open block must be a rule line for the
            // header's kind and flag.
            let rule = parse_rule_line(&parts, &block.group, line_no, raw)?;
            block.group.rules.push(rule);
            block.remaining -= 1;
            if block.remaining == 0 {
                aff.groups.insert(block.group.flag, block.group);
            } else {
                open = Some(block);
            }
            continue;
        }

        match parts[0] {
            "PFX" | "SFX" => {
                let block = parse_header_line(&parts, line_no, raw, &aff.groups)?;
                if block.remaining == 0 {
                    aff.groups.insert(block.group.flag, block.group);
                } else {
                    open = Some(block);
                }
            }
            "NOSUGGEST" => {
                aff.nosuggest_flag = parse_flag_option(&parts, line_no, raw, &mut aff.diagnostics);
            }
            "ONLYINCOMPOUND" => {
                aff.onlyincompound_flag =
                    parse_flag_option(&parts, line_no, raw, &mut aff.diagnostics);
            }
            directive => {
                // Outside the supported subset. Warn once per directive
                // name; REP-style blocks would otherwise flood stderr.
                if skipped.insert(directive.to_string()) {
                    aff.diagnostics.push(Diagnostic::at(
                        line_no,
                        format!("unsupported directive {directive:?}; ignored"),
                    ));
                }
            }
        }
    }

    if let Some(block) = open {
        // Header promised more rule lines than the file contains.
        return Err(DictError::MalformedAffixRule {
            line: block.header_line,
            text: block.header_text,
        });
    }

    Ok(aff)
}

fn malformed(line: usize, raw: &str) -> DictError {
    DictError::MalformedAffixRule {
        line,
        text: raw.trim().to_string(),
    }
}

/// Parse `PFX flag Y|N count` into an open block.
fn parse_header_line(
    parts: &[&str],
    line_no: usize,
    raw: &str,
    groups: &HashMap<char, AffixGroup>,
) -> Result<OpenBlock, DictError> {
    if parts.len() < 4 {
        return Err(malformed(line_no, raw));
    }
    let kind = match parts[0] {
        "PFX" => AffixKind::Prefix,
        _ => AffixKind::Suffix,
    };
    let flag = single_char(parts[1]).ok_or_else(|| malformed(line_no, raw))?;
    let cross_product = match parts[2] {
        "Y" => true,
        "N" => false,
        _ => return Err(malformed(line_no, raw)),
    };
    let remaining: usize = parts[3].parse().map_err(|_| malformed(line_no, raw))?;
    if groups.contains_key(&flag) {
        // Two blocks for one flag would make rule order ambiguous.
        return Err(malformed(line_no, raw));
    }
    Ok(OpenBlock {
        group: AffixGroup {
            kind,
            flag,
            cross_product,
            rules: Vec::with_capacity(remaining),
        },
        remaining,
        header_line: line_no,
        header_text: raw.trim().to_string(),
    })
}

/// Parse `PFX flag strip add condition` against the open block's header.
/// Trailing morphological fields, if any, are ignored.
fn parse_rule_line(
    parts: &[&str],
    group: &AffixGroup,
    line_no: usize,
    raw: &str,
) -> Result<AffixRule, DictError> {
    if parts.len() < 5 || parts[0] != group.kind.directive() {
        return Err(malformed(line_no, raw));
    }
    match single_char(parts[1]) {
        Some(flag) if flag == group.flag => {}
        _ => return Err(malformed(line_no, raw)),
    }
    let strip = match parts[2] {
        "0" => Vec::new(),
        s => s.chars().collect(),
    };
    let add = match parts[3] {
        "0" => String::new(),
        s => s.to_string(),
    };
    let condition = Condition::parse(parts[4]).ok_or_else(|| malformed(line_no, raw))?;
    Ok(AffixRule {
        strip,
        add,
        condition,
    })
}

/// Parse the flag argument of `NOSUGGEST f` / `ONLYINCOMPOUND f`.
///
/// Only single-character flags are in the supported subset; anything else
/// is skipped with a diagnostic rather than misread.
fn parse_flag_option(
    parts: &[&str],
    line_no: usize,
    raw: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<char> {
    let flag = parts.get(1).copied().and_then(single_char);
    if flag.is_none() {
        diagnostics.push(Diagnostic::at(
            line_no,
            format!("unsupported flag declaration {:?}; ignored", raw.trim()),
        ));
    }
    flag
}

fn single_char(s: &str) -> Option<char> {
    let mut it = s.chars();
    match (it.next(), it.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // -- whole-file parsing --

    #[test]
    fn parse_prefix_and_suffix_blocks() {
        let aff = parse_aff(
            "PFX U Y 1\n\
             PFX U 0 un .\n\
             \n\
             SFX S Y 2\n\
             SFX S 0 es [sxzh]\n\
             SFX S 0 s [^sxzhy]\n",
        )
        .unwrap();

        assert_eq!(aff.groups.len(), 2);
        let u = &aff.groups[&'U'];
        assert_eq!(u.kind, AffixKind::Prefix);
        assert!(u.cross_product);
        assert_eq!(u.rules.len(), 1);
        assert_eq!(u.rules[0].add, "un");
        assert!(u.rules[0].strip.is_empty());

        let s = &aff.groups[&'S'];
        assert_eq!(s.kind, AffixKind::Suffix);
        assert_eq!(s.rules.len(), 2);
        assert_eq!(s.rules[1].add, "s");
    }

    #[test]
    fn parse_special_flags() {
        let aff = parse_aff("NOSUGGEST !\nONLYINCOMPOUND c\n").unwrap();
        assert_eq!(aff.nosuggest_flag, Some('!'));
        assert_eq!(aff.onlyincompound_flag, Some('c'));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let aff = parse_aff("# header comment\n\nSFX Z N 1\nSFX Z 0 ed .\n").unwrap();
        assert_eq!(aff.groups.len(), 1);
        assert!(!aff.groups[&'Z'].cross_product);
        assert!(aff.diagnostics.is_empty());
    }

    #[test]
    fn unsupported_directives_warn_once_each() {
        let aff = parse_aff("SET UTF-8\nREP 2\nREP a b\nREP c d\nTRY abc\n").unwrap();
        assert!(aff.groups.is_empty());
        let names: Vec<&str> = aff
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(names.len(), 3); // SET, REP, TRY
        assert!(names[1].contains("REP"));
    }

    #[test]
    fn zero_count_header_closes_immediately() {
        let aff = parse_aff("SFX E Y 0\nNOSUGGEST !\n").unwrap();
        assert!(aff.groups[&'E'].rules.is_empty());
        assert_eq!(aff.nosuggest_flag, Some('!'));
    }

    // -- malformed input --

    #[test]
    fn truncated_block_is_fatal() {
        let err = parse_aff("SFX S Y 3\nSFX S 0 s .\n").unwrap_err();
        match err {
            DictError::MalformedAffixRule { line, text } => {
                assert_eq!(line, 1);
                assert_eq!(text, "SFX S Y 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rule_line_flag_mismatch_is_fatal() {
        let err = parse_aff("SFX S Y 1\nSFX T 0 s .\n").unwrap_err();
        match err {
            DictError::MalformedAffixRule { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rule_line_kind_mismatch_is_fatal() {
        assert!(parse_aff("SFX S Y 1\nPFX S 0 s .\n").is_err());
    }

    #[test]
    fn directive_inside_open_block_is_fatal() {
        // The header promised two rule lines; NOSUGGEST arrives instead.
        assert!(parse_aff("SFX S Y 2\nSFX S 0 s .\nNOSUGGEST !\n").is_err());
    }

    #[test]
    fn bad_cross_product_literal_is_fatal() {
        assert!(parse_aff("SFX S X 1\nSFX S 0 s .\n").is_err());
    }

    #[test]
    fn non_numeric_count_is_fatal() {
        assert!(parse_aff("SFX S Y many\n").is_err());
    }

    #[test]
    fn rule_line_without_header_is_fatal() {
        assert!(parse_aff("SFX S 0 s .\n").is_err());
    }

    #[test]
    fn duplicate_flag_block_is_fatal() {
        assert!(parse_aff("SFX S Y 1\nSFX S 0 s .\nSFX S Y 1\nSFX S 0 es .\n").is_err());
    }

    #[test]
    fn unterminated_condition_class_is_fatal() {
        let err = parse_aff("SFX S Y 1\nSFX S 0 s [aeiou\n").unwrap_err();
        match err {
            DictError::MalformedAffixRule { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn multichar_flag_is_outside_subset() {
        assert!(parse_aff("SFX St Y 1\nSFX St 0 s .\n").is_err());
        let aff = parse_aff("NOSUGGEST ab\n").unwrap();
        assert_eq!(aff.nosuggest_flag, None);
        assert_eq!(aff.diagnostics.len(), 1);
    }

    // -- rule application --

    #[test]
    fn suffix_strip_and_add() {
        let rule = AffixRule {
            strip: chars("y"),
            add: "ies".to_string(),
            condition: Condition::parse("[^aeiou]y").unwrap(),
        };
        let word = chars("pony");
        assert!(rule.applies_to(&word, AffixKind::Suffix));
        assert_eq!(rule.apply(&word, AffixKind::Suffix), "ponies");
    }

    #[test]
    fn strip_must_occur_at_edge() {
        // Condition alone accepts the word, but the strip text is absent.
        let rule = AffixRule {
            strip: chars("e"),
            add: "ing".to_string(),
            condition: Condition::parse(".").unwrap(),
        };
        assert!(rule.applies_to(&chars("make"), AffixKind::Suffix));
        assert!(!rule.applies_to(&chars("load"), AffixKind::Suffix));
    }

    #[test]
    fn prefix_apply_prepends() {
        let rule = AffixRule {
            strip: Vec::new(),
            add: "un".to_string(),
            condition: Condition::parse(".").unwrap(),
        };
        let word = chars("load");
        assert!(rule.applies_to(&word, AffixKind::Prefix));
        assert_eq!(rule.apply(&word, AffixKind::Prefix), "unload");
    }

    #[test]
    fn prefix_strip_removes_leading_edge() {
        let rule = AffixRule {
            strip: chars("un"),
            add: "re".to_string(),
            condition: Condition::parse("un").unwrap(),
        };
        let word = chars("unload");
        assert!(rule.applies_to(&word, AffixKind::Prefix));
        assert_eq!(rule.apply(&word, AffixKind::Prefix), "reload");
        assert!(!rule.applies_to(&chars("load"), AffixKind::Prefix));
    }
}

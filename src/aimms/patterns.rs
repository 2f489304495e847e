//! Pattern Table
//!
//! This module defines the ordered rules the scanner tries at each position.
//! Rules are tried in declaration order and the first one that matches a non-empty
//! prefix wins, so order encodes precedence:
//!
//! 1. newlines and whitespace
//! 2. comments (`! ...` and `/* ... */`)
//! 3. declaration attributes (`Comment:` bodies, `Definition:` labels, argument lists)
//! 4. reserved keywords, predeclared identifiers
//! 5. string literals, punctuation
//! 6. intrinsic functions, operators
//! 7. naming-convention prefixes (`P_`, `EP_`, `S_`, ...)
//! 8. the catch-all: a stray `#`, a word, or a single period
//!
//! The catch-all always matches at a word character or a period; anything else is
//! left to the scanner's single-character fallback.
//!
//! Every regex is compiled once, anchored with `^`, and matched against the text
//! remaining after the cursor. Scan positions are never inside a word, so a leading
//! `\b` behaves the same on the remaining text as it would on the whole text.

use crate::aimms::token::{Category, IdentifierKind};
use crate::aimms::vocabulary::{
    Vocabulary, INTRINSIC_FUNCTIONS, PREDECLARED_IDENTIFIERS, RESERVED_KEYWORDS,
};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Compiled size limit; the intrinsic function alternation alone has several
/// hundred case-insensitive entries.
const REGEX_SIZE_LIMIT: usize = 64 * (1 << 20);

/// What a rule emits for its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// One token spanning the whole match.
    Token(Category),
    /// One token per capture group, in group order. Empty groups emit nothing.
    /// The groups of a rule are contiguous and cover the whole match.
    ByGroups(&'static [Category]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordList {
    ReservedKeywords,
    PredeclaredIdentifiers,
    IntrinsicFunctions,
}

impl WordList {
    fn vocabulary(self) -> &'static Vocabulary {
        match self {
            WordList::ReservedKeywords => &RESERVED_KEYWORDS,
            WordList::PredeclaredIdentifiers => &PREDECLARED_IDENTIFIERS,
            WordList::IntrinsicFunctions => &INTRINSIC_FUNCTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Regex(&'static str),
    /// Case-insensitive whole-word match against a vocabulary.
    Words {
        list: WordList,
        leading_boundary: bool,
    },
}

impl Pattern {
    fn source(self) -> String {
        match self {
            Pattern::Regex(source) => source.to_string(),
            Pattern::Words {
                list,
                leading_boundary,
            } => {
                let prefix = if leading_boundary { r"\b" } else { "" };
                format!(r"{}(?i:{})\b", prefix, list.vocabulary().alternation())
            }
        }
    }
}

const fn id(kind: IdentifierKind) -> Category {
    Category::Identifier(kind)
}

/// Rules as (rule_name, pattern, action), in matching order.
const RULES: &[(&str, Pattern, Action)] = &[
    ("newline", Pattern::Regex(r"\n"), Action::Token(Category::PlainText)),
    ("whitespace", Pattern::Regex(r"\s+"), Action::Token(Category::Whitespace)),
    ("comment_line", Pattern::Regex(r"!.*?\n"), Action::Token(Category::CommentLine)),
    (
        "comment_block",
        Pattern::Regex(r"/\*(?s:.)*?\*/"),
        Action::Token(Category::CommentBlock),
    ),
    // Comment attribute of a declaration: the body is a comment whatever it contains,
    // `Comment: "..." ;` as well as `Comment: { ... }`.
    (
        "comment_attribute",
        Pattern::Regex(r"(Comment:\s+\{?)((?s:.)+?)([};])"),
        Action::ByGroups(&[
            Category::AttributeName,
            Category::AttributeComment,
            Category::AttributeName,
        ]),
    ),
    (
        "attribute",
        Pattern::Regex(r"(\w+)(:)(\s+)"),
        Action::ByGroups(&[
            Category::AttributeName,
            Category::Operator,
            Category::Whitespace,
        ]),
    ),
    (
        "argument",
        Pattern::Regex(r"(\b\w+)(\s+:\s+\b|\s+:\s+\B)"),
        Action::ByGroups(&[Category::ArgumentName, Category::PlainText]),
    ),
    (
        "reserved_keyword",
        Pattern::Words {
            list: WordList::ReservedKeywords,
            leading_boundary: false,
        },
        Action::Token(Category::ReservedKeyword),
    ),
    (
        "predeclared_identifier",
        Pattern::Words {
            list: WordList::PredeclaredIdentifiers,
            leading_boundary: true,
        },
        Action::Token(Category::BuiltinName),
    ),
    ("string_double", Pattern::Regex(r#"".*?""#), Action::Token(Category::StringLiteral)),
    ("string_single", Pattern::Regex(r"'.*?'"), Action::Token(Category::StringLiteral)),
    (
        "punctuation",
        Pattern::Regex(r"[()\[\]{},;:]+"),
        Action::Token(Category::Punctuation),
    ),
    (
        "intrinsic_function",
        Pattern::Words {
            list: WordList::IntrinsicFunctions,
            leading_boundary: true,
        },
        Action::Token(Category::BuiltinName),
    ),
    // Alternatives are tried left to right: `**` lexes as two `*`, `==` as two `=`.
    (
        "operator",
        Pattern::Regex(r"\+|-|\*|/|\*\*|=|<=|>=|==|\||\^|<|>|!|\.\.|:=|&|!=|<<|>>|;"),
        Action::Token(Category::Operator),
    ),
    ("prefix_p", Pattern::Regex(r"(?i)\bP_\w+\b"), Action::Token(id(IdentifierKind::Parameter))),
    ("prefix_p01", Pattern::Regex(r"(?i)\bP01_\w+\b"), Action::Token(id(IdentifierKind::Parameter))),
    (
        "prefix_ep",
        Pattern::Regex(r"(?i)\bEP_\w+\b"),
        Action::Token(id(IdentifierKind::ElementParameter)),
    ),
    ("prefix_s", Pattern::Regex(r"(?i)\bS_\w+\b"), Action::Token(id(IdentifierKind::Set))),
    ("prefix_cal", Pattern::Regex(r"(?i)\bCal_\w+\b"), Action::Token(id(IdentifierKind::Set))),
    (
        "prefix_sp",
        Pattern::Regex(r"(?i)\bSP_\w+\b"),
        Action::Token(id(IdentifierKind::StringParameter)),
    ),
    ("prefix_v", Pattern::Regex(r"(?i)\bV_\w+\b"), Action::Token(id(IdentifierKind::Variable))),
    ("prefix_v01", Pattern::Regex(r"(?i)\bV01_\w+\b"), Action::Token(id(IdentifierKind::Variable))),
    ("prefix_ev", Pattern::Regex(r"(?i)\bEV_\w+\b"), Action::Token(id(IdentifierKind::Variable))),
    ("prefix_c", Pattern::Regex(r"(?i)\bC_\w+\b"), Action::Token(id(IdentifierKind::Constraint))),
    (
        "prefix_mp",
        Pattern::Regex(r"(?i)\bMP_\w+\b"),
        Action::Token(id(IdentifierKind::MathematicalProgram)),
    ),
    (
        "prefix_dbt",
        Pattern::Regex(r"(?i)\bDBT_\w+\b"),
        Action::Token(id(IdentifierKind::DatabaseTable)),
    ),
    ("prefix_pr", Pattern::Regex(r"(?i)\bPR_\w+\b"), Action::Token(id(IdentifierKind::Variable))),
    ("prefix_cnv", Pattern::Regex(r"(?i)\bCNV_\w+\b"), Action::Token(id(IdentifierKind::Convention))),
    ("prefix_i", Pattern::Regex(r"(?i)\bI_\w+\b"), Action::Token(id(IdentifierKind::Index))),
    ("stray_hash", Pattern::Regex(r"#"), Action::Token(Category::PlainText)),
    // `..` never reaches this rule, the operator rule takes it first.
    ("catch_all", Pattern::Regex(r"\w+|\."), Action::Token(Category::PlainText)),
];

/// The compiled, process-wide pattern table.
pub static PATTERN_TABLE: Lazy<PatternTable> = Lazy::new(PatternTable::compile);

#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    regex: Regex,
    action: Action,
}

/// A successful rule match at the cursor, with spans relative to the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: &'static str,
    /// Number of bytes consumed.
    pub len: usize,
    pub parts: Vec<(Range<usize>, Category)>,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Match this rule against the start of `rest`. Empty matches do not count.
    pub fn match_start(&self, rest: &str) -> Option<RuleMatch> {
        match self.action {
            Action::Token(category) => {
                let m = self.regex.find(rest).filter(|m| !m.is_empty())?;
                Some(RuleMatch {
                    rule: self.name,
                    len: m.end(),
                    parts: vec![(0..m.end(), category)],
                })
            }
            Action::ByGroups(categories) => {
                let caps = self.regex.captures(rest)?;
                let whole = caps.get(0).filter(|m| !m.is_empty())?;
                let parts = categories
                    .iter()
                    .enumerate()
                    .filter_map(|(i, category)| {
                        caps.get(i + 1)
                            .filter(|g| !g.is_empty())
                            .map(|g| (g.range(), *category))
                    })
                    .collect();
                Some(RuleMatch {
                    rule: self.name,
                    len: whole.end(),
                    parts,
                })
            }
        }
    }
}

#[derive(Debug)]
pub struct PatternTable {
    rules: Vec<Rule>,
}

impl PatternTable {
    fn compile() -> Self {
        let rules: Vec<Rule> = RULES
            .iter()
            .map(|(name, pattern, action)| {
                let source = format!("^(?:{})", pattern.source());
                let regex = RegexBuilder::new(&source)
                    .size_limit(REGEX_SIZE_LIMIT)
                    .build()
                    .unwrap_or_else(|e| panic!("pattern rule '{}' does not compile: {}", name, e));
                Rule {
                    name: *name,
                    regex,
                    action: *action,
                }
            })
            .collect();
        log::debug!("compiled AIMMS pattern table ({} rules)", rules.len());
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Try the rules in order against the start of `rest`; the first match wins.
    pub fn match_start(&self, rest: &str) -> Option<RuleMatch> {
        self.rules.iter().find_map(|rule| rule.match_start(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(rest: &str) -> RuleMatch {
        PATTERN_TABLE.match_start(rest).expect("a rule to match")
    }

    #[test]
    fn all_rules_compile() {
        assert_eq!(PATTERN_TABLE.rules().len(), RULES.len());
        assert_eq!(PATTERN_TABLE.rules().last().unwrap().name(), "catch_all");
    }

    #[test]
    fn first_rule_in_order_wins() {
        // `sum` is both a word and a reserved keyword; the keyword rule comes first.
        assert_eq!(first("sum(i, x)").rule, "reserved_keyword");
        // `P_sum` is not a keyword (whole word), so the prefix rule takes it.
        assert_eq!(first("P_sum + 1").rule, "prefix_p");
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        let m = first("summary");
        assert_eq!(m.rule, "catch_all");
        assert_eq!(m.len, "summary".len());
    }

    #[test]
    fn namespaced_intrinsics_match_whole() {
        let m = first("GMP::Column::Add(a)");
        assert_eq!(m.rule, "intrinsic_function");
        assert_eq!(m.len, "GMP::Column::Add".len());
    }

    #[test]
    fn attribute_splits_into_groups() {
        let m = first("Definition: x");
        assert_eq!(m.rule, "attribute");
        assert_eq!(
            m.parts,
            vec![
                (0..10, Category::AttributeName),
                (10..11, Category::Operator),
                (11..12, Category::Whitespace),
            ]
        );
    }

    #[test]
    fn comment_attribute_covers_its_terminator() {
        let m = first("Comment: \"about it\"}");
        assert_eq!(m.rule, "comment_attribute");
        assert_eq!(m.len, 20);
        assert_eq!(
            m.parts,
            vec![
                (0..9, Category::AttributeName),
                (9..19, Category::AttributeComment),
                (19..20, Category::AttributeName),
            ]
        );
    }

    #[test]
    fn operator_alternatives_are_tried_left_to_right() {
        assert_eq!(first("** 2").len, 1);
        assert_eq!(first("<= 2").len, 2);
        assert_eq!(first("..").len, 2);
    }

    #[test]
    fn unmatched_symbol_has_no_rule() {
        assert!(PATTERN_TABLE.match_start("$x").is_none());
        assert!(PATTERN_TABLE.match_start("").is_none());
    }
}

//! Versioned word lists.
//!
//!     The reserved keywords, predeclared identifiers and intrinsic functions of AIMMS
//!     live in `data/*.txt`, one entry per line. Lines starting with `#` are comments;
//!     a `# version: N` comment names the revision of the list. The files are embedded
//!     at build time, so a vocabulary update is a data change only.
//!
//!     Each list becomes a single case-insensitive whole-word regex in the pattern
//!     table, see [`Vocabulary::alternation`].

use once_cell::sync::Lazy;

const RESERVED_KEYWORDS_TXT: &str = include_str!("../../data/reserved_keywords.txt");
const PREDECLARED_IDENTIFIERS_TXT: &str = include_str!("../../data/predeclared_identifiers.txt");
const INTRINSIC_FUNCTIONS_TXT: &str = include_str!("../../data/intrinsic_functions.txt");

pub static RESERVED_KEYWORDS: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::parse("reserved_keywords", RESERVED_KEYWORDS_TXT));
pub static PREDECLARED_IDENTIFIERS: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::parse("predeclared_identifiers", PREDECLARED_IDENTIFIERS_TXT));
pub static INTRINSIC_FUNCTIONS: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::parse("intrinsic_functions", INTRINSIC_FUNCTIONS_TXT));

/// All vocabularies, in the order the pattern table uses them.
pub fn all() -> [&'static Vocabulary; 3] {
    [
        &RESERVED_KEYWORDS,
        &PREDECLARED_IDENTIFIERS,
        &INTRINSIC_FUNCTIONS,
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    name: &'static str,
    version: Option<String>,
    words: Vec<String>,
}

impl Vocabulary {
    /// Parse a word list. Duplicate entries (compared case-insensitively) are kept once.
    pub fn parse(name: &'static str, source: &str) -> Self {
        let mut version = None;
        let mut words: Vec<String> = Vec::new();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if let Some(value) = comment.trim().strip_prefix("version:") {
                    version = Some(value.trim().to_string());
                }
                continue;
            }
            if !words.iter().any(|w| w.eq_ignore_ascii_case(line)) {
                words.push(line.to_string());
            }
        }

        log::trace!(
            "parsed vocabulary {} ({} words, version {:?})",
            name,
            words.len(),
            version
        );
        Self {
            name,
            version,
            words,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.to_lowercase() == word.to_lowercase())
    }

    /// Regex alternation over all words, escaped, longest first.
    ///
    /// Longest first matters for entries that extend another entry past a word
    /// boundary (`GMP::Column` vs `GMP::Column::Add`): with a trailing `\b` both
    /// would match, and the longer one must win.
    pub fn alternation(&self) -> String {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_version_and_skips_comments() {
        let vocab = Vocabulary::parse("test", "# header\n# version: 7\n\nfoo\nBar\nfoo\nFOO\n");
        assert_eq!(vocab.version(), Some("7"));
        assert_eq!(vocab.words(), &["foo".to_string(), "Bar".to_string()]);
    }

    #[test]
    fn membership_ignores_case() {
        let vocab = Vocabulary::parse("test", "ElementRange\n");
        assert!(vocab.contains("elementrange"));
        assert!(vocab.contains("ELEMENTRANGE"));
        assert!(!vocab.contains("Element"));
    }

    #[test]
    fn alternation_puts_longer_words_first() {
        let vocab = Vocabulary::parse("test", "cp::Span\ncp::SpanX\nsum\n");
        assert_eq!(vocab.alternation(), r"cp::SpanX|cp::Span|sum");
    }

    #[test]
    fn embedded_lists_are_versioned() {
        for vocab in all() {
            assert!(!vocab.is_empty(), "{} is empty", vocab.name());
            assert_eq!(vocab.version(), Some("1"));
        }
        assert!(RESERVED_KEYWORDS.contains("parameter"));
        assert!(PREDECLARED_IDENTIFIERS.contains("AllSymbols"));
        assert!(INTRINSIC_FUNCTIONS.contains("Card"));
    }
}

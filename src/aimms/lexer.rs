//! Lexer
//!
//! [`AimmsLexer`] is the entry point for a documentation renderer: it carries the
//! registration metadata (name, aliases, file patterns) and the options that shape
//! how a whole document is prepared before it is tokenized.
//!
//! Preprocessing, in order:
//!
//! 1. drop a leading byte-order mark, turn `\r\n` and lone `\r` into `\n`;
//! 2. trim surrounding whitespace (`strip_all`) or surrounding newlines (`strip_newlines`);
//! 3. expand tabs to `tab_size` column stops, when `tab_size > 0`;
//! 4. append a final `\n` when `ensure_newline` is set and the text lacks one.
//!
//! Token offsets refer to the preprocessed text, so callers keep it around:
//!
//!     let lexer = AimmsLexer::new();
//!     let text = lexer.preprocess(source);
//!     for token in lexer.tokenize(&text) { ... }

use crate::aimms::resolver::{self, Tokens};
use crate::aimms::token::Token;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LexerOptions {
    pub strip_newlines: bool,
    pub strip_all: bool,
    pub ensure_newline: bool,
    pub tab_size: usize,
    pub resolve_declarations: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            strip_newlines: true,
            strip_all: false,
            ensure_newline: true,
            tab_size: 0,
            resolve_declarations: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AimmsLexer {
    options: LexerOptions,
}

impl AimmsLexer {
    pub const NAME: &'static str = "AIMMS";
    pub const ALIASES: &'static [&'static str] = &["aimms"];
    pub const FILENAMES: &'static [&'static str] = &["*.aimms", "*.ams"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LexerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Whether `name` is one of the lexer's aliases (case-insensitive).
    pub fn has_alias(name: &str) -> bool {
        Self::ALIASES.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Whether the file name matches one of [`Self::FILENAMES`].
    pub fn matches_filename(path: impl AsRef<Path>) -> bool {
        let Some(file_name) = path.as_ref().file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        Self::FILENAMES.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => file_name.len() > suffix.len() && file_name.ends_with(suffix),
            None => file_name == *pattern,
        })
    }

    /// Normalize a document according to the lexer options.
    pub fn preprocess<'a>(&self, source: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(source.strip_prefix('\u{feff}').unwrap_or(source));

        if text.contains('\r') {
            text = Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"));
        }

        if self.options.strip_all {
            text = trim_cow(text, |t| t.trim());
        } else if self.options.strip_newlines {
            text = trim_cow(text, |t| t.trim_matches('\n'));
        }

        if self.options.tab_size > 0 && text.contains('\t') {
            text = Cow::Owned(expand_tabs(&text, self.options.tab_size));
        }

        if self.options.ensure_newline && !text.ends_with('\n') {
            let mut owned = text.into_owned();
            owned.push('\n');
            text = Cow::Owned(owned);
        }

        if let Cow::Owned(_) = text {
            log::trace!("preprocessed {} bytes into {}", source.len(), text.len());
        }
        text
    }

    /// Tokenize an already preprocessed text.
    pub fn tokenize<'src>(&self, text: &'src str) -> Tokens<'src> {
        if self.options.resolve_declarations {
            resolver::tokenize(text)
        } else {
            Tokens::unresolved(text)
        }
    }

    /// Tokenize a text and collect the tokens.
    pub fn tokens<'src>(&self, text: &'src str) -> Vec<Token<'src>> {
        self.tokenize(text).collect()
    }
}

fn trim_cow<'a>(text: Cow<'a, str>, trim: impl Fn(&str) -> &str) -> Cow<'a, str> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(trim(s)),
        Cow::Owned(s) => Cow::Owned(trim(&s).to_string()),
    }
}

/// Replace each tab with spaces up to the next multiple of `tab_size`. Columns
/// restart after every newline.
fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let width = tab_size - column % tab_size;
                out.extend(std::iter::repeat(' ').take(width));
                column += width;
            }
            '\n' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aimms::token::Category;

    fn lexer(options: LexerOptions) -> AimmsLexer {
        AimmsLexer::with_options(options)
    }

    #[test]
    fn matches_registered_filenames() {
        assert!(AimmsLexer::matches_filename("MainProject/Transport.ams"));
        assert!(AimmsLexer::matches_filename("model.aimms"));
        assert!(!AimmsLexer::matches_filename("model.ams.bak"));
        assert!(!AimmsLexer::matches_filename(".ams"));
        assert!(AimmsLexer::has_alias("AIMMS"));
    }

    #[test]
    fn default_preprocessing() {
        let lexer = AimmsLexer::new();
        assert_eq!(lexer.preprocess("\n\nx := 1;"), "x := 1;\n");
        assert_eq!(lexer.preprocess("\u{feff}a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn untouched_text_is_borrowed() {
        let lexer = lexer(LexerOptions {
            ensure_newline: false,
            ..LexerOptions::default()
        });
        assert!(matches!(lexer.preprocess("x;\n"), Cow::Borrowed("x;")));
    }

    #[test]
    fn strip_all_trims_spaces() {
        let lexer = lexer(LexerOptions {
            strip_all: true,
            ..LexerOptions::default()
        });
        assert_eq!(lexer.preprocess("  \n x; \n "), "x;\n");
    }

    #[test]
    fn no_stripping_keeps_text() {
        let lexer = lexer(LexerOptions {
            strip_newlines: false,
            ensure_newline: false,
            ..LexerOptions::default()
        });
        assert_eq!(lexer.preprocess("\nx"), "\nx");
    }

    #[test]
    fn expands_tabs_to_column_stops() {
        assert_eq!(expand_tabs("a\tb\n\tc", 4), "a   b\n    c");
        assert_eq!(expand_tabs("abcd\te", 4), "abcd    e");
    }

    #[test]
    fn resolution_can_be_disabled() {
        let raw = lexer(LexerOptions {
            resolve_declarations: false,
            ..LexerOptions::default()
        });
        let tokens = raw.tokens("Parameter OD;\n");
        assert_eq!(tokens[2].text, "OD");
        assert_eq!(tokens[2].category, Category::PlainText);

        let tokens = AimmsLexer::new().tokens("Parameter OD;\n");
        assert!(tokens[2].category.is_identifier());
    }
}

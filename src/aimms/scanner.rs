//! Primary Scanner
//!
//! A single forward pass over the text: at the cursor, try the [pattern
//! table](crate::aimms::patterns) in order, emit the winning rule's token(s) and move
//! the cursor past the match. When no rule matches (a stray `$`, `@`, `` ` ``, ...)
//! the next character becomes a [`Category::PlainText`] token of its own.
//!
//! Every step consumes at least one character, so the scan terminates, and the
//! emitted tokens cover the text without gaps or overlaps.

use crate::aimms::patterns::{PatternTable, PATTERN_TABLE};
use crate::aimms::token::{Category, Token};
use std::collections::VecDeque;

/// Scan `text` into raw, unresolved tokens.
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner::new(text)
}

/// Lazy iterator over the raw tokens of one text.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    text: &'src str,
    table: &'static PatternTable,
    cursor: usize,
    pending: VecDeque<Token<'src>>,
}

impl<'src> Scanner<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            table: &PATTERN_TABLE,
            cursor: 0,
            pending: VecDeque::new(),
        }
    }

    /// Advance over one rule match (or one unmatched character), queueing its tokens.
    fn step(&mut self) {
        let text = self.text;
        let start = self.cursor;
        let rest = &text[start..];

        match self.table.match_start(rest) {
            Some(matched) => {
                for (span, category) in matched.parts {
                    self.pending.push_back(Token::new(
                        start + span.start,
                        category,
                        &rest[span],
                    ));
                }
                self.cursor += matched.len;
            }
            None => {
                let width = rest.chars().next().map_or(1, char::len_utf8);
                log::trace!("no rule at offset {}, emitting {:?}", start, &rest[..width]);
                self.pending
                    .push_back(Token::new(start, Category::PlainText, &rest[..width]));
                self.cursor += width;
            }
        }
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() {
            if self.cursor >= self.text.len() {
                return None;
            }
            self.step();
        }
        self.pending.pop_front()
    }
}

//! Category Resolver
//!
//! Post-processes scanner tokens with the declaration index of the same text. For
//! each token, in order:
//!
//! 1. the text is a declared name → the identifier category of its declaration,
//!    whatever the scanner said (a declared name wins over a reserved keyword);
//! 2. the token is not an argument name and the text is exactly the spelling of a
//!    keyword used by a declaration → [`Category::DeclaredIdentifierKeyword`];
//! 3. otherwise the token passes through unchanged.
//!
//! The scanner only sees local context, so this is what lets `OD` be highlighted as
//! a parameter everywhere once `Parameter OD;` appears anywhere in the text.

use crate::aimms::declarations::DeclarationIndex;
use crate::aimms::scanner::Scanner;
use crate::aimms::token::{Category, Token};

/// Tokenize a text: build its declaration index, scan it, resolve every token.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens::new(Scanner::new(text), DeclarationIndex::build(text))
}

/// Apply the resolution rules to one token.
pub fn resolve<'src>(token: Token<'src>, index: &DeclarationIndex) -> Token<'src> {
    if let Some(record) = index.get(token.text) {
        return token.with_category(record.category());
    }
    if token.category != Category::ArgumentName && index.is_keyword_spelling(token.text) {
        return token.with_category(Category::DeclaredIdentifierKeyword);
    }
    token
}

/// Lazy iterator over resolved tokens. Owns the declaration index of its text.
#[derive(Debug, Clone)]
pub struct Tokens<'src> {
    scanner: Scanner<'src>,
    index: DeclarationIndex,
}

impl<'src> Tokens<'src> {
    pub fn new(scanner: Scanner<'src>, index: DeclarationIndex) -> Self {
        Self { scanner, index }
    }

    /// Scanner output only; the empty index resolves nothing.
    pub fn unresolved(text: &'src str) -> Self {
        Self::new(Scanner::new(text), DeclarationIndex::default())
    }

    pub fn declarations(&self) -> &DeclarationIndex {
        &self.index
    }
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.scanner.next()?;
        Some(resolve(token, &self.index))
    }
}

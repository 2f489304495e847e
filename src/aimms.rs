//! Main module for the AIMMS lexer
//!
//! Tokenizing a text runs three stages:
//!
//! 1. [`declarations`] scans the full text once for declaration sites
//!    (`Parameter OD;`) and builds a name → keyword index.
//! 2. [`scanner`] walks the text left to right, trying the [`patterns`] table in
//!    order at each position and emitting `(offset, category, text)` triples.
//! 3. [`resolver`] re-categorizes each triple whose text is a declared name, or the
//!    spelling of a declaration keyword used in this text.
//!
//! The scanner output always covers the input: concatenating the token texts gives
//! back the tokenized text.

pub mod config;
pub mod declarations;
pub mod formats;
pub mod lexer;
pub mod loader;
pub mod patterns;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod vocabulary;

pub use declarations::{DeclarationIndex, DeclarationKeyword, DeclarationRecord};
pub use lexer::{AimmsLexer, LexerOptions};
pub use loader::{HighlightError, SourceLoader};
pub use resolver::{tokenize, Tokens};
pub use scanner::{scan, Scanner};
pub use token::{Category, IdentifierKind, Token, CATEGORIES};

//! # aimms-highlight
//!
//! A syntax highlighting lexer for the AIMMS modeling language.
//!
//! The lexer classifies every byte of an AIMMS source text into a [`Category`](aimms::token::Category)
//! that a documentation renderer can map to a display style. It is not a compiler front end:
//! there is no AST, no diagnostics and no recovery. Malformed input is always tokenized.
//!
//! File Layout
//!
//!     src/aimms
//!       ├── token          Categories and the token triple
//!       ├── vocabulary     Versioned word lists (data/*.txt)
//!       ├── patterns       The ordered pattern table
//!       ├── scanner        Single forward pass over the pattern table
//!       ├── declarations   Declaration index built from the whole text
//!       ├── resolver       Re-categorizes scanner output with the index
//!       ├── lexer          Registration metadata and text preprocessing
//!       ├── config         Layered configuration
//!       ├── formats        Token stream serializers
//!       └── loader         File/string loading shortcuts
//!
//! Quick start:
//!
//!     use aimms_highlight::aimms::tokenize;
//!
//!     for token in tokenize("Parameter OD;\nOD := 1;\n") {
//!         println!("{} {} {:?}", token.offset, token.category, token.text);
//!     }

#![allow(rustdoc::invalid_html_tags)]

pub mod aimms;

pub use aimms::{tokenize, AimmsLexer, Category, Token};

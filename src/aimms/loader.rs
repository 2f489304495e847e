//! Source loading utilities
//!
//! `SourceLoader` reads AIMMS source from a file or a string, preprocesses it with an
//! [`AimmsLexer`] and hands out tokens, the declaration index, or serialized output.
//! The CLI and the integration tests both go through it.
//!
//! # Example
//!
//! ```rust,ignore
//! use aimms_highlight::aimms::loader::SourceLoader;
//! use aimms_highlight::aimms::formats::OutputFormat;
//!
//! let loader = SourceLoader::from_path("Transport.ams").unwrap();
//! let json = loader.serialize(OutputFormat::TokenJson).unwrap();
//! ```

use crate::aimms::declarations::DeclarationIndex;
use crate::aimms::formats::{self, FormatError, OutputFormat};
use crate::aimms::lexer::AimmsLexer;
use crate::aimms::token::Token;
use std::fmt;
use std::fs;
use std::path::Path;

/// Error that can occur when loading or rendering a source
#[derive(Debug, Clone)]
pub enum HighlightError {
    /// IO error when reading file
    IoError(String),
    /// Configuration could not be loaded
    ConfigError(String),
    /// Output could not be produced
    FormatError(FormatError),
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::IoError(msg) => write!(f, "IO error: {}", msg),
            HighlightError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            HighlightError::FormatError(err) => write!(f, "Format error: {}", err),
        }
    }
}

impl std::error::Error for HighlightError {}

impl From<std::io::Error> for HighlightError {
    fn from(err: std::io::Error) -> Self {
        HighlightError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for HighlightError {
    fn from(err: config::ConfigError) -> Self {
        HighlightError::ConfigError(err.to_string())
    }
}

impl From<FormatError> for HighlightError {
    fn from(err: FormatError) -> Self {
        HighlightError::FormatError(err)
    }
}

/// Loaded, preprocessed source text with tokenizing shortcuts
#[derive(Debug, Clone)]
pub struct SourceLoader {
    lexer: AimmsLexer,
    text: String,
}

impl SourceLoader {
    /// Load source from a file, with default lexer options.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HighlightError> {
        Self::from_path_with(path, AimmsLexer::new())
    }

    pub fn from_path_with(path: impl AsRef<Path>, lexer: AimmsLexer) -> Result<Self, HighlightError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| HighlightError::IoError(format!("{}: {}", path.display(), e)))?;
        log::debug!("loaded {} ({} bytes)", path.display(), source.len());
        Ok(Self::from_string_with(&source, lexer))
    }

    /// Load source from a string, with default lexer options.
    pub fn from_string(source: &str) -> Self {
        Self::from_string_with(source, AimmsLexer::new())
    }

    pub fn from_string_with(source: &str, lexer: AimmsLexer) -> Self {
        let text = lexer.preprocess(source).into_owned();
        Self { lexer, text }
    }

    /// The preprocessed text that token offsets refer to.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> Vec<Token<'_>> {
        self.lexer.tokens(&self.text)
    }

    pub fn declarations(&self) -> DeclarationIndex {
        DeclarationIndex::build(&self.text)
    }

    pub fn serialize(&self, format: OutputFormat) -> Result<String, HighlightError> {
        Ok(formats::serialize_tokens(&self.tokens(), format)?)
    }

    pub fn serialize_declarations(&self) -> Result<String, HighlightError> {
        Ok(formats::serialize_declarations(&self.declarations())?)
    }
}

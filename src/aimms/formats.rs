//! Token stream serializers.
//!
//! Formats:
//! - `token-json`: pretty JSON array of `{offset, category, text}` objects
//! - `token-yaml`: the same records as a YAML sequence
//! - `token-simple`: one `offset<TAB>category<TAB>"text"` line per token

use crate::aimms::declarations::DeclarationIndex;
use crate::aimms::token::Token;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    TokenJson,
    TokenYaml,
    TokenSimple,
}

impl OutputFormat {
    pub const ALL: &'static [OutputFormat] = &[
        OutputFormat::TokenJson,
        OutputFormat::TokenYaml,
        OutputFormat::TokenSimple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::TokenJson => "token-json",
            OutputFormat::TokenYaml => "token-yaml",
            OutputFormat::TokenSimple => "token-simple",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

/// Error that can occur while serializing output
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    UnknownFormat(String),
    Serialization(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => {
                let available: Vec<&str> = OutputFormat::ALL.iter().map(|f| f.as_str()).collect();
                write!(
                    f,
                    "Unknown format '{}' (available: {})",
                    name,
                    available.join(", ")
                )
            }
            FormatError::Serialization(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for FormatError {
    fn from(err: serde_yaml::Error) -> Self {
        FormatError::Serialization(err.to_string())
    }
}

pub fn serialize_tokens(tokens: &[Token<'_>], format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::TokenJson => {
            let mut out = serde_json::to_string_pretty(tokens)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::TokenYaml => Ok(serde_yaml::to_string(tokens)?),
        OutputFormat::TokenSimple => Ok(to_simple_str(tokens)),
    }
}

pub fn to_simple_str(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}\t{}\t{:?}\n", t.offset, t.category, t.text))
        .collect()
}

/// Declared names as a pretty JSON array, in declaration order.
pub fn serialize_declarations(index: &DeclarationIndex) -> Result<String, FormatError> {
    let mut out = serde_json::to_string_pretty(&index.records())?;
    out.push('\n');
    Ok(out)
}

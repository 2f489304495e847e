//! Token categories and the token triple.
//!
//!     Every token carries exactly one [`Category`]. Scanner categories come from the
//!     pattern rule that matched; the resolver may then replace them with an
//!     identifier category taken from a declaration, or with
//!     [`Category::DeclaredIdentifierKeyword`].
//!
//!     Category names are stable dotted strings (see [`Category::as_str`]). Renderers
//!     key their styles on these names, so they are also what serializers emit.

use serde::{Serialize, Serializer};
use std::fmt;

/// The kind of a user identifier, known from a naming convention or a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Set,
    Parameter,
    StringParameter,
    ElementParameter,
    Variable,
    Constraint,
    MathematicalProgram,
    DatabaseTable,
    Convention,
    Index,
    Quantity,
    Procedure,
}

impl IdentifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierKind::Set => "name.set",
            IdentifierKind::Parameter => "name.parameter",
            IdentifierKind::StringParameter => "name.string-parameter",
            IdentifierKind::ElementParameter => "name.element-parameter",
            IdentifierKind::Variable => "name.variable",
            IdentifierKind::Constraint => "name.constraint",
            IdentifierKind::MathematicalProgram => "name.mathematical-program",
            IdentifierKind::DatabaseTable => "name.database-table",
            IdentifierKind::Convention => "name.convention",
            IdentifierKind::Index => "name.index",
            IdentifierKind::Quantity => "name.quantity",
            IdentifierKind::Procedure => "name.procedure",
        }
    }
}

/// Lexical classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Whitespace,
    CommentLine,
    CommentBlock,
    /// Attribute label in a declaration body (`Definition:`), and the delimiters of
    /// a `Comment:` attribute.
    AttributeName,
    /// Body of a `Comment:` attribute.
    AttributeComment,
    /// Formal argument name (`x : ...` in a pre-formatted argument list).
    ArgumentName,
    ReservedKeyword,
    /// Predeclared identifier or intrinsic function.
    BuiltinName,
    StringLiteral,
    Punctuation,
    Operator,
    Identifier(IdentifierKind),
    /// A declaration keyword spelled exactly as it was used in a declaration site of
    /// the same text.
    DeclaredIdentifierKeyword,
    PlainText,
}

impl Category {
    /// Returns the stable name of the category.
    ///
    /// The names follow the usual highlighting scope vocabulary so renderer themes
    /// can map them without a lookup table of their own:
    /// - comments → "comment.*"
    /// - keywords → "keyword.*"
    /// - identifiers by kind → "name.<kind>"
    /// - anything unstyled → "text"
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Whitespace => "text.whitespace",
            Category::CommentLine => "comment.line",
            Category::CommentBlock => "comment.block",
            Category::AttributeName => "name.attribute",
            Category::AttributeComment => "comment.attribute",
            Category::ArgumentName => "name.argument",
            Category::ReservedKeyword => "keyword.reserved",
            Category::BuiltinName => "name.builtin",
            Category::StringLiteral => "string",
            Category::Punctuation => "punctuation",
            Category::Operator => "operator",
            Category::Identifier(kind) => kind.as_str(),
            Category::DeclaredIdentifierKeyword => "keyword.declaration",
            Category::PlainText => "text",
        }
    }

    pub fn is_identifier(self) -> bool {
        matches!(self, Category::Identifier(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

pub const CATEGORIES: &[Category] = &[
    Category::Whitespace,
    Category::CommentLine,
    Category::CommentBlock,
    Category::AttributeName,
    Category::AttributeComment,
    Category::ArgumentName,
    Category::ReservedKeyword,
    Category::BuiltinName,
    Category::StringLiteral,
    Category::Punctuation,
    Category::Operator,
    Category::Identifier(IdentifierKind::Set),
    Category::Identifier(IdentifierKind::Parameter),
    Category::Identifier(IdentifierKind::StringParameter),
    Category::Identifier(IdentifierKind::ElementParameter),
    Category::Identifier(IdentifierKind::Variable),
    Category::Identifier(IdentifierKind::Constraint),
    Category::Identifier(IdentifierKind::MathematicalProgram),
    Category::Identifier(IdentifierKind::DatabaseTable),
    Category::Identifier(IdentifierKind::Convention),
    Category::Identifier(IdentifierKind::Index),
    Category::Identifier(IdentifierKind::Quantity),
    Category::Identifier(IdentifierKind::Procedure),
    Category::DeclaredIdentifierKeyword,
    Category::PlainText,
];

/// A classified span of the tokenized text.
///
/// `offset` is the byte offset of `text` in the tokenized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub offset: usize,
    pub category: Category,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    pub fn new(offset: usize, category: Category, text: &'src str) -> Self {
        Self {
            offset,
            category,
            text,
        }
    }

    /// Byte offset one past the end of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn with_category(self, category: Category) -> Self {
        Self { category, ..self }
    }
}

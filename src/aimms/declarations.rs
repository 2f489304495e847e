//! Declaration Index
//!
//!     A separate pass over the whole text that finds declaration sites:
//!
//!         <declaration-keyword> <whitespace> <identifier> (`{` | `;` | `:`)
//!
//!     e.g. `Parameter OD;` or `Set Cities {`. Each site records the identifier under
//!     its declaration keyword. A name declared twice keeps its last declaration.
//!
//!     The keyword is matched case-insensitively and without a leading word boundary,
//!     so `MySet Foo;` declares `Foo`. Highlighting tolerates this.
//!
//!     Every match is recorded. The identifier category is looked up by the keyword
//!     as written, with exact case: `Parameter OD;` declares a parameter, while
//!     `parameter OD;` (or any keyword without a category of its own) falls back to
//!     Variable.

use crate::aimms::token::{Category, IdentifierKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// The closed set of AIMMS declaration keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKeyword {
    Set,
    Calendar,
    Horizon,
    Index,
    Parameter,
    ElementParameter,
    StringParameter,
    UnitParameter,
    Variable,
    ElementVariable,
    ComplementarityVariable,
    Constraint,
    Arc,
    Node,
    UncertaintyVariable,
    UncertaintyConstraint,
    Activity,
    Resource,
    MathematicalProgram,
    Macro,
    Model,
    Assertion,
    DatabaseTable,
    DatabaseProcedure,
    File,
    Procedure,
    Function,
    Quantity,
    Convention,
    LibraryModule,
    Module,
    Section,
    Declaration,
    ExternalProcedure,
}

impl DeclarationKeyword {
    /// All keywords, in the order the declaration regex tries them.
    pub const ALL: &'static [DeclarationKeyword] = &[
        DeclarationKeyword::Set,
        DeclarationKeyword::Calendar,
        DeclarationKeyword::Horizon,
        DeclarationKeyword::Index,
        DeclarationKeyword::Parameter,
        DeclarationKeyword::ElementParameter,
        DeclarationKeyword::StringParameter,
        DeclarationKeyword::UnitParameter,
        DeclarationKeyword::Variable,
        DeclarationKeyword::ElementVariable,
        DeclarationKeyword::ComplementarityVariable,
        DeclarationKeyword::Constraint,
        DeclarationKeyword::Arc,
        DeclarationKeyword::Node,
        DeclarationKeyword::UncertaintyVariable,
        DeclarationKeyword::UncertaintyConstraint,
        DeclarationKeyword::Activity,
        DeclarationKeyword::Resource,
        DeclarationKeyword::MathematicalProgram,
        DeclarationKeyword::Macro,
        DeclarationKeyword::Model,
        DeclarationKeyword::Assertion,
        DeclarationKeyword::DatabaseTable,
        DeclarationKeyword::DatabaseProcedure,
        DeclarationKeyword::File,
        DeclarationKeyword::Procedure,
        DeclarationKeyword::Function,
        DeclarationKeyword::Quantity,
        DeclarationKeyword::Convention,
        DeclarationKeyword::LibraryModule,
        DeclarationKeyword::Module,
        DeclarationKeyword::Section,
        DeclarationKeyword::Declaration,
        DeclarationKeyword::ExternalProcedure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKeyword::Set => "Set",
            DeclarationKeyword::Calendar => "Calendar",
            DeclarationKeyword::Horizon => "Horizon",
            DeclarationKeyword::Index => "Index",
            DeclarationKeyword::Parameter => "Parameter",
            DeclarationKeyword::ElementParameter => "ElementParameter",
            DeclarationKeyword::StringParameter => "StringParameter",
            DeclarationKeyword::UnitParameter => "UnitParameter",
            DeclarationKeyword::Variable => "Variable",
            DeclarationKeyword::ElementVariable => "ElementVariable",
            DeclarationKeyword::ComplementarityVariable => "ComplementarityVariable",
            DeclarationKeyword::Constraint => "Constraint",
            DeclarationKeyword::Arc => "Arc",
            DeclarationKeyword::Node => "Node",
            DeclarationKeyword::UncertaintyVariable => "UncertaintyVariable",
            DeclarationKeyword::UncertaintyConstraint => "UncertaintyConstraint",
            DeclarationKeyword::Activity => "Activity",
            DeclarationKeyword::Resource => "Resource",
            DeclarationKeyword::MathematicalProgram => "MathematicalProgram",
            DeclarationKeyword::Macro => "Macro",
            DeclarationKeyword::Model => "Model",
            DeclarationKeyword::Assertion => "Assertion",
            DeclarationKeyword::DatabaseTable => "DatabaseTable",
            DeclarationKeyword::DatabaseProcedure => "DatabaseProcedure",
            DeclarationKeyword::File => "File",
            DeclarationKeyword::Procedure => "Procedure",
            DeclarationKeyword::Function => "Function",
            DeclarationKeyword::Quantity => "Quantity",
            DeclarationKeyword::Convention => "Convention",
            DeclarationKeyword::LibraryModule => "LibraryModule",
            DeclarationKeyword::Module => "Module",
            DeclarationKeyword::Section => "Section",
            DeclarationKeyword::Declaration => "Declaration",
            DeclarationKeyword::ExternalProcedure => "ExternalProcedure",
        }
    }

    /// Exact-case lookup of a keyword spelling.
    pub fn from_spelling(word: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|keyword| keyword.as_str() == word)
    }

    /// Identifier category for names declared with this keyword.
    ///
    /// Keywords without a category of their own (Calendar, UnitParameter, Function,
    /// ...) fall back to Variable.
    pub fn identifier_kind(self) -> IdentifierKind {
        match self {
            DeclarationKeyword::Set => IdentifierKind::Set,
            DeclarationKeyword::Parameter => IdentifierKind::Parameter,
            DeclarationKeyword::StringParameter => IdentifierKind::StringParameter,
            DeclarationKeyword::ElementParameter => IdentifierKind::ElementParameter,
            DeclarationKeyword::Variable => IdentifierKind::Variable,
            DeclarationKeyword::Constraint => IdentifierKind::Constraint,
            DeclarationKeyword::MathematicalProgram => IdentifierKind::MathematicalProgram,
            DeclarationKeyword::Quantity => IdentifierKind::Quantity,
            DeclarationKeyword::DatabaseTable => IdentifierKind::DatabaseTable,
            DeclarationKeyword::Convention => IdentifierKind::Convention,
            DeclarationKeyword::Procedure => IdentifierKind::Procedure,
            DeclarationKeyword::Index => IdentifierKind::Index,
            _ => IdentifierKind::Variable,
        }
    }

    pub fn category(self) -> Category {
        Category::Identifier(self.identifier_kind())
    }
}

impl fmt::Display for DeclarationKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    let keywords = DeclarationKeyword::ALL
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)({})\s+(\w+)(?:\s*\{{|\s*;|\s*:)", keywords)).unwrap()
});

/// One declaration site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationRecord {
    pub name: String,
    /// The keyword, when written with its canonical case.
    #[serde(skip)]
    pub keyword: Option<DeclarationKeyword>,
    /// The keyword as written at the declaration site.
    #[serde(rename = "keyword")]
    pub spelling: String,
    /// Byte offset of the declaration site.
    pub offset: usize,
}

impl DeclarationRecord {
    pub fn identifier_kind(&self) -> IdentifierKind {
        self.keyword
            .map_or(IdentifierKind::Variable, DeclarationKeyword::identifier_kind)
    }

    pub fn category(&self) -> Category {
        Category::Identifier(self.identifier_kind())
    }
}

/// Declared names of one text, mapped to their (last) declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationIndex {
    records: HashMap<String, DeclarationRecord>,
    spellings: HashSet<String>,
}

impl DeclarationIndex {
    /// Scan the whole text for declaration sites.
    pub fn build(text: &str) -> Self {
        let mut records: HashMap<String, DeclarationRecord> = HashMap::new();

        for caps in DECLARATION_REGEX.captures_iter(text) {
            let (site, spelling, name) = match (caps.get(0), caps.get(1), caps.get(2)) {
                (Some(site), Some(spelling), Some(name)) => (site, spelling, name),
                _ => continue,
            };
            records.insert(
                name.as_str().to_string(),
                DeclarationRecord {
                    name: name.as_str().to_string(),
                    keyword: DeclarationKeyword::from_spelling(spelling.as_str()),
                    spelling: spelling.as_str().to_string(),
                    offset: site.start(),
                },
            );
        }

        // Only spellings of surviving declarations count.
        let spellings = records.values().map(|r| r.spelling.clone()).collect();

        log::debug!("declaration index: {} declared names", records.len());
        Self { records, spellings }
    }

    pub fn get(&self, name: &str) -> Option<&DeclarationRecord> {
        self.records.get(name)
    }

    /// Whether `text` is, exactly, the spelling of a keyword used by a declaration.
    pub fn is_keyword_spelling(&self, text: &str) -> bool {
        self.spellings.contains(text)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted by declaration offset.
    pub fn records(&self) -> Vec<&DeclarationRecord> {
        let mut records: Vec<&DeclarationRecord> = self.records.values().collect();
        records.sort_by_key(|r| r.offset);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_simple_declaration() {
        let index = DeclarationIndex::build("Parameter OD;");
        let record = index.get("OD").unwrap();
        assert_eq!(record.keyword, Some(DeclarationKeyword::Parameter));
        assert_eq!(record.spelling, "Parameter");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn accepts_brace_and_colon_terminators() {
        let index = DeclarationIndex::build("Set Cities {\n}\nVariable x : y\nIndex i\n");
        assert_eq!(
            index.get("Cities").unwrap().keyword,
            Some(DeclarationKeyword::Set)
        );
        assert_eq!(
            index.get("x").unwrap().keyword,
            Some(DeclarationKeyword::Variable)
        );
        assert!(index.get("i").is_none());
    }

    #[test]
    fn last_declaration_wins() {
        let index = DeclarationIndex::build("Set A;\nParameter A;\n");
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("A").unwrap().keyword,
            Some(DeclarationKeyword::Parameter)
        );
        assert!(index.is_keyword_spelling("Parameter"));
        assert!(!index.is_keyword_spelling("Set"));
    }

    #[test]
    fn keeps_spelling_as_written() {
        let index = DeclarationIndex::build("parameter Demand;");
        let record = index.get("Demand").unwrap();
        assert_eq!(record.spelling, "parameter");
        assert_eq!(record.keyword, None);
        assert_eq!(record.identifier_kind(), IdentifierKind::Variable);
        assert!(index.is_keyword_spelling("parameter"));
        assert!(!index.is_keyword_spelling("Parameter"));
    }

    #[test]
    fn category_follows_exact_spelling() {
        let index = DeclarationIndex::build("Index i;
index j;
INDEX k;
");
        assert_eq!(
            index.get("i").unwrap().category(),
            Category::Identifier(IdentifierKind::Index)
        );
        for name in ["j", "k"] {
            assert_eq!(
                index.get(name).unwrap().category(),
                Category::Identifier(IdentifierKind::Variable)
            );
        }
    }

    #[test]
    fn records_unicode_case_folded_keywords() {
        // `ſ` (long s) case-folds to `s`.
        let index = DeclarationIndex::build("ſet X;\nCon\u{17F}traint M;\n");
        assert_eq!(index.len(), 2);
        let record = index.get("X").unwrap();
        assert_eq!(record.spelling, "ſet");
        assert_eq!(record.keyword, None);
        assert_eq!(record.category(), Category::Identifier(IdentifierKind::Variable));
        assert!(index.is_keyword_spelling("ſet"));
        assert!(index.get("M").is_some());
    }

    #[test]
    fn matches_longer_keywords() {
        let index = DeclarationIndex::build("ElementParameter EP;\nMathematicalProgram Plan;");
        assert_eq!(
            index.get("EP").unwrap().keyword,
            Some(DeclarationKeyword::ElementParameter)
        );
        assert_eq!(
            index.get("Plan").unwrap().category(),
            Category::Identifier(IdentifierKind::MathematicalProgram)
        );
    }

    #[test]
    fn unmapped_keywords_fall_back_to_variable() {
        assert_eq!(
            DeclarationKeyword::Calendar.identifier_kind(),
            IdentifierKind::Variable
        );
        assert_eq!(
            DeclarationKeyword::File.identifier_kind(),
            IdentifierKind::Variable
        );
    }

    #[test]
    fn from_spelling_is_exact() {
        for keyword in DeclarationKeyword::ALL {
            assert_eq!(
                DeclarationKeyword::from_spelling(keyword.as_str()),
                Some(*keyword)
            );
        }
        assert_eq!(DeclarationKeyword::from_spelling("mathematicalprogram"), None);
    }

    #[test]
    fn records_are_ordered_by_offset() {
        let index = DeclarationIndex::build("Set S;\nParameter P;\nVariable V;");
        let names: Vec<&str> = index.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["S", "P", "V"]);
    }
}

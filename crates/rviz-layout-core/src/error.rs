//! Error types for rviz-layout.

use serde::Serialize;
use thiserror::Error;

/// The main error type for rviz-layout operations.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The document could not be parsed into a layout tree.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The document parsed but holds values outside their declared domain.
    #[error("layout failed validation with {} error(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    /// A display with the given name already exists in the target list.
    #[error("display '{0}' already exists")]
    DisplayExists(String),

    /// A display with the given name was not found.
    #[error("display '{0}' not found")]
    DisplayNotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// A specialized Result type for rviz-layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// A structural or type error found while building the layout tree.
///
/// `path` is the slash-separated location of the offending node, e.g.
/// `Visualization Manager/Displays/Grid/Alpha`. It is empty for errors
/// that concern the document as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{kind}", path_prefix(.path))]
pub struct ParseError {
    pub path: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(path: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Builds a parse error from a YAML syntax failure.
    pub fn syntax(err: &serde_yaml::Error) -> Self {
        let location = err.location();
        Self::new(
            String::new(),
            ParseErrorKind::Syntax {
                message: err.to_string(),
                line: location.as_ref().map(serde_yaml::Location::line),
                column: location.as_ref().map(serde_yaml::Location::column),
            },
        )
    }
}

fn path_prefix(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("{path}: ")
    }
}

/// What went wrong while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The text is not well-formed YAML.
    #[error("malformed document: {message}")]
    Syntax {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// A mapping was required.
    #[error("expected a mapping, found {0}")]
    ExpectedMapping(&'static str),

    /// A sequence was required.
    #[error("expected a sequence, found {0}")]
    ExpectedSequence(&'static str),

    /// A known field holds a value of the wrong type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// A required field is absent.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A mapping holds a key it cannot have.
    #[error("unexpected field '{0}'")]
    UnexpectedField(String),

    /// A color string is not three numeric components.
    #[error("malformed color '{0}', expected 'R; G; B'")]
    MalformedColor(String),
}

/// A value that parsed correctly but lies outside its declared domain.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{path}: {kind}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// The domain rule a value violates.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", content = "detail", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A number lies outside its closed range.
    #[error("value {value} outside [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// A number is NaN or infinite.
    #[error("value {0} is not finite")]
    NotFinite(f64),

    /// An enumeration holds a keyword it does not define.
    #[error("'{value}' is not one of: {}", .allowed.join(", "))]
    UnknownVariant {
        value: String,
        allowed: Vec<&'static str>,
    },

    /// A color component lies outside 0-255.
    #[error("color component {0} outside 0-255")]
    ColorComponent(i64),

    /// A lower bound exceeds its paired upper bound.
    #[error("minimum {min} exceeds maximum {max}")]
    InvertedBounds { min: f64, max: f64 },

    /// Two siblings share a name.
    #[error("duplicate name '{0}' among siblings")]
    DuplicateName(String),

    /// A display has an empty name.
    #[error("name is empty")]
    EmptyName,

    /// A display class has no schema.
    #[error("unknown display class '{0}'")]
    UnknownClass(String),
}

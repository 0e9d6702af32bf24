//! Error types for safesql

use thiserror::Error;

/// Result type alias for safesql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while building arguments or rendering statements.
///
/// Rendering fails closed: no partial SQL is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// A structural character was typed directly into the template
    #[error("Parse error at offset {offset}: saw dangerous character {ch:?} in SQL query")]
    DangerousCharacter { offset: usize, ch: char },

    /// The template ended in the middle of a `%` code
    #[error("Parse error at offset {offset}: string ended with unfinished % code")]
    UnterminatedSpecifier { offset: usize },

    /// A `%` code that the renderer does not know
    #[error("Parse error at offset {offset}: unknown % code {specifier}")]
    UnknownSpecifier { offset: usize, specifier: String },

    /// The template asks for more arguments than were supplied
    #[error("Parse error at offset {offset}: too few parameters for query")]
    TooFewParameters { offset: usize },

    /// Arguments were left over after the whole template was consumed
    #[error(
        "Parse error at offset 0: too many parameters specified for query \
         (template uses {expected}, got {actual})"
    )]
    TooManyParameters { expected: usize, actual: usize },

    /// An argument's variant does not fit the specifier consuming it
    #[error(
        "Parse error at offset {offset}: invalid value type {actual} for format string {specifier} \
         (expected {expected})"
    )]
    SpecifierTypeMismatch {
        offset: usize,
        specifier: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// `%V` rows with different column counts
    #[error(
        "Parse error at offset {offset}: not all rows provided for %V formatter are the same size \
         (expected {expected}, got {actual})"
    )]
    RowLengthMismatch {
        offset: usize,
        expected: usize,
        actual: usize,
    },

    /// A string literal had to be escaped but no escaper was bound
    #[error("Parse error at offset {offset}: string literal requires an escaper")]
    EscaperRequired { offset: usize },

    /// Accessor called for the wrong variant
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Value has no display string
    #[error(
        "Unsupported conversion: only int, double, bool and string convert to text, got {kind}"
    )]
    UnsupportedConversion { kind: &'static str },

    /// Dynamic value that cannot be represented as an argument
    #[error("Unsupported dynamic type: {0}")]
    UnsupportedDynamicType(String),
}

impl SqlError {
    pub(crate) fn mismatch(
        offset: usize,
        specifier: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::SpecifierTypeMismatch {
            offset,
            specifier: specifier.into(),
            expected,
            actual,
        }
    }

    /// Byte offset into the template, for errors raised while rendering.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::DangerousCharacter { offset, .. }
            | Self::UnterminatedSpecifier { offset }
            | Self::UnknownSpecifier { offset, .. }
            | Self::TooFewParameters { offset }
            | Self::SpecifierTypeMismatch { offset, .. }
            | Self::RowLengthMismatch { offset, .. }
            | Self::EscaperRequired { offset } => Some(*offset),
            Self::TooManyParameters { .. } => Some(0),
            Self::TypeMismatch { .. }
            | Self::UnsupportedConversion { .. }
            | Self::UnsupportedDynamicType(_) => None,
        }
    }

    /// Check if this error came from rendering a template
    pub fn is_render_error(&self) -> bool {
        self.offset().is_some()
    }

    /// Check if this error came from misusing a value accessor
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::UnsupportedConversion { .. }
        )
    }
}

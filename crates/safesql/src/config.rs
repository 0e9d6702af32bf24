use serde::{Deserialize, Serialize};

/// Delimiter used around rendered string literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// `"..."`
    #[default]
    Double,
    /// `'...'`
    Single,
}

impl QuoteStyle {
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

/// Configuration for [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Quote character for string literals.
    pub quote: QuoteStyle,
    /// Fail with `EscaperRequired` instead of copying strings through
    /// unescaped when no escaper is bound.
    pub require_escaper: bool,
    /// Truncate rendered SQL in trace logs (in bytes). `None` means no truncation.
    pub max_log_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quote: QuoteStyle::Double,
            require_escaper: false,
            max_log_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string literal quote character.
    pub fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    /// Refuse the unescaped passthrough used when no escaper is bound.
    ///
    /// Recommended outside tests.
    pub fn require_escaper(mut self) -> Self {
        self.require_escaper = true;
        self
    }

    /// Set maximum SQL length written to trace logs.
    pub fn max_log_length(mut self, len: usize) -> Self {
        self.max_log_length = Some(len);
        self
    }

    /// Disable SQL truncation in trace logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_log_length = None;
        self
    }
}

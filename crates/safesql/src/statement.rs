//! Statement templates and their default arguments.

use std::ops::Add;

use crate::error::SqlResult;
use crate::escape::Escaper;
use crate::render::Renderer;
use crate::value::Value;

/// A template plus the arguments its `%` codes consume.
///
/// Statements are immutable once built: [`append`](Statement::append) returns a
/// new statement, and rendering never touches the original.
///
/// # Example
/// ```
/// use safesql::{Statement, args};
///
/// let base = Statement::with_args("SELECT * FROM %T", args!["users"]);
/// let filter = Statement::with_args(" WHERE id = %d", args![42]);
/// let sql = base.append(&filter).render_insecure().unwrap();
/// assert_eq!(sql, "SELECT * FROM `users` WHERE id = 42");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Statement {
    text: String,
    args: Vec<Value>,
    unsafe_text: bool,
}

impl Statement {
    /// A template with no arguments.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_args(text, Vec::new())
    }

    /// A template with its default arguments.
    pub fn with_args(text: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            args,
            unsafe_text: false,
        }
    }

    /// Text that is emitted verbatim: no scanning, escaping or argument
    /// substitution. The caller is responsible for having validated it.
    pub fn unchecked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            args: Vec::new(),
            unsafe_text: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn is_unsafe(&self) -> bool {
        self.unsafe_text
    }

    /// Concatenate templates and argument lists into a new statement.
    ///
    /// Nothing is validated until render time. The result is only unchecked
    /// when both halves are.
    pub fn append(&self, other: &Statement) -> Statement {
        let mut text = String::with_capacity(self.text.len() + other.text.len());
        text.push_str(&self.text);
        text.push_str(&other.text);

        let mut args = Vec::with_capacity(self.args.len() + other.args.len());
        args.extend_from_slice(&self.args);
        args.extend_from_slice(&other.args);

        Statement {
            text,
            args,
            unsafe_text: self.unsafe_text && other.unsafe_text,
        }
    }

    /// Render with the statement's own arguments.
    pub fn render(&self, escaper: Option<&dyn Escaper>) -> SqlResult<String> {
        Renderer::with_escaper(escaper).render(self)
    }

    /// Render the same template against a different argument list.
    pub fn render_with_args(
        &self,
        escaper: Option<&dyn Escaper>,
        args: &[Value],
    ) -> SqlResult<String> {
        Renderer::with_escaper(escaper).render_with_args(self, args)
    }

    /// Render without an escaper; string literals are not escaped.
    ///
    /// Only for tests and debugging output.
    pub fn render_insecure(&self) -> SqlResult<String> {
        self.render(None)
    }
}

impl Add for Statement {
    type Output = Statement;

    fn add(mut self, rhs: Statement) -> Statement {
        self.text.push_str(&rhs.text);
        self.args.extend(rhs.args);
        self.unsafe_text = self.unsafe_text && rhs.unsafe_text;
        self
    }
}

impl Add<&Statement> for &Statement {
    type Output = Statement;

    fn add(self, rhs: &Statement) -> Statement {
        self.append(rhs)
    }
}

//! Multi-statement batches.

use crate::error::SqlResult;
use crate::escape::Escaper;
use crate::render::Renderer;
use crate::statement::Statement;

/// Render statements and join them with `;` into one multi-statement text.
pub fn render_statements(
    statements: &[Statement],
    escaper: Option<&dyn Escaper>,
) -> SqlResult<String> {
    Renderer::with_escaper(escaper).render_all(statements)
}

/// An ordered batch of statements sent as one multi-statement text.
///
/// The rendered text is cached by the last `render*` call. Rendering takes
/// `&mut self`, so a batch cannot be rendered concurrently.
#[derive(Debug, Clone, Default)]
pub struct StatementBatch {
    statements: Vec<Statement>,
    rendered: String,
}

impl StatementBatch {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            rendered: String::new(),
        }
    }

    pub fn push(&mut self, stmt: Statement) -> &mut Self {
        self.statements.push(stmt);
        self
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Render every statement, joined with `;`.
    pub fn render_all(&mut self, escaper: Option<&dyn Escaper>) -> SqlResult<&str> {
        self.render_with(&Renderer::with_escaper(escaper))
    }

    /// Same as [`render_all`](Self::render_all) with a configured renderer.
    pub fn render_with(&mut self, renderer: &Renderer<'_>) -> SqlResult<&str> {
        if let [only] = self.statements.as_slice() {
            if only.is_unsafe() {
                return Ok(only.text());
            }
        }
        self.rendered = renderer.render_all(&self.statements)?;
        Ok(&self.rendered)
    }
}

impl From<Vec<Statement>> for StatementBatch {
    fn from(statements: Vec<Statement>) -> Self {
        Self::new(statements)
    }
}

impl FromIterator<Statement> for StatementBatch {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

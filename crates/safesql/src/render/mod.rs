//! The `%` template interpreter.
//!
//! A template is plain SQL text in which arguments are introduced only through
//! `%` codes:
//!
//! | Code | Argument | Output |
//! |------|----------|--------|
//! | `%%` | none | `%` |
//! | `%d` `%s` `%f` | int / string / double (or null) | literal, strings quoted and escaped |
//! | `%=d` `%=s` `%=f` | as above | ` = <literal>`, or ` IS NULL` for null |
//! | `%T` `%C` | string | backtick-quoted identifier |
//! | `%K` | scalar or string | `/* comment */` |
//! | `%V` | list of lists | `(a, b), (c, d)` |
//! | `%Ld` `%Ls` `%Lf` `%LC` | list | comma-separated literals or identifiers |
//! | `%LO` `%LA` | pair list | `(k = v OR ...)` / `(k = v AND ...)` |
//! | `%U` | pair list | `k = v, ...` |
//! | `%W` | pair list | `k = v AND ...` |
//! | `%Q` | statement, scalar or string | inserted verbatim |
//!
//! The characters `;`, `'`, `"` and `` ` `` may not appear in the template
//! itself; they only ever reach the output through the codes above.
//!
//! # Example
//! ```
//! use safesql::{BackslashEscaper, PairList, Renderer, Statement, args};
//!
//! let stmt = Statement::with_args(
//!     "UPDATE %T SET %U WHERE %W",
//!     args![
//!         "users",
//!         PairList::new().pair("name", "O'Brien"),
//!         PairList::new().pair("id", 7),
//!     ],
//! );
//! let sql = Renderer::new(&BackslashEscaper).render(&stmt).unwrap();
//! assert_eq!(sql, r#"UPDATE `users` SET `name` = "O\'Brien" WHERE `id` = 7"#);
//! ```

mod specifier;


use std::borrow::Cow;
use std::fmt;

use crate::config::RenderConfig;
use crate::error::{SqlError, SqlResult};
use crate::escape::{Escaper, append_escaped};
use crate::ident::{write_comment, write_identifier};
use crate::statement::Statement;
use crate::value::Value;
use specifier::{ListElement, ScalarKind, Specifier};

/// Renders statements against an optional escaper.
///
/// Without an escaper string literals are copied through unescaped, which is
/// only acceptable in tests (see [`RenderConfig::require_escaper`]).
#[derive(Clone)]
pub struct Renderer<'e> {
    escaper: Option<&'e dyn Escaper>,
    config: RenderConfig,
}

impl<'e> Renderer<'e> {
    /// Renderer bound to `escaper`.
    pub fn new(escaper: &'e dyn Escaper) -> Self {
        Self::with_escaper(Some(escaper))
    }

    /// Renderer with no escaper. Testing only.
    pub fn insecure() -> Self {
        Self::with_escaper(None)
    }

    pub fn with_escaper(escaper: Option<&'e dyn Escaper>) -> Self {
        Self {
            escaper,
            config: RenderConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn escaper(&self) -> Option<&'e dyn Escaper> {
        self.escaper
    }

    /// Render a statement with its own arguments.
    pub fn render(&self, stmt: &Statement) -> SqlResult<String> {
        self.render_with_args(stmt, stmt.args())
    }

    /// Render a statement's template against `args` instead of its own.
    pub fn render_with_args(&self, stmt: &Statement, args: &[Value]) -> SqlResult<String> {
        render_statement(stmt, args, self.escaper, &self.config)
    }

    /// Render a bare template.
    pub fn render_template(&self, template: &str, args: &[Value]) -> SqlResult<String> {
        render_template(template, args, self.escaper, &self.config)
    }

    /// Render each statement and join them with `;` (no trailing separator).
    ///
    /// Stops at the first statement that fails.
    pub fn render_all(&self, statements: &[Statement]) -> SqlResult<String> {
        let reserve = statements
            .iter()
            .map(|s| s.text().len() + 8 * s.args().len())
            .sum::<usize>();
        let mut out = String::with_capacity(reserve);
        for (i, stmt) in statements.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            out.push_str(&self.render(stmt)?);
        }
        Ok(out)
    }
}

impl fmt::Debug for Renderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("escaper", &self.escaper.map(|_| "<escaper>"))
            .field("config", &self.config)
            .finish()
    }
}

pub(crate) fn render_statement(
    stmt: &Statement,
    args: &[Value],
    escaper: Option<&dyn Escaper>,
    config: &RenderConfig,
) -> SqlResult<String> {
    if stmt.is_unsafe() {
        return Ok(stmt.text().to_string());
    }
    render_template(stmt.text(), args, escaper, config)
}

fn render_template(
    template: &str,
    args: &[Value],
    escaper: Option<&dyn Escaper>,
    config: &RenderConfig,
) -> SqlResult<String> {
    let formatter = Formatter {
        template,
        args,
        escaper,
        config,
        out: String::with_capacity(template.len() + 8 * args.len()),
        next_arg: 0,
    };
    match formatter.run() {
        Ok(sql) => {
            tracing::trace!(
                target: "safesql.render",
                arg_count = args.len(),
                sql = %truncate_for_log(&sql, config.max_log_length),
                "rendered statement"
            );
            Ok(sql)
        }
        Err(err) => {
            tracing::debug!(
                target: "safesql.render",
                offset = ?err.offset(),
                error = %err,
                template = %truncate_for_log(template, config.max_log_length),
                "failed to render statement"
            );
            Err(err)
        }
    }
}

fn truncate_for_log(sql: &str, max: Option<usize>) -> Cow<'_, str> {
    match max {
        Some(max) if sql.len() > max => {
            let mut end = max;
            while !sql.is_char_boundary(end) {
                end -= 1;
            }
            Cow::Owned(format!("{}...", &sql[..end]))
        }
        _ => Cow::Borrowed(sql),
    }
}

/// Single left-to-right pass over one template.
struct Formatter<'a> {
    template: &'a str,
    args: &'a [Value],
    escaper: Option<&'a dyn Escaper>,
    config: &'a RenderConfig,
    out: String,
    next_arg: usize,
}

impl<'a> Formatter<'a> {
    fn run(mut self) -> SqlResult<String> {
        if let Some(offset) = self
            .template
            .bytes()
            .position(|b| matches!(b, b';' | b'\'' | b'"' | b'`'))
        {
            return Err(SqlError::DangerousCharacter {
                offset,
                ch: self.template.as_bytes()[offset] as char,
            });
        }

        let template = self.template;
        let bytes = template.as_bytes();
        let mut literal_start = 0;
        let mut idx = 0;
        while idx < bytes.len() {
            if bytes[idx] != b'%' {
                idx += 1;
                continue;
            }
            self.out.push_str(&template[literal_start..idx]);

            let at = idx + 1;
            let (spec, last) = Specifier::parse(template, at)?;
            if spec.takes_argument() {
                let arg = self.next_arg(at)?;
                self.append_spec(at, spec, arg)?;
            } else {
                self.out.push('%');
            }
            idx = last + 1;
            literal_start = idx;
        }
        self.out.push_str(&template[literal_start..]);

        if self.next_arg != self.args.len() {
            return Err(SqlError::TooManyParameters {
                expected: self.next_arg,
                actual: self.args.len(),
            });
        }
        Ok(self.out)
    }

    fn next_arg(&mut self, offset: usize) -> SqlResult<&'a Value> {
        let args = self.args;
        let arg = args
            .get(self.next_arg)
            .ok_or(SqlError::TooFewParameters { offset })?;
        self.next_arg += 1;
        Ok(arg)
    }

    fn append_spec(&mut self, offset: usize, spec: Specifier, arg: &Value) -> SqlResult<()> {
        match spec {
            Specifier::Percent => self.out.push('%'),
            Specifier::Scalar(kind) => self.append_value(offset, spec, kind, arg)?,
            Specifier::Identifier(_) => self.append_identifier(offset, spec, arg)?,
            Specifier::Comment => {
                let text = arg.to_display_string().map_err(|_| {
                    SqlError::mismatch(offset, spec.code(), "scalar", arg.type_name())
                })?;
                write_comment(&mut self.out, &text);
            }
            Specifier::Compare(kind) => {
                if arg.is_null() {
                    self.out.push_str(" IS NULL");
                } else {
                    self.out.push_str(" = ");
                    self.append_value(offset, spec, kind, arg)?;
                }
            }
            Specifier::Values => self.append_rows(offset, spec, arg)?,
            Specifier::Clause(conjunction) => {
                self.out.push('(');
                self.append_pairs(offset, spec, conjunction.separator(), arg)?;
                self.out.push(')');
            }
            Specifier::List(element) => {
                let Value::List(items) = arg else {
                    return Err(SqlError::mismatch(offset, spec.code(), "list", arg.type_name()));
                };
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    match element {
                        ListElement::Identifier => self.append_identifier(offset, spec, item)?,
                        ListElement::Scalar(kind) => self.append_value(offset, spec, kind, item)?,
                    }
                }
            }
            Specifier::Set => self.append_pairs(offset, spec, ", ", arg)?,
            Specifier::Where => self.append_pairs(offset, spec, " AND ", arg)?,
            Specifier::Raw => match arg {
                Value::RawStatement(stmt) => {
                    let sub = render_statement(stmt, stmt.args(), self.escaper, self.config)?;
                    self.out.push_str(&sub);
                }
                other => {
                    let text = other.to_display_string().map_err(|_| {
                        SqlError::mismatch(
                            offset,
                            spec.code(),
                            "statement or scalar",
                            other.type_name(),
                        )
                    })?;
                    self.out.push_str(&text);
                }
            },
        }
        Ok(())
    }

    /// Append a literal, checking it against `kind`. Null is always accepted.
    fn append_value(
        &mut self,
        offset: usize,
        spec: Specifier,
        kind: ScalarKind,
        value: &Value,
    ) -> SqlResult<()> {
        let any = kind == ScalarKind::Any;
        match value {
            Value::Null => self.out.push_str("NULL"),
            Value::Str(s) if any || kind == ScalarKind::Str => self.append_string(offset, s)?,
            Value::Int(i) if any || kind == ScalarKind::Int => self.out.push_str(&i.to_string()),
            Value::Double(d) if any || kind == ScalarKind::Double => {
                if !d.is_finite() {
                    return Err(SqlError::mismatch(
                        offset,
                        spec.code(),
                        "finite double",
                        "non-finite double",
                    ));
                }
                self.out.push_str(&d.to_string());
            }
            Value::Bool(b) if any => self.out.push(if *b { '1' } else { '0' }),
            other => {
                return Err(SqlError::mismatch(
                    offset,
                    spec.code(),
                    kind.expected(),
                    other.type_name(),
                ));
            }
        }
        Ok(())
    }

    fn append_string(&mut self, offset: usize, s: &str) -> SqlResult<()> {
        if self.escaper.is_none() && self.config.require_escaper {
            return Err(SqlError::EscaperRequired { offset });
        }
        let quote = self.config.quote.as_char();
        self.out.push(quote);
        append_escaped(&mut self.out, s, self.escaper);
        self.out.push(quote);
        Ok(())
    }

    fn append_identifier(
        &mut self,
        offset: usize,
        spec: Specifier,
        value: &Value,
    ) -> SqlResult<()> {
        match value {
            Value::Str(name) => {
                write_identifier(&mut self.out, name);
                Ok(())
            }
            other => Err(SqlError::mismatch(offset, spec.code(), "string", other.type_name())),
        }
    }

    /// `%V`: every row must have the width of the first.
    fn append_rows(&mut self, offset: usize, spec: Specifier, value: &Value) -> SqlResult<()> {
        let Value::List(rows) = value else {
            return Err(SqlError::mismatch(offset, spec.code(), "list of lists", value.type_name()));
        };
        let mut width = None;
        for (i, row) in rows.iter().enumerate() {
            let Value::List(cols) = row else {
                return Err(SqlError::mismatch(
                    offset,
                    spec.code(),
                    "list of lists",
                    row.type_name(),
                ));
            };
            match width {
                None => width = Some(cols.len()),
                Some(expected) if expected != cols.len() => {
                    return Err(SqlError::RowLengthMismatch {
                        offset,
                        expected,
                        actual: cols.len(),
                    });
                }
                Some(_) => {}
            }
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push('(');
            for (j, col) in cols.iter().enumerate() {
                if j > 0 {
                    self.out.push_str(", ");
                }
                self.append_value(offset, spec, ScalarKind::Any, col)?;
            }
            self.out.push(')');
        }
        Ok(())
    }

    /// `key = value` pairs joined by `sep`. Null values become `key IS NULL`
    /// unless the pairs are comma separated (SET context).
    fn append_pairs(
        &mut self,
        offset: usize,
        spec: Specifier,
        sep: &str,
        value: &Value,
    ) -> SqlResult<()> {
        let Value::PairList(pairs) = value else {
            return Err(SqlError::mismatch(offset, spec.code(), "pair list", value.type_name()));
        };
        let null_is_test = !sep.starts_with(',');
        for (i, (key, val)) in pairs.iter().enumerate() {
            if i > 0 {
                self.out.push_str(sep);
            }
            write_identifier(&mut self.out, key);
            if val.is_null() && null_is_test {
                self.out.push_str(" IS NULL");
            } else {
                self.out.push_str(" = ");
                self.append_value(offset, spec, ScalarKind::Any, val)?;
            }
        }
        Ok(())
    }
}

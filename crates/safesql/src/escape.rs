//! String-literal escaping.
//!
//! The renderer never escapes string literals itself; it asks an [`Escaper`]
//! bound to the connection the SQL is destined for. When no escaper is bound the
//! bytes are copied through unchanged, which is only acceptable in tests.

/// Capability that makes raw text safe to place inside a quoted string literal.
///
/// Implementations append the escaped form of `raw` to `out`. They must escape
/// both quote characters so the literal may be delimited by either.
pub trait Escaper {
    fn escape_into(&self, raw: &str, out: &mut String);

    /// Escaped copy of `raw`.
    fn escape(&self, raw: &str) -> String {
        let mut out = String::with_capacity(2 * raw.len() + 1);
        self.escape_into(raw, &mut out);
        out
    }
}

impl<F> Escaper for F
where
    F: Fn(&str, &mut String),
{
    fn escape_into(&self, raw: &str, out: &mut String) {
        self(raw, out)
    }
}

/// Backslash escaping as performed by the MySQL client library for servers
/// running without `NO_BACKSLASH_ESCAPES`.
///
/// `NUL`, `\n`, `\r`, `\`, `'`, `"` and `Ctrl-Z` are escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackslashEscaper;

impl Escaper for BackslashEscaper {
    fn escape_into(&self, raw: &str, out: &mut String) {
        for ch in raw.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
    }
}

/// Quote doubling for servers running with `NO_BACKSLASH_ESCAPES`, where a
/// backslash is an ordinary character.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteDoublingEscaper;

impl Escaper for QuoteDoublingEscaper {
    fn escape_into(&self, raw: &str, out: &mut String) {
        for ch in raw.chars() {
            if ch == '\'' || ch == '"' {
                out.push(ch);
            }
            out.push(ch);
        }
    }
}

/// Append `raw` escaped by `escaper`, or unchanged when there is none.
pub(crate) fn append_escaped(out: &mut String, raw: &str, escaper: Option<&dyn Escaper>) {
    let Some(escaper) = escaper else {
        tracing::trace!(
            target: "safesql.escape",
            "connectionless escape performed; this should only occur in testing"
        );
        out.push_str(raw);
        return;
    };
    out.reserve(2 * raw.len() + 1);
    escaper.escape_into(raw, out);
}

//! Identifier quoting and comment sanitizing.
//!
//! - Identifiers are wrapped in backticks; an embedded backtick is written twice.
//! - Comment text has every `/*` and `*/` spaced out so it can neither close the
//!   surrounding comment nor open a nested one.
//!
//! # Example
//! ```
//! use safesql::ident::{quote_comment, quote_identifier};
//!
//! assert_eq!(quote_identifier("user`s"), "`user``s`");
//! assert_eq!(quote_comment("done */ DROP"), "/*done  * /  DROP*/");
//! ```

/// Quote a table or column name.
pub fn quote_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    write_identifier(&mut out, name);
    out
}

pub(crate) fn write_identifier(out: &mut String, name: &str) {
    out.reserve(name.len() + 4);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
}

/// Wrap text in `/* ... */`.
pub fn quote_comment(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    write_comment(&mut out, text);
    out
}

pub(crate) fn write_comment(out: &mut String, text: &str) {
    out.push_str("/*");
    if is_executable_prefix(text) {
        out.push(' ');
    }
    out.push_str(&text.replace("/*", " / * ").replace("*/", " * / "));
    out.push_str("*/");
}

/// `/*!`, `/*M!` (MariaDB) and `/*+` are run by the server as versioned SQL or
/// optimizer hints.
fn is_executable_prefix(text: &str) -> bool {
    text.starts_with(['!', '+']) || text.starts_with("M!") || text.starts_with("m!")
}

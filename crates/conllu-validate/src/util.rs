//! A module for utility functions shared by the rules.

use std::fmt::Write;

/// Quotes a value for a diagnostic message.
///
/// Single quotes are used unless the value contains a single quote and no
/// double quote. Backslashes, the chosen quote and control characters are
/// escaped.
pub(crate) fn quoted(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Shortens a value to at most twenty characters followed by `[...]`.
pub(crate) fn shorten(value: &str) -> String {
    if value.chars().count() < 25 {
        return value.to_string();
    }

    let prefix: String = value.chars().take(20).collect();
    format!("{prefix}[...]")
}

/// Formats a list of values as `[a, b, c]`.
pub(crate) fn bracketed<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    let mut out = String::from("[");
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }

        let _ = write!(out, "{value}");
    }
    out.push(']');
    out
}

/// Determines if a tag starts with one of the given prefixes.
pub(crate) fn starts_with_any(tag: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| tag.starts_with(p))
}

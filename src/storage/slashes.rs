//! Backslash escaping for metadata values.
//!
//! The store strips one layer of backslashes from every meta value it
//! receives, so writers add exactly one layer before handing values over.

/// Escape `'`, `"`, `\` and NUL with a leading backslash.
pub fn add_slashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove one layer of backslash escaping.
///
/// `\0` becomes NUL, `\x` becomes `x` for any other character, and a
/// trailing lone backslash is dropped.
pub fn strip_slashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some(next) => out.push(next),
            None => {}
        }
    }
    out
}

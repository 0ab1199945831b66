//! Escape handling for quoted hstore tokens.
//!
//! Inside a quoted token, backslash and double-quote are written as `\\` and
//! `\"`. On the way back in, a backslash removes the special meaning of
//! whatever single character follows it, so `\a` unescapes to `a`. Both
//! transforms are pure and total: any string is a valid input.

/// Escapes quotes and backslashes for use inside a quoted hstore token.
///
/// Backslashes are doubled before quotes are escaped, so the backslashes
/// introduced for quotes are never escaped again.
///
/// # Examples
///
/// ```rust
/// use pghstore::escape;
///
/// assert_eq!(escape(r#"string with "quotes""#), r#"string with \"quotes\""#);
/// assert_eq!(escape(r"back\slash"), r"back\\slash");
/// ```
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

/// Appends the escaped form of `s` to `out` without an intermediate
/// allocation. Used by the serializer hot path.
pub(crate) fn escape_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
}

/// Strips escape sequences: every `\X` two-character sequence becomes `X`.
///
/// The rule is deliberately permissive and not limited to `\"` and `\\`.
/// A lone trailing backslash has nothing to escape and is kept as-is.
///
/// # Examples
///
/// ```rust
/// use pghstore::unescape;
///
/// assert_eq!(unescape(r#"abc\"def\\ghi\ajkl"#), r#"abc"def\ghiajkl"#);
/// assert_eq!(unescape(r#"\"b\"=>2"#), r#""b"=>2"#);
/// ```
#[must_use]
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("abc"), "abc");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_order() {
        // A preexisting `\"` must become `\\\"`, not stay intact.
        assert_eq!(escape(r#"\""#), r#"\\\""#);
    }

    #[test]
    fn test_unescape_is_generic() {
        assert_eq!(unescape(r"\a\b\c"), "abc");
    }

    #[test]
    fn test_unescape_trailing_backslash() {
        assert_eq!(unescape(r"abc\"), r"abc\");
    }

    #[test]
    fn test_roundtrip() {
        for s in ["", "plain", r#"qu"ote"#, r"back\slash", r#"\"mixed\\"#, "uni\u{d64d}code"] {
            assert_eq!(unescape(&escape(s)), s);
        }
    }
}

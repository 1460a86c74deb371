use thiserror::Error;

#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum UnescapeError {
    #[error("trailing backslash")]
    TrailingBackslash,
    #[error("invalid hex escape")]
    InvalidHex,
}

/// Expands C-style backslash escapes in command-line text.
///
/// Recognizes `\n`, `\r`, `\t`, `\0`, `\\`, `\'`, `\"` and `\xHH`. Unknown
/// escapes are kept verbatim, backslash included.
pub fn unescape(s: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => return Err(UnescapeError::TrailingBackslash),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('x') => {
                let hi = hex_digit(chars.next())?;
                let lo = hex_digit(chars.next())?;
                out.push(char::from((hi * 16 + lo) as u8));
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn hex_digit(c: Option<char>) -> Result<u32, UnescapeError> {
    c.and_then(|c| c.to_digit(16))
        .ok_or(UnescapeError::InvalidHex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(unescape("hello world").unwrap(), "hello world");
        assert_eq!(unescape("").unwrap(), "");
    }

    #[test]
    fn expands_common_escapes() {
        assert_eq!(unescape("a\\nb\\tc").unwrap(), "a\nb\tc");
        assert_eq!(unescape("\\\\\\\"\\'").unwrap(), "\\\"'");
        assert_eq!(unescape("\\0").unwrap(), "\0");
    }

    #[test]
    fn expands_hex_escapes() {
        assert_eq!(unescape("\\x41\\xFf").unwrap(), "A\u{FF}");
    }

    #[test]
    fn keeps_unknown_escapes_verbatim() {
        assert_eq!(unescape("\\q").unwrap(), "\\q");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(unescape("oops\\"), Err(UnescapeError::TrailingBackslash));
        assert_eq!(unescape("\\xZZ"), Err(UnescapeError::InvalidHex));
        assert_eq!(unescape("\\x4"), Err(UnescapeError::InvalidHex));
    }
}

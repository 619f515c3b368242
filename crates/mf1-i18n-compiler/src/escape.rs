//! Backslash escaping for literal pattern text.

pub(crate) fn is_escapable(byte: u8) -> bool {
    matches!(byte, b'\\' | b'#' | b'{' | b'}')
}

/// Escapes `\`, `#`, `{` and `}` so `text` parses back as a single literal.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() && is_escapable(ch as u8) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Resolves escape sequences. A backslash before any other character is kept.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii() && is_escapable(next as u8) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}

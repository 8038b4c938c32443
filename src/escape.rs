//! Escaping for text that lands inside a generated string literal.

/// Escape text for the literal part of an interpolated string: braces are
/// doubled, backslash and double quote get a backslash, and control
/// characters use their escape sequences.
pub fn escape_interpolated(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '{' => out.push_str("{{"),
            '}' => out.push_str("}}"),
            other => push_escaped(&mut out, other),
        }
    }
    out
}

/// Escape text for a regular (non-interpolated) string literal.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '"' => out.push_str("\\\""),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        other => out.push(other),
    }
}

/// Inverse of [`escape_interpolated`]: what the text part prints as once
/// the literal is evaluated.
pub fn unescape_interpolated(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' | '}' => {
                out.push(c);
                chars.next();
            }
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_braces_quotes_and_backslashes() {
        assert_eq!(escape_interpolated("\"{}\\"), "\\\"{{}}\\\\");
    }

    #[test]
    fn literal_escaping_leaves_braces_alone() {
        assert_eq!(escape_literal("{x} \"y\""), "{x} \\\"y\\\"");
    }

    #[test]
    fn control_characters_use_escape_sequences() {
        assert_eq!(escape_interpolated("a\nb\tc"), "a\\nb\\tc");
    }

    #[test]
    fn unescape_restores_original() {
        let text = "{{x}} \\ \"q\" \n";
        assert_eq!(unescape_interpolated(&escape_interpolated(text)), text);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_interpolated("Expected: x"), "Expected: x");
    }
}

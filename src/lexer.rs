use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    True,
    False,
    Null,
    Is,

    // Symbols
    LParen,   // (
    RParen,   // )
    Comma,    // ,
    Dot,      // .
    Colon,    // :
    Bang,     // !
    Arrow,    // =>
    EqEq,     // ==
    NotEq,    // !=
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=
    AndAnd,   // &&
    OrOr,     // ||
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %

    // Data
    Ident(String),
    Number(String),
    StringLit(String),
    CharLit(char),
}

/// Longest symbols first so `<=` wins over `<`.
const SYMBOLS: &[(&str, Token)] = &[
    ("=>", Token::Arrow),
    ("==", Token::EqEq),
    ("!=", Token::NotEq),
    ("<=", Token::LtEq),
    (">=", Token::GtEq),
    ("&&", Token::AndAnd),
    ("||", Token::OrOr),
    ("(", Token::LParen),
    (")", Token::RParen),
    (",", Token::Comma),
    (".", Token::Dot),
    (":", Token::Colon),
    ("!", Token::Bang),
    ("<", Token::Lt),
    (">", Token::Gt),
    ("+", Token::Plus),
    ("-", Token::Minus),
    ("*", Token::Star),
    ("/", Token::Slash),
    ("%", Token::Percent),
];

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    fn advance(&mut self, n: usize) {
        self.cursor += n;
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            let rest = self.remaining();
            let trimmed = rest.trim_start();
            self.advance(rest.len() - trimmed.len());

            let rest = self.remaining();
            if rest.starts_with("//") {
                let line_end = rest.find('\n').unwrap_or(rest.len());
                self.advance(line_end);
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => self.advance(end + 4),
                    None => return Err(Error::parse(self.cursor, "unterminated comment")),
                }
            } else {
                return Ok(());
            }
        }
    }

    /// Next token and the offset it starts at, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<(usize, Token)>> {
        self.skip_trivia()?;
        let start = self.cursor;
        let rest = self.remaining();
        let Some(first) = rest.chars().next() else {
            return Ok(None);
        };

        // Strings
        if first == '"' {
            let value = self.string_body(1, false)?;
            return Ok(Some((start, Token::StringLit(value))));
        }
        if rest.starts_with("@\"") {
            let value = self.string_body(2, true)?;
            return Ok(Some((start, Token::StringLit(value))));
        }
        if first == '\'' {
            return self.char_literal().map(|c| Some((start, Token::CharLit(c))));
        }

        if first.is_ascii_digit() {
            let len = number_len(rest);
            let digits = rest[..len].to_string();
            self.advance(len);
            return Ok(Some((start, Token::Number(digits))));
        }

        // Identifiers / Keywords
        if first.is_alphabetic() || first == '_' {
            let ident: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            self.advance(ident.len());

            let token = match ident.as_str() {
                "true" => Token::True,
                "false" => Token::False,
                "null" => Token::Null,
                "is" => Token::Is,
                _ => Token::Ident(ident),
            };
            return Ok(Some((start, token)));
        }

        for (text, token) in SYMBOLS {
            if rest.starts_with(text) {
                self.advance(text.len());
                return Ok(Some((start, token.clone())));
            }
        }

        Err(Error::parse(start, format!("unexpected character '{first}'")))
    }

    fn string_body(&mut self, prefix: usize, verbatim: bool) -> Result<String> {
        let start = self.cursor;
        self.advance(prefix);
        let mut value = String::new();
        let mut chars = self.remaining().char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            match c {
                '"' if verbatim && matches!(chars.peek(), Some((_, '"'))) => {
                    chars.next();
                    value.push('"');
                }
                '"' => {
                    self.advance(idx + 1);
                    return Ok(value);
                }
                '\\' if !verbatim => match chars.next() {
                    Some((_, esc)) => value.push(unescape_char(esc)),
                    None => break,
                },
                c => value.push(c),
            }
        }

        Err(Error::parse(start, "unterminated string literal"))
    }

    fn char_literal(&mut self) -> Result<char> {
        let start = self.cursor;
        let mut chars = self.remaining()[1..].char_indices();
        let value = match chars.next() {
            Some((_, '\\')) => chars.next().map(|(_, esc)| unescape_char(esc)),
            Some((_, '\'')) | None => None,
            Some((_, c)) => Some(c),
        };

        match (value, chars.next()) {
            (Some(c), Some((idx, '\''))) => {
                self.advance(idx + 2);
                Ok(c)
            }
            _ => Err(Error::parse(start, "malformed character literal")),
        }
    }
}

fn unescape_char(esc: char) -> char {
    match esc {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        other => other,
    }
}

/// Digits, an optional fraction and exponent, then suffix letters (`f`, `m`, `UL`).
fn number_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let radix_digits: Option<fn(&u8) -> bool> = match bytes.get(..2) {
        Some(b"0x" | b"0X") => Some(u8::is_ascii_hexdigit as fn(&u8) -> bool),
        Some(b"0b" | b"0B") => Some(is_binary_digit),
        _ => None,
    };
    if let Some(is_digit) = radix_digits {
        let len = 2 + bytes[2..]
            .iter()
            .take_while(|b| is_digit(b) || **b == b'_')
            .count();
        return len
            + bytes[len..]
                .iter()
                .take_while(|b| matches!(b, b'u' | b'U' | b'l' | b'L'))
                .count();
    }

    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit() || **b == b'_')
            .count()
    };

    let mut len = digits(0);
    if bytes.get(len) == Some(&b'.') && bytes.get(len + 1).is_some_and(u8::is_ascii_digit) {
        len += 1 + digits(len + 1);
    }
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        if bytes.get(len + 1 + sign).is_some_and(u8::is_ascii_digit) {
            len += 1 + sign + digits(len + 1 + sign);
        }
    }
    len + bytes[len..]
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count()
}

fn is_binary_digit(b: &u8) -> bool {
    matches!(b, b'0' | b'1')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Tokenizer::new(input);
        let mut out = Vec::new();
        while let Some((_, token)) = lexer.next_token().unwrap() {
            out.push(token);
        }
        out
    }

    #[test]
    fn comparison_symbols_prefer_longest_match() {
        assert_eq!(
            tokens("a <= b != c"),
            vec![
                Token::Ident("a".into()),
                Token::LtEq,
                Token::Ident("b".into()),
                Token::NotEq,
                Token::Ident("c".into()),
            ]
        );
    }

    #[test]
    fn comments_are_trivia() {
        assert_eq!(
            tokens("actual/* comment */ // trailing"),
            vec![Token::Ident("actual".into())]
        );
    }

    #[test]
    fn numbers_keep_their_spelling() {
        assert_eq!(
            tokens("1.5f 2e10 0xFF 10UL 3.Equals"),
            vec![
                Token::Number("1.5f".into()),
                Token::Number("2e10".into()),
                Token::Number("0xFF".into()),
                Token::Number("10UL".into()),
                Token::Number("3".into()),
                Token::Dot,
                Token::Ident("Equals".into()),
            ]
        );
    }

    #[test]
    fn radix_literals_take_their_suffix() {
        assert_eq!(
            tokens("0b1_01 0xFFul"),
            vec![Token::Number("0b1_01".into()), Token::Number("0xFFul".into())]
        );
    }

    #[test]
    fn string_escapes_are_decoded() {
        assert_eq!(
            tokens(r#""a\"b\n" @"c""d\""#),
            vec![
                Token::StringLit("a\"b\n".into()),
                Token::StringLit("c\"d\\".into()),
            ]
        );
    }

    #[test]
    fn char_literals() {
        assert_eq!(tokens(r"'x' '\t'"), vec![Token::CharLit('x'), Token::CharLit('\t')]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lexer = Tokenizer::new("\"open");
        assert_eq!(
            lexer.next_token(),
            Err(Error::parse(0, "unterminated string literal"))
        );
    }

    #[test]
    fn unknown_character_is_an_error() {
        let mut lexer = Tokenizer::new("a ? b");
        lexer.next_token().unwrap();
        assert!(matches!(lexer.next_token(), Err(Error::Parse { offset: 2, .. })));
    }
}

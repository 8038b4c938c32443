use crate::ast::*;
use crate::error::{Error, Result};
use crate::lexer::{Token, Tokenizer};
use std::collections::VecDeque;

/// Deepest nesting accepted. Every operator, member access, call,
/// parenthesis, cast and `not` opens one level.
pub const MAX_NESTING: usize = 100;

/// Recursive-descent reader for boolean assertion conditions.
pub struct Parser<'a> {
    lexer: Tokenizer<'a>,
    buffer: VecDeque<(usize, Token)>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Tokenizer::new(input),
            buffer: VecDeque::new(),
            depth: 0,
        }
    }

    /// Open one nesting level; callers reset `depth` to their mark when done.
    fn descend(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING {
            let offset = self.offset()?;
            return Err(Error::parse(
                offset,
                format!("expression nested deeper than {MAX_NESTING} levels"),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn fill(&mut self, n: usize) -> Result<()> {
        while self.buffer.len() <= n {
            match self.lexer.next_token()? {
                Some(token) => self.buffer.push_back(token),
                None => break,
            }
        }
        Ok(())
    }

    fn peek(&mut self, n: usize) -> Result<Option<&Token>> {
        self.fill(n)?;
        Ok(self.buffer.get(n).map(|(_, token)| token))
    }

    fn consume(&mut self) -> Result<Option<Token>> {
        self.fill(0)?;
        Ok(self.buffer.pop_front().map(|(_, token)| token))
    }

    /// Offset of the next token, or of the end of input.
    fn offset(&mut self) -> Result<usize> {
        self.fill(0)?;
        Ok(self
            .buffer
            .front()
            .map(|(offset, _)| *offset)
            .unwrap_or_else(|| self.lexer.offset()))
    }

    fn eat(&mut self, token: &Token) -> Result<bool> {
        if self.peek(0)? == Some(token) {
            self.consume()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        let offset = self.offset()?;
        match self.consume()? {
            Some(t) if t == token => Ok(()),
            Some(t) => Err(Error::parse(offset, format!("expected {token:?}, got {t:?}"))),
            None => Err(Error::parse(offset, format!("expected {token:?}, got end of input"))),
        }
    }

    /// Parse the whole input as one expression.
    pub fn parse(&mut self) -> Result<Expr> {
        let expr = self.parse_expr()?;
        let offset = self.offset()?;
        match self.peek(0)? {
            Some(t) => Err(Error::parse(offset, format!("unexpected trailing {t:?}"))),
            None => Ok(expr),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let mut lhs = self.parse_and()?;
        while self.eat(&Token::OrOr)? {
            self.descend()?;
            let rhs = self.parse_and()?;
            lhs = Expr::binary(BinaryOp::Or, lhs, rhs);
        }
        self.depth = mark;
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let mut lhs = self.parse_equality()?;
        while self.eat(&Token::AndAnd)? {
            self.descend()?;
            let rhs = self.parse_equality()?;
            lhs = Expr::binary(BinaryOp::And, lhs, rhs);
        }
        self.depth = mark;
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.peek(0)? {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                _ => break,
            };
            self.consume()?;
            self.descend()?;
            let rhs = self.parse_relational()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = mark;
        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let mut lhs = self.parse_additive()?;
        loop {
            if self.eat(&Token::Is)? {
                self.descend()?;
                let pattern = self.parse_pattern()?;
                lhs = Expr::is(lhs, pattern);
                continue;
            }
            let Some(op) = self.peek(0)?.and_then(relational_op) else {
                break;
            };
            self.consume()?;
            self.descend()?;
            let rhs = self.parse_additive()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = mark;
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek(0)? {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.consume()?;
            self.descend()?;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = mark;
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek(0)? {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => break,
            };
            self.consume()?;
            self.descend()?;
            let rhs = self.parse_unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = mark;
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let expr = if self.eat(&Token::Bang)? {
            self.descend()?;
            Expr::not(self.parse_unary()?)
        } else if self.eat(&Token::Minus)? {
            self.descend()?;
            let operand = self.parse_unary()?;
            Expr::Other(format!("-{operand}"))
        } else if let Some(type_name) = self.cast_type()? {
            // ( type )
            self.consume()?;
            self.consume()?;
            self.consume()?;
            self.descend()?;
            Expr::cast(type_name, self.parse_unary()?)
        } else {
            self.parse_postfix()?
        };
        self.depth = mark;
        Ok(expr)
    }

    /// `(bool)` and friends: only predefined type keywords start a cast.
    fn cast_type(&mut self) -> Result<Option<String>> {
        self.fill(2)?;
        let mut tokens = self.buffer.iter().map(|(_, token)| token);
        Ok(match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(Token::LParen), Some(Token::Ident(name)), Some(Token::RParen))
                if is_predefined_type(name) =>
            {
                Some(name.clone())
            }
            _ => None,
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let mut expr = self.parse_primary()?;

        // Handle suffixes: .member, (args)
        loop {
            match self.peek(0)? {
                Some(Token::Dot) => {
                    self.consume()?; // .
                    self.descend()?;
                    let offset = self.offset()?;
                    match self.consume()? {
                        Some(Token::Ident(member)) => expr = Expr::member(expr, member),
                        t => {
                            return Err(Error::parse(
                                offset,
                                format!("expected identifier after dot, got {t:?}"),
                            ))
                        }
                    }
                }
                Some(Token::LParen) => {
                    self.consume()?; // (
                    self.descend()?;
                    let args = self.parse_arguments()?;
                    expr = Expr::Invocation(Box::new(expr), args);
                }
                _ => break,
            }
        }

        self.depth = mark;
        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Argument>> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen)? {
            return Ok(args);
        }
        loop {
            let name = match (self.peek(0)?.cloned(), self.peek(1)?) {
                (Some(Token::Ident(name)), Some(Token::Colon)) => {
                    self.consume()?;
                    self.consume()?;
                    Some(name)
                }
                _ => None,
            };
            let value = self.parse_expr()?;
            args.push(Argument { name, value });

            if !self.eat(&Token::Comma)? {
                self.expect(Token::RParen)?;
                return Ok(args);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let mark = self.depth;
        let offset = self.offset()?;
        let expr = match self.consume()? {
            Some(Token::True) => Expr::Literal(Literal::Bool(true)),
            Some(Token::False) => Expr::Literal(Literal::Bool(false)),
            Some(Token::Null) => Expr::Literal(Literal::Null),
            Some(Token::Number(digits)) => Expr::number(digits),
            Some(Token::StringLit(s)) => Expr::string(s),
            Some(Token::CharLit(c)) => Expr::Literal(Literal::Char(c)),
            Some(Token::Ident(name)) => {
                if self.eat(&Token::Arrow)? {
                    self.descend()?;
                    let body = self.parse_expr()?;
                    Expr::Other(format!("{name} => {body}"))
                } else {
                    Expr::Identifier(name)
                }
            }
            Some(Token::LParen) => {
                self.descend()?;
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Expr::paren(inner)
            }
            Some(t) => return Err(Error::parse(offset, format!("expected expression, got {t:?}"))),
            None => return Err(Error::parse(offset, "expected expression, got end of input")),
        };
        self.depth = mark;
        Ok(expr)
    }

    fn parse_pattern(&mut self) -> Result<Pattern> {
        let mut pattern = self.parse_primary_pattern()?;
        loop {
            let combinator = match self.peek(0)? {
                Some(Token::Ident(word)) if word == "and" || word == "or" => word.clone(),
                _ => break,
            };
            self.consume()?;
            let rhs = self.parse_primary_pattern()?;
            pattern = Pattern::Other(format!("{pattern} {combinator} {rhs}"));
        }
        Ok(pattern)
    }

    fn parse_primary_pattern(&mut self) -> Result<Pattern> {
        if matches!(self.peek(0)?, Some(Token::Ident(word)) if word == "not") {
            self.consume()?;
            self.descend()?;
            let inner = self.parse_primary_pattern()?;
            self.depth -= 1;
            return Ok(Pattern::Not(Box::new(inner)));
        }
        if let Some(op) = self.peek(0)?.and_then(relational_op) {
            self.consume()?;
            let operand = self.parse_unary()?;
            return Ok(Pattern::Other(format!("{} {operand}", op.symbol())));
        }

        let expr = self.parse_unary()?;

        // Declaration pattern: `string s`
        match self.peek(0)? {
            Some(Token::Ident(word)) if word != "and" && word != "or" => {
                let designation = word.clone();
                self.consume()?;
                Ok(Pattern::Other(format!("{expr} {designation}")))
            }
            _ => Ok(Pattern::Constant(expr)),
        }
    }
}

fn relational_op(token: &Token) -> Option<BinaryOp> {
    match token {
        Token::Lt => Some(BinaryOp::Lt),
        Token::LtEq => Some(BinaryOp::LtEq),
        Token::Gt => Some(BinaryOp::Gt),
        Token::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expr {
        Parser::new(input).parse().unwrap()
    }

    #[test]
    fn comparison_binds_tighter_than_logical_and() {
        assert_eq!(
            parse("a == b && c < d"),
            Expr::binary(
                BinaryOp::And,
                Expr::binary(BinaryOp::Eq, Expr::ident("a"), Expr::ident("b")),
                Expr::binary(BinaryOp::Lt, Expr::ident("c"), Expr::ident("d")),
            )
        );
    }

    #[test]
    fn member_calls_chain() {
        assert_eq!(
            parse("string.Equals(actual, expected)"),
            Expr::call(
                Expr::member(Expr::ident("string"), "Equals"),
                vec![Expr::ident("actual"), Expr::ident("expected")],
            )
        );
    }

    #[test]
    fn double_negation_nests() {
        assert_eq!(parse("!!actual"), Expr::not(Expr::not(Expr::ident("actual"))));
    }

    #[test]
    fn cast_to_predefined_type() {
        assert_eq!(parse("(bool)actual"), Expr::cast("bool", Expr::ident("actual")));
        // Not a keyword type, so just a parenthesized identifier.
        assert_eq!(parse("(flag)"), Expr::paren(Expr::ident("flag")));
    }

    #[test]
    fn is_patterns() {
        assert_eq!(
            parse("actual is not null"),
            Expr::is(
                Expr::ident("actual"),
                Pattern::Not(Box::new(Pattern::Constant(Expr::Literal(Literal::Null)))),
            )
        );
        assert_eq!(parse("x is string s").to_string(), "x is string s");
        assert_eq!(parse("x is > 0 and < 10").to_string(), "x is > 0 and < 10");
    }

    #[test]
    fn lambda_arguments_keep_their_text() {
        assert_eq!(
            parse("actual.Any(x => x > 0)"),
            Expr::call(
                Expr::member(Expr::ident("actual"), "Any"),
                vec![Expr::Other("x => x > 0".into())],
            )
        );
    }

    #[test]
    fn named_arguments() {
        let expr = parse("actual.StartsWith(expected, ignoreCase: true, CultureInfo.InvariantCulture)");
        let Expr::Invocation(_, args) = expr else {
            panic!("expected invocation");
        };
        assert_eq!(args[1].name.as_deref(), Some("ignoreCase"));
        assert_eq!(args[2].value.to_string(), "CultureInfo.InvariantCulture");
    }

    #[test]
    fn unary_minus_is_kept_as_text() {
        assert_eq!(
            parse("actual == -1"),
            Expr::binary(BinaryOp::Eq, Expr::ident("actual"), Expr::Other("-1".into()))
        );
    }

    #[test]
    fn trailing_input_is_rejected() {
        let err = Parser::new("a b").parse().unwrap_err();
        assert!(matches!(err, Error::Parse { offset: 2, .. }));
    }

    #[test]
    fn deep_negation_is_rejected_not_overflowed() {
        let source = format!("{}actual", "!".repeat(200_000));
        let err = Parser::new(&source).parse().unwrap_err();
        // reported at the token after the first `!` past the limit
        assert_eq!(
            err,
            Error::parse(
                MAX_NESTING + 1,
                format!("expression nested deeper than {MAX_NESTING} levels")
            )
        );
    }

    #[test]
    fn long_operator_chain_is_rejected() {
        let source = vec!["a"; 10_000].join(" && ");
        assert!(matches!(
            Parser::new(&source).parse(),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let source = format!("{}a{}", "(".repeat(5_000), ")".repeat(5_000));
        assert!(matches!(
            Parser::new(&source).parse(),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn nesting_within_the_limit_parses() {
        let source = format!("{}actual", "!".repeat(MAX_NESTING));
        assert!(Parser::new(&source).parse().is_ok());
        let source = vec!["a"; 50].join(" && ");
        assert!(Parser::new(&source).parse().is_ok());
    }

    #[test]
    fn unclosed_call_is_rejected() {
        let err = Parser::new("actual.Any(").parse().unwrap_err();
        assert_eq!(
            err,
            Error::parse(11, "expected expression, got end of input")
        );
    }
}

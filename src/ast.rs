use std::fmt;

/// Predefined type keywords. A bare identifier spelled like one of these
/// names a type, never a value.
pub const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "nint", "nuint",
    "long", "ulong", "short", "ushort", "object", "string",
];

pub fn is_predefined_type(name: &str) -> bool {
    PREDEFINED_TYPES.contains(&name)
}

/// Framework names of the predefined types, e.g. `Double` for `double`.
const FRAMEWORK_TYPES: &[(&str, &str)] = &[
    ("Boolean", "bool"),
    ("Byte", "byte"),
    ("SByte", "sbyte"),
    ("Char", "char"),
    ("Decimal", "decimal"),
    ("Double", "double"),
    ("Single", "float"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("IntPtr", "nint"),
    ("UIntPtr", "nuint"),
    ("Int64", "long"),
    ("UInt64", "ulong"),
    ("Int16", "short"),
    ("UInt16", "ushort"),
    ("Object", "object"),
    ("String", "string"),
];

/// Keyword for a framework type name: `keyword_for("Single") == Some("float")`.
pub fn keyword_for(framework_name: &str) -> Option<&'static str> {
    FRAMEWORK_TYPES
        .iter()
        .find(|(name, _)| *name == framework_name)
        .map(|(_, keyword)| *keyword)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Null,
    Number(String), // raw digits as written, suffix included
    String(String), // decoded value
    Char(char),
}

impl Literal {
    /// The literal's value as plain text: no quotes, no escapes.
    pub fn value_text(&self) -> String {
        match self {
            Literal::Bool(b) => b.to_string(),
            Literal::Null => "null".to_string(),
            Literal::Number(n) => number_value_text(n),
            Literal::String(s) => s.clone(),
            Literal::Char(c) => c.to_string(),
        }
    }
}

/// Value of a numeric literal as text: separators, radix prefixes and type
/// suffixes are gone (`0x10` is `16`, `1.5f` is `1.5`, `1_000` is `1000`).
/// Text that does not parse is returned without its separators.
fn number_value_text(raw: &str) -> String {
    let text: String = raw.chars().filter(|c| *c != '_').collect();
    let lower = text.to_ascii_lowercase();

    for (prefix, radix) in [("0x", 16), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            let digits = digits.trim_end_matches(|c: char| c == 'u' || c == 'l');
            return u128::from_str_radix(digits, radix)
                .map(|value| value.to_string())
                .unwrap_or(text);
        }
    }

    let body = lower.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let parsed = match &lower[body.len()..] {
        // decimal keeps its scale: 1.50m is 1.50
        "m" => Some(body.to_string()),
        "f" => body.parse::<f32>().ok().map(|value| value.to_string()),
        "d" => body.parse::<f64>().ok().map(|value| value.to_string()),
        _ if body.contains(|c: char| c == '.' || c == 'e') => {
            body.parse::<f64>().ok().map(|value| value.to_string())
        }
        _ => body.parse::<u128>().ok().map(|value| value.to_string()),
    };
    parsed.unwrap_or(text)
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
            Literal::Number(n) => f.write_str(n),
            Literal::String(s) => {
                f.write_str("\"")?;
                write_escaped(f, s, '"')?;
                f.write_str("\"")
            }
            Literal::Char(c) => {
                f.write_str("'")?;
                write_escaped(f, &c.to_string(), '\'')?;
                f.write_str("'")
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str, quote: char) -> fmt::Result {
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\0' => f.write_str("\\0")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>, // ignoreCase: true
    pub value: Expr,
}

impl Argument {
    pub fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Right-hand side of an `is` test.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Constant(Expr),
    Not(Box<Pattern>),
    Other(String),
}

impl Pattern {
    pub fn is_null(&self) -> bool {
        matches!(self, Pattern::Constant(Expr::Literal(Literal::Null)))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Constant(expr) => write!(f, "{expr}"),
            Pattern::Not(inner) => write!(f, "not {inner}"),
            Pattern::Other(raw) => f.write_str(raw),
        }
    }
}

/// A boolean condition as handed over by the host. The message engine
/// only ever reads these.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(String),
    MemberAccess(Box<Expr>, String), // target.member
    Invocation(Box<Expr>, Vec<Argument>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    UnaryNot(Box<Expr>),
    Cast(String, Box<Expr>), // (type)operand
    Parenthesized(Box<Expr>),
    PatternTest(Box<Expr>, Box<Pattern>),
    Other(String),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn number(digits: impl Into<String>) -> Self {
        Expr::Literal(Literal::Number(digits.into()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn member(target: Expr, name: impl Into<String>) -> Self {
        Expr::MemberAccess(Box::new(target), name.into())
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Invocation(
            Box::new(callee),
            args.into_iter().map(Argument::positional).collect(),
        )
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn not(operand: Expr) -> Self {
        Expr::UnaryNot(Box::new(operand))
    }

    pub fn paren(inner: Expr) -> Self {
        Expr::Parenthesized(Box::new(inner))
    }

    pub fn cast(type_name: impl Into<String>, operand: Expr) -> Self {
        Expr::Cast(type_name.into(), Box::new(operand))
    }

    pub fn is(subject: Expr, pattern: Pattern) -> Self {
        Expr::PatternTest(Box::new(subject), Box::new(pattern))
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Identifier(name) => f.write_str(name),
            Expr::MemberAccess(target, name) => write!(f, "{target}.{name}"),
            Expr::Invocation(callee, args) => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::Binary(op, left, right) => write!(f, "{left} {} {right}", op.symbol()),
            Expr::UnaryNot(operand) => write!(f, "!{operand}"),
            Expr::Cast(type_name, operand) => write!(f, "({type_name}){operand}"),
            Expr::Parenthesized(inner) => write!(f, "({inner})"),
            Expr::PatternTest(subject, pattern) => write!(f, "{subject} is {pattern}"),
            Expr::Other(raw) => f.write_str(raw),
        }
    }
}

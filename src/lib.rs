//! that-message: failure messages for assertions written without one.
//!
//! Given the condition of an `Assert.That(condition)` call, this crate
//! produces the message argument a developer would otherwise have typed:
//!
//! - `actual == expected` becomes `$"actual; Expected: {expected}; But was: {actual}"`.
//! - `2 == 3` becomes the constant `"2; Expected: 3; But was: 2"`.
//! - `!actual` becomes `"Expected: actual to be false"`.
//!
//! The result is either a constant string or an interpolated string whose
//! placeholders are evaluated when the assertion fails.
//!
//! Recognized shapes:
//! - Comparisons (`==`, `!=`, `<`, `<=`, `>`, `>=`), flipped under negation.
//! - Logical not and parentheses, any depth.
//! - `Equals`, `ReferenceEquals`, `SequenceEqual`, `StartsWith`,
//!   `EndsWith`, `Contains`, `Any`, `All` and the floating-point
//!   `IsNaN`/`IsInfinity` checks, in free, instance and static call forms.
//! - Casts to `bool` and `is` pattern tests.
//!
//! Anything else falls back to `"Expected: <condition>"`. Recognition is
//! purely syntactic: no symbol is ever resolved.
//!
//! Synthesis is a pure function over an immutable tree and may be called
//! from any number of threads at once.

pub mod assert;
pub mod ast;
pub mod call_shape;
pub mod error;
pub mod escape;
pub mod eval;
mod invocation;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod synthesis;
pub mod template;

pub use ast::{Argument, BinaryOp, Expr, Literal, Pattern};
pub use error::{Error, Result};
pub use eval::{Evaluator, Value};
pub use synthesis::{synthesize, synthesize_with_negation};
pub use template::{Fragment, MessageBuilder, Template};

/// Read an assertion condition from source text.
pub fn parse_condition(source: &str) -> Result<Expr> {
    parser::Parser::new(source).parse()
}

/// Parse `source` and synthesize its message in one step.
pub fn message_for(source: &str) -> Result<Template> {
    Ok(synthesize(&parse_condition(source)?))
}

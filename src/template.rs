//! Message templates and the builder that assembles them.
//!
//! A message is built as an ordered list of fragments. Text fragments are
//! fixed when the message is generated; expression fragments are printed
//! with their run-time value when the assertion fails. A list that turns
//! out to hold only text collapses into a constant message.

use crate::ast::Expr;
use crate::escape::{escape_interpolated, escape_literal};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Expr(Expr),
}

/// The synthesized message.
///
/// Text inside [`Template::Live`] is stored already escaped for an
/// interpolated string literal; text inside [`Template::Constant`] is the
/// message itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Constant(String),
    /// Holds at least one [`Fragment::Expr`].
    Live(Vec<Fragment>),
}

impl Template {
    pub fn is_constant(&self) -> bool {
        matches!(self, Template::Constant(_))
    }

    /// Sub-expressions evaluated when the message is rendered.
    pub fn placeholders(&self) -> impl Iterator<Item = &Expr> {
        let fragments: &[Fragment] = match self {
            Template::Constant(_) => &[],
            Template::Live(fragments) => fragments,
        };
        fragments.iter().filter_map(|fragment| match fragment {
            Fragment::Expr(expr) => Some(expr),
            Fragment::Text(_) => None,
        })
    }
}

/// Source form: `"..."` for a constant, `$"...{expr}..."` for a live message.
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Constant(text) => write!(f, "\"{}\"", escape_literal(text)),
            Template::Live(fragments) => {
                f.write_str("$\"")?;
                for fragment in fragments {
                    match fragment {
                        Fragment::Text(text) => f.write_str(text)?,
                        Fragment::Expr(expr) => write!(f, "{{{expr}}}")?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

impl Serialize for Fragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Fragment", 1)?;
        match self {
            Fragment::Text(text) => state.serialize_field("text", text)?,
            Fragment::Expr(expr) => state.serialize_field("expr", &expr.to_string())?,
        }
        state.end()
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Template::Constant(text) => {
                let mut state = serializer.serialize_struct("Template", 2)?;
                state.serialize_field("kind", "constant")?;
                state.serialize_field("text", text)?;
                state.end()
            }
            Template::Live(fragments) => {
                let mut state = serializer.serialize_struct("Template", 3)?;
                state.serialize_field("kind", "live")?;
                state.serialize_field("source", &self.to_string())?;
                state.serialize_field("parts", fragments)?;
                state.end()
            }
        }
    }
}

/// Reduce a sub-expression before it becomes a placeholder.
///
/// Parentheses are dropped, `x.ToString()` becomes `x`, and a literal is
/// turned into its value text so it never becomes a placeholder.
pub fn simplify(expr: &Expr) -> Fragment {
    let mut current = expr;
    loop {
        match current {
            Expr::Parenthesized(inner) => current = inner,
            Expr::Invocation(callee, args) if args.is_empty() => match callee.as_ref() {
                Expr::MemberAccess(receiver, name) if name == "ToString" => current = receiver,
                _ => break,
            },
            _ => break,
        }
    }

    match current {
        Expr::Literal(lit) => Fragment::Text(lit.value_text()),
        other => Fragment::Expr(other.clone()),
    }
}

#[derive(Debug, Default, Clone)]
pub struct MessageBuilder {
    fragments: Vec<Fragment>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &str) -> Self {
        self.push_text(text.to_string());
        self
    }

    /// Append the printed source of a node as plain text.
    pub fn syntax(mut self, node: &impl fmt::Display) -> Self {
        self.push_text(node.to_string());
        self
    }

    /// Append a sub-expression whose value is shown at failure time.
    pub fn expr(mut self, expr: &Expr) -> Self {
        match simplify(expr) {
            Fragment::Text(text) => self.push_text(text),
            fragment => self.fragments.push(fragment),
        }
        self
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(Fragment::Text(last)) => last.push_str(&text),
            _ => self.fragments.push(Fragment::Text(text)),
        }
    }

    pub fn build(self) -> Template {
        let is_constant = self
            .fragments
            .iter()
            .all(|fragment| matches!(fragment, Fragment::Text(_)));

        if is_constant {
            let text = self
                .fragments
                .into_iter()
                .map(|fragment| match fragment {
                    Fragment::Text(text) => text,
                    Fragment::Expr(_) => unreachable!("constant message holds an expression"),
                })
                .collect();
            return Template::Constant(text);
        }

        Template::Live(
            self.fragments
                .into_iter()
                .map(|fragment| match fragment {
                    Fragment::Text(text) => Fragment::Text(escape_interpolated(&text)),
                    expr => expr,
                })
                .collect(),
        )
    }
}

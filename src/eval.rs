//! Failure-time rendering of live messages.
//!
//! A live message only becomes text once the assertion has failed and the
//! placeholders can be evaluated. The evaluator here resolves the simple
//! placeholder shapes the synthesizer emits (names, member paths, literals)
//! against a set of bindings.

use crate::ast::{Expr, Literal};
use crate::error::{Error, Result};
use crate::escape::unescape_interpolated;
use crate::template::{Fragment, Template};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Number(f64),
    Map(HashMap<String, Value>),
    Null,
}

impl Value {
    /// Read a value from its command-line spelling: `true`, `null`, `3.5`,
    /// anything else is a string.
    pub fn infer(text: &str) -> Self {
        match text {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            _ => text
                .parse::<f64>()
                .map(Value::Number)
                .unwrap_or_else(|_| Value::String(text.to_string())),
        }
    }

    fn from_literal(lit: &Literal) -> Self {
        match lit {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Null => Value::Null,
            Literal::Number(_) => Value::infer(&lit.value_text()),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Char(c) => Value::String(c.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Map(m) => {
                let mut keys: Vec<&String> = m.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {}", m[*key])?;
                }
                write!(f, "}}")
            }
            Value::Null => Ok(()), // interpolating null prints nothing
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Evaluator {
    bindings: HashMap<String, Value>,
}

impl Evaluator {
    pub fn new(bindings: HashMap<String, Value>) -> Self {
        Self { bindings }
    }

    /// Bind a name or a dotted member path (`some.result.val`).
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    fn get_var(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    /// Final failure text for `template`.
    pub fn render(&self, template: &Template) -> Result<String> {
        match template {
            Template::Constant(text) => Ok(text.clone()),
            Template::Live(fragments) => {
                let mut output = String::new();
                for fragment in fragments {
                    match fragment {
                        Fragment::Text(text) => output.push_str(&unescape_interpolated(text)),
                        Fragment::Expr(expr) => {
                            let value = self.eval_expr(expr)?;
                            output.push_str(&value.to_string());
                        }
                    }
                }
                Ok(output)
            }
        }
    }

    pub fn eval_expr(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(lit) => Ok(Value::from_literal(lit)),
            Expr::Identifier(name) => self
                .get_var(name)
                .ok_or_else(|| Error::Unbound(name.clone())),
            Expr::MemberAccess(target, member) => {
                // A binding for the whole path wins over walking the target.
                if let Some(value) = self.get_var(&expr.to_string()) {
                    return Ok(value);
                }
                match self.eval_expr(target)? {
                    Value::Map(m) => m
                        .get(member)
                        .cloned()
                        .ok_or_else(|| Error::Unbound(expr.to_string())),
                    _ => Err(Error::Unbound(expr.to_string())),
                }
            }
            Expr::Invocation(callee, args) if args.is_empty() => match callee.as_ref() {
                Expr::MemberAccess(receiver, name) if name == "ToString" => {
                    let value = self.eval_expr(receiver)?;
                    Ok(Value::String(value.to_string()))
                }
                _ => Err(Error::Unsupported(expr.to_string())),
            },
            Expr::Parenthesized(inner) => self.eval_expr(inner),
            _ => self
                .get_var(&expr.to_string())
                .ok_or_else(|| Error::Unsupported(expr.to_string())),
        }
    }
}

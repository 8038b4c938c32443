//! Syntactic classification of invocations.
//!
//! Nothing here resolves symbols. A receiver that is spelled like a type
//! keyword (or `Enumerable`) is taken to be a static call on that type;
//! any other receiver is taken to be a value.

use crate::ast::{is_predefined_type, keyword_for, Argument, Expr};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallShape<'a> {
    /// `Equals(actual, expected)`
    Free,
    /// `actual.Equals(expected)`
    Instance(&'a Expr),
    /// `string.Equals(actual, expected)`; holds the type name.
    Static(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call<'a> {
    pub name: &'a str,
    pub shape: CallShape<'a>,
    pub args: Vec<&'a Expr>,
}

/// Split an invocation into method name, call shape and argument values.
///
/// Returns `None` when the callee is neither a bare name nor a member
/// access, e.g. `factory()(x)`.
pub fn classify<'a>(callee: &'a Expr, args: &'a [Argument]) -> Option<Call<'a>> {
    let (name, shape) = match callee {
        Expr::Identifier(name) => (name.as_str(), CallShape::Free),
        Expr::MemberAccess(receiver, name) => {
            let shape = match type_name(receiver) {
                Some(type_name) => CallShape::Static(type_name),
                None => CallShape::Instance(receiver),
            };
            (name.as_str(), shape)
        }
        _ => return None,
    };

    Some(Call {
        name,
        shape,
        args: args.iter().map(|arg| &arg.value).collect(),
    })
}

/// Type named by a receiver, as its keyword when it has one. Accepts
/// `string`, `String`, `System.String`, `Enumerable` and
/// `System.Linq.Enumerable`.
fn type_name(receiver: &Expr) -> Option<&str> {
    match receiver {
        Expr::Identifier(name) if is_predefined_type(name) => Some(name.as_str()),
        Expr::Identifier(name) => framework_type(name),
        Expr::MemberAccess(namespace, name) if is_namespace(namespace) => framework_type(name),
        _ => None,
    }
}

fn framework_type(name: &str) -> Option<&'static str> {
    match name {
        "Enumerable" => Some("Enumerable"),
        other => keyword_for(other),
    }
}

fn is_namespace(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(_) => true,
        Expr::MemberAccess(outer, _) => is_namespace(outer),
        _ => false,
    }
}

/// What a trailing argument looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// `StringComparison.Ordinal`
    ComparisonMode,
    /// `CultureInfo.CurrentCulture`
    Culture,
    Value,
}

pub fn argument_kind(expr: &Expr) -> ArgumentKind {
    let Expr::MemberAccess(target, _) = expr else {
        return ArgumentKind::Value;
    };
    let enum_name = match target.as_ref() {
        Expr::Identifier(name) => name.as_str(),
        Expr::MemberAccess(_, name) => name.as_str(), // System.StringComparison.Ordinal
        _ => return ArgumentKind::Value,
    };
    match enum_name {
        "StringComparison" => ArgumentKind::ComparisonMode,
        "CultureInfo" => ArgumentKind::Culture,
        _ => ArgumentKind::Value,
    }
}

pub fn is_comparison_mode(expr: &Expr) -> bool {
    argument_kind(expr) == ArgumentKind::ComparisonMode
}

//! Message synthesis for assertion conditions.
//!
//! The condition tree is walked from the root with a `negate` flag that
//! flips every time a logical not is passed. Each recognized shape has its
//! own wording; everything else prints the condition text.

use crate::ast::{BinaryOp, Expr, Pattern};
use crate::invocation;
use crate::template::{MessageBuilder, Template};
use tracing::{debug, trace};

/// Build the failure message for `condition`.
pub fn synthesize(condition: &Expr) -> Template {
    synthesize_with_negation(condition, false)
}

/// Build the failure message for `condition` as seen through `negate`
/// logical nots.
pub fn synthesize_with_negation(condition: &Expr, negate: bool) -> Template {
    let template = provide(condition, negate).build();
    debug!(
        condition = %condition,
        negate,
        constant = template.is_constant(),
        "synthesized assertion message"
    );
    template
}

fn provide(condition: &Expr, negate: bool) -> MessageBuilder {
    match condition {
        Expr::Binary(op, left, right) => provide_binary(condition, *op, left, right, negate),
        Expr::UnaryNot(operand) => provide(operand, !negate),
        Expr::Invocation(callee, args) => invocation::provide(callee, args, negate)
            .unwrap_or_else(|| provide_default(condition, negate)),
        Expr::Cast(type_name, operand) => provide_cast(condition, type_name, operand, negate),
        Expr::PatternTest(subject, pattern) => provide_pattern(subject, pattern, negate),
        Expr::Parenthesized(inner) => provide(inner, negate),
        Expr::Literal(_) | Expr::Identifier(_) | Expr::MemberAccess(..) | Expr::Other(_) => {
            provide_default(condition, negate)
        }
    }
}

/// `actual; Expected: <phrase>expected`
pub(crate) fn expected_part(actual: &Expr, phrase: &str, expected: &Expr) -> MessageBuilder {
    MessageBuilder::new()
        .syntax(actual)
        .text("; Expected: ")
        .text(phrase)
        .expr(expected)
}

/// `; But was: actual`
pub(crate) fn but_was(builder: MessageBuilder, actual: &Expr) -> MessageBuilder {
    builder.text("; But was: ").expr(actual)
}

fn provide_binary(
    condition: &Expr,
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    negate: bool,
) -> MessageBuilder {
    let polarity = match (op, negate) {
        (BinaryOp::Eq, false) | (BinaryOp::NotEq, true) => "",
        (BinaryOp::Eq, true) | (BinaryOp::NotEq, false) => "not ",
        (BinaryOp::Lt, false) | (BinaryOp::GtEq, true) => "< ",
        (BinaryOp::LtEq, false) | (BinaryOp::Gt, true) => "<= ",
        (BinaryOp::Gt, false) | (BinaryOp::LtEq, true) => "> ",
        (BinaryOp::GtEq, false) | (BinaryOp::Lt, true) => ">= ",
        _ => return provide_default(condition, negate),
    };
    trace!(op = op.symbol(), negate, "comparison rule");
    but_was(expected_part(left, polarity, right), left)
}

fn provide_cast(condition: &Expr, type_name: &str, operand: &Expr, negate: bool) -> MessageBuilder {
    if !matches!(type_name, "bool" | "Boolean" | "System.Boolean") {
        return provide_default(condition, negate);
    }
    trace!(negate, "boolean cast rule");
    MessageBuilder::new()
        .text("Expected: ")
        .text(if negate { "not " } else { "" })
        .syntax(operand)
}

fn provide_pattern(subject: &Expr, pattern: &Pattern, negate: bool) -> MessageBuilder {
    // The test failing proves the subject is null; printing it again would
    // only re-evaluate it.
    let proven_null = match pattern {
        Pattern::Not(inner) => !negate && inner.is_null(),
        other => negate && other.is_null(),
    };
    trace!(negate, proven_null, "pattern rule");

    let builder = MessageBuilder::new()
        .syntax(subject)
        .text("; Expected: ")
        .text(if negate { "not " } else { "" })
        .syntax(pattern)
        .text("; But was: ");

    if proven_null {
        builder.text("null")
    } else {
        builder.expr(subject)
    }
}

fn provide_default(condition: &Expr, negate: bool) -> MessageBuilder {
    trace!(negate, "default rule");
    let builder = MessageBuilder::new().text("Expected: ").syntax(condition);
    if negate {
        builder.text(" to be false")
    } else {
        builder
    }
}

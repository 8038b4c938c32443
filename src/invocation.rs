use crate::ast::{Argument, Expr};
use crate::call_shape::{argument_kind, classify, is_comparison_mode, ArgumentKind, Call, CallShape};
use crate::synthesis::{but_was, expected_part};
use crate::template::MessageBuilder;
use tracing::trace;

/// Wording for a recognized method call, or `None` to fall back to the
/// default message.
pub(crate) fn provide(callee: &Expr, args: &[Argument], negate: bool) -> Option<MessageBuilder> {
    let call = classify(callee, args)?;
    trace!(method = call.name, args = call.args.len(), negate, "invocation rule");

    match call.name {
        "Equals" => equals(&call, negate),
        "ReferenceEquals" => reference_equals(&call, negate),
        "SequenceEqual" => sequence_equal(&call, negate),
        "StartsWith" => affix(&call, if negate { "does not start with " } else { "starts with " }),
        "EndsWith" => affix(&call, if negate { "does not end with " } else { "ends with " }),
        "Contains" => contains(&call, negate),
        "Any" => any(&call, negate),
        "All" => all(&call, negate),
        "IsNaN" => float_check(&call, if negate { "not a NaN" } else { "NaN" }),
        "IsInfinity" => float_check(&call, if negate { "not infinity" } else { "infinity" }),
        "IsPositiveInfinity" => float_check(
            &call,
            if negate { "not the positive infinity" } else { "positive infinity" },
        ),
        "IsNegativeInfinity" => float_check(
            &call,
            if negate { "not the negative infinity" } else { "negative infinity" },
        ),
        _ => None,
    }
}

fn plain(actual: &Expr, phrase: &str, expected: &Expr) -> MessageBuilder {
    but_was(expected_part(actual, phrase, expected), actual)
}

/// `actual; Expected: <phrase>expected (mode); But was: actual`
fn with_mode(actual: &Expr, phrase: &str, expected: &Expr, mode: &Expr) -> MessageBuilder {
    let builder = expected_part(actual, phrase, expected)
        .text(" (")
        .syntax(mode)
        .text(")");
    but_was(builder, actual)
}

fn equals(call: &Call<'_>, negate: bool) -> Option<MessageBuilder> {
    let phrase = if negate { "not " } else { "" };
    match (call.shape, call.args.as_slice()) {
        // Equals(actual, expected)
        (CallShape::Free, [actual, expected]) if !is_comparison_mode(expected) => {
            Some(plain(actual, phrase, expected))
        }
        // actual.Equals(expected)
        (CallShape::Instance(actual), [expected]) => Some(plain(actual, phrase, expected)),
        // actual.Equals(expected, StringComparison.*)
        (CallShape::Instance(actual), [expected, mode]) if is_comparison_mode(mode) => {
            Some(with_mode(actual, phrase, expected, mode))
        }
        // string.Equals(actual, expected)
        (CallShape::Static("string"), [actual, expected]) if !is_comparison_mode(expected) => {
            Some(plain(actual, phrase, expected))
        }
        // object.Equals(actual, expected)
        (CallShape::Static("object"), [actual, expected]) => Some(plain(actual, phrase, expected)),
        // string.Equals(actual, expected, StringComparison.*)
        (CallShape::Static("string"), [actual, expected, mode]) if is_comparison_mode(mode) => {
            Some(with_mode(actual, phrase, expected, mode))
        }
        _ => None,
    }
}

fn reference_equals(call: &Call<'_>, negate: bool) -> Option<MessageBuilder> {
    let phrase = if negate { "not same as " } else { "same as " };
    match (call.shape, call.args.as_slice()) {
        (CallShape::Free | CallShape::Static("object"), [actual, expected]) => {
            Some(plain(actual, phrase, expected))
        }
        (CallShape::Instance(actual), [expected]) => Some(plain(actual, phrase, expected)),
        _ => None,
    }
}

fn sequence_equal(call: &Call<'_>, negate: bool) -> Option<MessageBuilder> {
    let phrase = if negate { "not " } else { "" };
    match (call.shape, call.args.as_slice()) {
        (CallShape::Instance(actual), [expected]) => Some(plain(actual, phrase, expected)),
        (CallShape::Static("Enumerable"), [actual, expected]) => {
            Some(plain(actual, phrase, expected))
        }
        _ => None,
    }
}

/// StartsWith / EndsWith
fn affix(call: &Call<'_>, phrase: &str) -> Option<MessageBuilder> {
    let CallShape::Instance(actual) = call.shape else {
        return None;
    };
    match call.args.as_slice() {
        [expected] => Some(plain(actual, phrase, expected)),
        [expected, mode] if is_comparison_mode(mode) => {
            Some(with_mode(actual, phrase, expected, mode))
        }
        // actual.StartsWith(expected, ignoreCase, culture)
        [expected, ignore_case, culture]
            if matches!(
                argument_kind(culture),
                ArgumentKind::Culture | ArgumentKind::Value
            ) =>
        {
            let builder = expected_part(actual, phrase, expected)
                .text(" (ignore case: ")
                .expr(ignore_case)
                .text(", ")
                .syntax(culture)
                .text(")");
            Some(but_was(builder, actual))
        }
        _ => None,
    }
}

fn contains(call: &Call<'_>, negate: bool) -> Option<MessageBuilder> {
    let phrase = if negate { "does not contain " } else { "contains " };
    match (call.shape, call.args.as_slice()) {
        (CallShape::Instance(actual), [expected]) => Some(plain(actual, phrase, expected)),
        _ => None,
    }
}

fn any(call: &Call<'_>, negate: bool) -> Option<MessageBuilder> {
    let (expectation, observed) = if negate {
        ("all items do not satisfy ", "; But was: some items satisfy")
    } else {
        ("at least one item satisfies ", "; But was: none satisfy")
    };
    match (call.shape, call.args.as_slice()) {
        // actual.Any()
        (CallShape::Instance(actual), []) => Some(emptiness(actual, negate)),
        // Enumerable.Any(actual)
        (CallShape::Static("Enumerable"), [actual]) => Some(emptiness(actual, negate)),
        // actual.Any(predicate)
        (CallShape::Instance(actual), [predicate]) => {
            Some(quantified(actual, expectation, predicate, observed))
        }
        // Enumerable.Any(actual, predicate)
        (CallShape::Static("Enumerable"), [actual, predicate]) => {
            Some(quantified(actual, expectation, predicate, observed))
        }
        _ => None,
    }
}

fn all(call: &Call<'_>, negate: bool) -> Option<MessageBuilder> {
    let (expectation, observed) = if negate {
        ("some items do not satisfy ", "; But was: all items satisfy")
    } else {
        ("all items satisfy ", "; But was: some items do not satisfy")
    };
    match (call.shape, call.args.as_slice()) {
        (CallShape::Instance(actual), [predicate]) => {
            Some(quantified(actual, expectation, predicate, observed))
        }
        (CallShape::Static("Enumerable"), [actual, predicate]) => {
            Some(quantified(actual, expectation, predicate, observed))
        }
        _ => None,
    }
}

fn emptiness(actual: &Expr, negate: bool) -> MessageBuilder {
    let wording = if negate {
        "; Expected: <empty>; But was: not <empty>"
    } else {
        "; Expected: not <empty>; But was: <empty>"
    };
    MessageBuilder::new().syntax(actual).text(wording)
}

fn quantified(actual: &Expr, expectation: &str, predicate: &Expr, observed: &str) -> MessageBuilder {
    MessageBuilder::new()
        .syntax(actual)
        .text("; Expected: ")
        .text(expectation)
        .syntax(predicate)
        .text(observed)
}

/// double.IsNaN(actual) and the infinity checks.
fn float_check(call: &Call<'_>, phrase: &str) -> Option<MessageBuilder> {
    match (call.shape, call.args.as_slice()) {
        (CallShape::Free | CallShape::Static("double" | "float"), [actual]) => Some(
            MessageBuilder::new()
                .syntax(actual)
                .text("; Expected: ")
                .text(phrase)
                .text("; But was: ")
                .expr(actual),
        ),
        _ => None,
    }
}

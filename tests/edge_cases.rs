use that_message::{message_for, parse_condition, synthesize_with_negation, Error, Template};

// ── Edge cases beyond the common assertion shapes ──

fn message(condition: &str) -> String {
    message_for(condition).unwrap().to_string()
}

fn negated(condition: &str) -> String {
    synthesize_with_negation(&parse_condition(condition).unwrap(), true).to_string()
}

#[test]
fn braces_in_a_string_literal_are_doubled() {
    assert_eq!(
        message(r#""a{b}" == actual"#),
        r#"$"\"a{{b}}\"; Expected: {actual}; But was: a{{b}}""#
    );
}

#[test]
fn to_string_is_dropped_from_placeholders() {
    assert_eq!(
        message("actual.ToString() == expected.ToString()"),
        r#"$"actual.ToString(); Expected: {expected}; But was: {actual}""#
    );
}

#[test]
fn parenthesized_operands_become_bare_placeholders() {
    assert_eq!(
        message("(actual) == ((expected))"),
        r#"$"(actual); Expected: {expected}; But was: {actual}""#
    );
}

#[test]
fn named_arguments_are_matched_by_position() {
    assert_eq!(
        message("string.Equals(a: actual, b: expected)"),
        r#"$"actual; Expected: {expected}; But was: {actual}""#
    );
}

#[test]
fn fully_qualified_comparison_mode() {
    assert_eq!(
        message("actual.Equals(expected, System.StringComparison.Ordinal)"),
        r#"$"actual; Expected: {expected} (System.StringComparison.Ordinal); But was: {actual}""#
    );
}

#[test]
fn logical_operators_fall_back_to_the_condition_text() {
    assert_eq!(message("actual && other"), r#""Expected: actual && other""#);
    assert_eq!(
        message("!(actual || other)"),
        r#""Expected: actual || other to be false""#
    );
}

#[test]
fn unknown_methods_fall_back_to_the_condition_text() {
    assert_eq!(
        message("actual.IsValid(3)"),
        r#""Expected: actual.IsValid(3)""#
    );
    assert_eq!(message("factory()(x)"), r#""Expected: factory()(x)""#);
}

#[test]
fn negated_method_wording() {
    assert_eq!(
        message("!actual.StartsWith(expected)"),
        r#"$"actual; Expected: does not start with {expected}; But was: {actual}""#
    );
    assert_eq!(
        message("!actual.Contains(expected)"),
        r#"$"actual; Expected: does not contain {expected}; But was: {actual}""#
    );
    assert_eq!(
        message("!ReferenceEquals(actual, expected)"),
        r#"$"actual; Expected: not same as {expected}; But was: {actual}""#
    );
    assert_eq!(
        message("!actual.Equals(expected)"),
        r#"$"actual; Expected: not {expected}; But was: {actual}""#
    );
}

#[test]
fn negated_boolean_cast() {
    assert_eq!(message("!(bool)actual"), r#""Expected: not actual""#);
}

#[test]
fn relational_pattern_is_printed_as_written() {
    assert_eq!(
        message("actual is > 3"),
        r#"$"actual; Expected: > 3; But was: {actual}""#
    );
    assert_eq!(
        message("actual is string s"),
        r#"$"actual; Expected: string s; But was: {actual}""#
    );
}

#[test]
fn negate_flag_behaves_like_a_leading_not() {
    assert_eq!(negated("actual == expected"), message("actual != expected"));
    assert_eq!(negated("actual.Any()"), message("!actual.Any()"));
    assert_eq!(negated("!actual"), r#""Expected: actual""#);
}

#[test]
fn comments_and_whitespace_are_ignored() {
    assert_eq!(message("\tactual // why not"), r#""Expected: actual""#);
    assert_eq!(
        message("actual /* a */ == /* b */ 2"),
        r#"$"actual; Expected: 2; But was: {actual}""#
    );
}

#[test]
fn constant_message_has_no_placeholders() {
    let template = message_for("2 < 3").unwrap();
    assert!(template.is_constant());
    assert_eq!(template.placeholders().count(), 0);
    assert_eq!(
        template,
        Template::Constant("2; Expected: < 3; But was: 2".into())
    );
}

// ── Malformed input ──

#[test]
fn empty_condition_is_a_parse_error() {
    assert!(matches!(message_for(""), Err(Error::Parse { offset: 0, .. })));
    assert!(matches!(message_for("   "), Err(Error::Parse { .. })));
}

#[test]
fn dangling_operator_is_a_parse_error() {
    assert!(matches!(message_for("actual =="), Err(Error::Parse { .. })));
}

#[test]
fn unclosed_parenthesis_is_a_parse_error() {
    assert!(matches!(message_for("(actual"), Err(Error::Parse { .. })));
}

#[test]
fn runaway_nesting_is_a_parse_error() {
    let deep = format!("{}actual", "!".repeat(200_000));
    assert!(matches!(message_for(&deep), Err(Error::Parse { .. })));

    let long = vec!["a == b"; 5_000].join(" || ");
    assert!(matches!(message_for(&long), Err(Error::Parse { .. })));
}

#[test]
fn stray_character_is_a_parse_error() {
    assert!(matches!(message_for("actual # 2"), Err(Error::Parse { .. })));
}

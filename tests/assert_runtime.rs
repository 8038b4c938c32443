use std::panic::panic_any;
use that_message::assert::{that, that_template, that_with, throws, AssertionError};
use that_message::{message_for, Evaluator, Value};

#[derive(Debug, PartialEq)]
struct Boom(u32);

#[test]
fn passing_condition_is_ok() {
    assert_eq!(that(true), Ok(()));
    assert_eq!(that_with(true, "never shown"), Ok(()));
}

#[test]
fn failing_condition_uses_generic_or_given_message() {
    assert_eq!(
        that(false),
        Err(AssertionError::new("Expectation failed"))
    );
    assert_eq!(
        that_with(false, "Expected: actual").unwrap_err().to_string(),
        "Expected: actual"
    );
}

#[test]
fn synthesized_message_is_rendered_on_failure() {
    let template = message_for("actual == expected").unwrap();
    let mut evaluator = Evaluator::default();
    evaluator.bind("actual", Value::Number(2.0));
    evaluator.bind("expected", Value::Number(3.0));

    let err = that_template(false, &template, &evaluator).unwrap_err();
    assert_eq!(err.message, "actual; Expected: 3; But was: 2");
}

#[test]
fn synthesized_message_is_not_rendered_on_success() {
    let template = message_for("actual == expected").unwrap();
    assert_eq!(that_template(true, &template, &Evaluator::default()), Ok(()));
}

#[test]
fn unresolved_placeholder_falls_back_to_source_form() {
    let template = message_for("actual == expected").unwrap();
    let err = that_template(false, &template, &Evaluator::default()).unwrap_err();
    assert_eq!(
        err.message,
        "$\"actual; Expected: {expected}; But was: {actual}\""
    );
}

#[test]
fn throws_returns_the_payload_of_the_expected_type() {
    assert_eq!(throws::<Boom>(|| panic_any(Boom(7))), Ok(Boom(7)));
}

#[test]
fn throws_reports_a_missing_panic() {
    let err = throws::<Boom>(|| {}).unwrap_err();
    assert!(err.message.starts_with("Expected: Throws a "));
    assert!(err.message.contains("Boom"));
    assert!(err.message.ends_with("; But was: No exception"));
}

#[test]
fn throws_reports_a_panic_of_another_type() {
    let err = throws::<Boom>(|| panic!("disk on fire")).unwrap_err();
    assert!(err.message.contains("Boom"));
    assert!(err.message.ends_with("; But was: &str: disk on fire"));

    let code = 12;
    let err = throws::<Boom>(move || panic!("code {code}")).unwrap_err();
    assert!(err.message.ends_with("; But was: String: code 12"));
}

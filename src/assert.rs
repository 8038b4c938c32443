//! Assertion runtime: the calls whose missing messages this crate fills in.

use crate::eval::Evaluator;
use crate::template::Template;
use std::any::{type_name, Any};
use std::panic::{self, UnwindSafe};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionError {
    pub message: String,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fail with a generic message when `condition` is false.
pub fn that(condition: bool) -> Result<(), AssertionError> {
    that_with(condition, "Expectation failed")
}

pub fn that_with(condition: bool, message: impl Into<String>) -> Result<(), AssertionError> {
    if condition {
        Ok(())
    } else {
        Err(AssertionError::new(message))
    }
}

/// Fail with a synthesized message, rendered only once the condition is
/// known to be false. If a placeholder cannot be resolved the message falls
/// back to its source form.
pub fn that_template(
    condition: bool,
    template: &Template,
    evaluator: &Evaluator,
) -> Result<(), AssertionError> {
    if condition {
        return Ok(());
    }
    let message = evaluator
        .render(template)
        .unwrap_or_else(|_| template.to_string());
    Err(AssertionError::new(message))
}

/// Run `action` and return its panic payload when it panicked with an `E`.
pub fn throws<E: Any>(action: impl FnOnce() + UnwindSafe) -> Result<E, AssertionError> {
    let expected = type_name::<E>();
    match panic::catch_unwind(action) {
        Ok(()) => Err(AssertionError::new(format!(
            "Expected: Throws a {expected}; But was: No exception"
        ))),
        Err(payload) => match payload.downcast::<E>() {
            Ok(value) => Ok(*value),
            Err(other) => Err(AssertionError::new(format!(
                "Expected: Throws a {expected}; But was: {}",
                describe_panic(&*other)
            ))),
        },
    }
}

fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("&str: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("String: {message}")
    } else {
        "unknown panic payload".to_string()
    }
}

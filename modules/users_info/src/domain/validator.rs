//! Input rules gating every create and update.
//!
//! Checks run in a fixed order and the first failure wins:
//! presence, email format, age, email uniqueness.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use thiserror::Error;

use crate::contract::model::{NewUser, User, UserDraft};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Reasons a draft is rejected. The messages are part of the HTTP contract.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name, email and age are required")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Age must be a positive number")]
    InvalidAge,

    #[error("Email already exists")]
    DuplicateEmail,
}

/// Validate `draft` against the records currently stored.
///
/// `exclude_id` names the record being updated so it does not collide with
/// its own email.
pub fn validate(
    draft: &UserDraft,
    existing: &[User],
    exclude_id: Option<u64>,
) -> Result<NewUser, ValidationError> {
    let (Some(name), Some(email), Some(age)) = (
        non_empty_str(draft.name.as_ref()),
        non_empty_str(draft.email.as_ref()),
        draft.age.as_ref().filter(|v| is_truthy(v)),
    ) else {
        return Err(ValidationError::MissingFields);
    };

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    let age = match age {
        Value::Number(n) if n.as_f64().is_some_and(|a| a >= 0.0) => normalize_number(n),
        _ => return Err(ValidationError::InvalidAge),
    };

    if existing
        .iter()
        .any(|u| u.email == email && Some(u.id) != exclude_id)
    {
        return Err(ValidationError::DuplicateEmail);
    }

    Ok(NewUser {
        name: name.to_owned(),
        email: email.to_owned(),
        age,
    })
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Integral values sent in float form (`30.0`, `1e2`) are stored as plain
/// integers so they read back as `30` and `100`.
fn normalize_number(n: &Number) -> Number {
    // 2^53: above this f64 no longer holds every integer exactly
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT => {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Loose truthiness: null, false, 0 and "" count as absent.
/// An age of exactly 0 therefore reads as a missing field.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

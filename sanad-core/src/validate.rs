//! Per-field draft validation.
//!
//! Validation runs client-side before any network call; errors map to
//! message-catalog keys so the presentation layer can render them in the
//! active language. Nothing here ever reaches the wizard store or the
//! network layer.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::draft::{ApplicationDraft, Field, Step};

/// Minimum length for the step-3 narrative answers.
pub const NARRATIVE_MIN_LEN: usize = 50;

/// Oldest accepted age for the date-of-birth check.
const MAX_AGE_YEARS: u32 = 120;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("phone pattern is valid")
});

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Required,
    InvalidEmail,
    InvalidPhone,
    DateInFuture,
    InvalidDateOfBirth,
    TooShort { min: usize },
}

impl ErrorKind {
    /// The message-catalog key for this error.
    pub fn message_key(self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::InvalidEmail => "invalidEmail",
            ErrorKind::InvalidPhone => "invalidPhone",
            ErrorKind::DateInFuture => "dateCannotBeFuture",
            ErrorKind::InvalidDateOfBirth => "invalidDateOfBirth",
            ErrorKind::TooShort { .. } => "minLength",
        }
    }
}

/// One failed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
}

/// Validate every field collected on the given step.
pub fn validate_step(step: Step, draft: &ApplicationDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in Field::ALL.iter().copied().filter(|f| f.step() == step) {
        let value = draft.get(field).trim();

        if value.is_empty() {
            errors.push(FieldError {
                field,
                kind: ErrorKind::Required,
            });
            continue;
        }

        match field {
            Field::Email => {
                if !EMAIL_RE.is_match(value) {
                    errors.push(FieldError {
                        field,
                        kind: ErrorKind::InvalidEmail,
                    });
                }
            }
            Field::Phone => {
                if !PHONE_RE.is_match(value) {
                    errors.push(FieldError {
                        field,
                        kind: ErrorKind::InvalidPhone,
                    });
                }
            }
            Field::DateOfBirth => {
                if let Some(kind) = check_date_of_birth(value) {
                    errors.push(FieldError { field, kind });
                }
            }
            Field::CurrentSituation
            | Field::EmploymentCircumstances
            | Field::ReasonForApplying => {
                if value.chars().count() < NARRATIVE_MIN_LEN {
                    errors.push(FieldError {
                        field,
                        kind: ErrorKind::TooShort {
                            min: NARRATIVE_MIN_LEN,
                        },
                    });
                }
            }
            _ => {}
        }
    }

    errors
}

/// Validate all three data-entry steps (the review step collects nothing).
pub fn validate_all(draft: &ApplicationDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for step in [Step::FIRST, Step::clamp(2), Step::clamp(3)] {
        errors.extend(validate_step(step, draft));
    }
    errors
}

fn check_date_of_birth(value: &str) -> Option<ErrorKind> {
    let Ok(birth) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        return Some(ErrorKind::InvalidDateOfBirth);
    };
    let today = Utc::now().date_naive();
    if birth > today {
        return Some(ErrorKind::DateInFuture);
    }
    match today.years_since(birth) {
        Some(age) if age <= MAX_AGE_YEARS => None,
        _ => Some(ErrorKind::InvalidDateOfBirth),
    }
}

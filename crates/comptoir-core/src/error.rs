//! # Error Types
//!
//! Domain-specific error types for comptoir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comptoir-core errors (this file)                                      │
//! │  ├── CoreError         - Locale / currency parsing failures            │
//! │  ├── ValidationError   - One failed field rule                         │
//! │  └── ValidationErrors  - Every failed rule of one schema run           │
//! │                                                                         │
//! │  comptoir-store errors (separate crate)                                │
//! │  └── StoreError        - Key-value store failures (soft)               │
//! │                                                                         │
//! │  comptoir-runtime errors (separate crate)                              │
//! │  └── RuntimeError      - Config loading, missing Tokio runtime         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation error names the field it belongs to
//! 3. Messages are shown inline next to form fields, so they are French
//! 4. Pure calculations never return errors, they return sentinels

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// The formatting functions never surface these (they fall back to a
/// sentinel string); they are returned by the explicit parsers such as
/// [`Locale::parse`](crate::locale::Locale::parse).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Locale tag is not one of the supported BCP-47 tags.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Currency code is not one of the supported ISO-4217 codes.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single failed field rule.
///
/// ## Where These Come From
/// ```text
/// ClientInput { first_name: "", email: "bad" }
///      │
///      ▼
/// ClientInput::validate()
///      │
///      ├── Required { field: "first_name" }
///      └── InvalidFormat { field: "email", reason: "adresse e-mail invalide" }
///      │
///      ▼
/// UI shows each message under its field
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} est requis")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} doit contenir au moins {min} caractères")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} doit contenir au plus {max} caractères")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range (or not a finite number).
    #[error("{field} doit être compris entre {min} et {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Numeric value is below its lower bound.
    #[error("{field} doit être supérieur ou égal à {min}")]
    TooSmall { field: String, min: f64 },

    /// Numeric value is above its upper bound.
    #[error("{field} doit être inférieur ou égal à {max}")]
    TooLarge { field: String, max: f64 },

    /// Value must be strictly positive.
    #[error("{field} doit être strictement positif")]
    MustBePositive { field: String },

    /// Value must be a whole number.
    #[error("{field} doit être un nombre entier")]
    NotInteger { field: String },

    /// Invalid format (e-mail, phone, UUID, ...).
    #[error("{field} a un format invalide : {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Text contains a script or event-handler injection pattern.
    #[error("{field} contient du contenu non autorisé")]
    UnsafeContent { field: String },

    /// Field must equal another field (password confirmation).
    #[error("{field} ne correspond pas à {other}")]
    Mismatch { field: String, other: String },
}

impl ValidationError {
    /// Returns the field path this error is reported against.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooSmall { field, .. }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::NotInteger { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::UnsafeContent { field }
            | ValidationError::Mismatch { field, .. } => field,
        }
    }
}

/// Serializable `{ field, message }` pair handed to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldViolation {
    fn from(err: &ValidationError) -> Self {
        FieldViolation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors (aggregate)
// =============================================================================

/// Every rule that failed during one schema run.
///
/// A schema either returns its typed value or this list; there is no
/// partially valid result.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{} invalid field(s): {}", .0.len(), summary(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.field())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Records the error of a rule check, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.0.push(e);
        }
    }

    /// Passes through the value of a successful check and records the
    /// error of a failed one.
    pub fn take<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns the errors reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field() == field)
    }

    /// Converts into the serializable `{ field, message }` list.
    pub fn violations(&self) -> Vec<FieldViolation> {
        self.0.iter().map(FieldViolation::from).collect()
    }

    /// `Ok(value)` when no rule failed, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors(vec![err])
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email est requis");

        let err = ValidationError::TooShort {
            field: "name".to_string(),
            min: 3,
        };
        assert_eq!(err.to_string(), "name doit contenir au moins 3 caractères");

        let err = ValidationError::OutOfRange {
            field: "vat".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "vat doit être compris entre 0 et 100");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::Mismatch {
            field: "confirm_password".to_string(),
            other: "password".to_string(),
        };
        assert_eq!(err.field(), "confirm_password");
    }

    #[test]
    fn test_aggregate_into_result() {
        let errors = ValidationErrors::new();
        assert_eq!(errors.into_result(5), Ok(5));

        let mut errors = ValidationErrors::new();
        errors.check(Err(ValidationError::Required {
            field: "sku".to_string(),
        }));
        errors.check(Ok(()));
        assert_eq!(errors.len(), 1);
        let violations = errors.violations();
        assert_eq!(violations[0].field, "sku");
        assert_eq!(violations[0].message, "sku est requis");
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_core_error_names_the_rejected_tag() {
        let err = "xx-XX".parse::<crate::locale::Locale>().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedLocale(ref tag) if tag == "xx-XX"));
        assert_eq!(err.to_string(), "Unsupported locale: xx-XX");

        let err = "ZZZ".parse::<crate::locale::Currency>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency: ZZZ");
    }
}

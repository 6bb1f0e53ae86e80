//! # Validation Module
//!
//! Declarative field rules and the per-entity schemas built from them.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  Form / REST payload                                                    │
//! │       │  (deserialized into ClientInput, SaleInput, ...)                │
//! │       ▼                                                                 │
//! │  Schema::validate(input) ← THIS MODULE                                  │
//! │       │                                                                 │
//! │       ├── every StringRule / NumberRule runs (no early exit)            │
//! │       ├── cross-field rules (password confirmation)                     │
//! │       │                                                                 │
//! │       ├── any failure → Err(ValidationErrors) ─► inline field errors    │
//! │       └── all pass    → Ok(normalized value) ─► calculation / network   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strings are trimmed before they are measured, and lengths are counted in
//! characters. Optional strings that are blank after trimming become `None`.
//!
//! ## Usage
//! ```rust
//! use comptoir_core::validation::{LoginInput, Schema};
//!
//! let login = LoginInput {
//!     email: "  Caisse@Boutique.fr ".into(),
//!     password: "secret42".into(),
//! };
//! let login = login.validate().unwrap();
//! assert_eq!(login.email, "caisse@boutique.fr");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{ValidationError, ValidationErrors};

/// Result type for single-rule checks.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Patterns
// =============================================================================

/// `local@domain.tld` without whitespace, markup, quotes or brackets.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[^\s@<>"()\[\]\\:;,]+@[^\s@<>"'()\[\]\\:;,]+\.[^\s@<>"'()\[\]\\:;,]+$"#)
        .expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ().-]{8,20}$").expect("valid phone regex"));

/// `<script`, `javascript:` and inline `on<event>=` handlers.
static INJECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*script|javascript\s*:|\bon[a-z]+\s*=").expect("valid injection regex")
});

/// Returns `true` when `text` contains a script or event-handler injection.
///
/// ## Example
/// ```rust
/// use comptoir_core::validation::contains_injection;
///
/// assert!(contains_injection("<SCRIPT>alert(1)</script>"));
/// assert!(contains_injection("<img onerror=alert(1)>"));
/// assert!(!contains_injection("Bonjour, livraison lundi"));
/// ```
pub fn contains_injection(text: &str) -> bool {
    INJECTION_RE.is_match(text)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

// =============================================================================
// Field Rules
// =============================================================================

/// Format check attached to a string rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Email,
    Phone,
    Uuid,
}

impl TextFormat {
    fn accepts(&self, value: &str) -> bool {
        match self {
            TextFormat::Email => is_valid_email(value),
            TextFormat::Phone => is_valid_phone(value),
            TextFormat::Uuid => Uuid::parse_str(value).is_ok(),
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            TextFormat::Email => "adresse e-mail invalide",
            TextFormat::Phone => "numéro de téléphone invalide",
            TextFormat::Uuid => "identifiant invalide",
        }
    }
}

/// Constraints on one string field.
#[derive(Debug, Clone, PartialEq)]
pub struct StringRule {
    field: &'static str,
    min: Option<usize>,
    max: Option<usize>,
    format: Option<TextFormat>,
    safe_text: bool,
}

impl StringRule {
    pub const fn new(field: &'static str) -> Self {
        StringRule {
            field,
            min: None,
            max: None,
            format: None,
            safe_text: false,
        }
    }

    pub const fn min_len(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max_len(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub const fn format(mut self, format: TextFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Rejects script and event-handler injection patterns.
    pub const fn safe_text(mut self) -> Self {
        self.safe_text = true;
        self
    }

    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Checks a required value; returns it trimmed.
    pub fn check(&self, value: &str) -> ValidationResult<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::Required {
                field: self.field.to_string(),
            });
        }
        self.check_present(value)?;
        Ok(value.to_string())
    }

    /// Checks an optional value; blank values become `None`.
    pub fn check_optional(&self, value: Option<&str>) -> ValidationResult<Option<String>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => {
                self.check_present(value)?;
                Ok(Some(value.to_string()))
            }
        }
    }

    fn check_present(&self, value: &str) -> ValidationResult<()> {
        let len = value.chars().count();
        if let Some(min) = self.min {
            if len < min {
                return Err(ValidationError::TooShort {
                    field: self.field.to_string(),
                    min,
                });
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Err(ValidationError::TooLong {
                    field: self.field.to_string(),
                    max,
                });
            }
        }
        if let Some(format) = self.format {
            if !format.accepts(value) {
                return Err(ValidationError::InvalidFormat {
                    field: self.field.to_string(),
                    reason: format.reason().to_string(),
                });
            }
        }
        if self.safe_text && contains_injection(value) {
            return Err(ValidationError::UnsafeContent {
                field: self.field.to_string(),
            });
        }
        Ok(())
    }
}

/// Constraints on one numeric field. Non-finite values are always rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRule {
    field: &'static str,
    min: Option<f64>,
    max: Option<f64>,
    positive: bool,
    integer: bool,
}

impl NumberRule {
    pub const fn new(field: &'static str) -> Self {
        NumberRule {
            field,
            min: None,
            max: None,
            positive: false,
            integer: false,
        }
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Strictly greater than zero.
    pub const fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    pub const fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    pub fn check(&self, value: f64) -> ValidationResult<f64> {
        let field = || self.field.to_string();

        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: field(),
                reason: "nombre invalide".to_string(),
            });
        }
        if self.positive && value <= 0.0 {
            return Err(ValidationError::MustBePositive { field: field() });
        }
        if self.integer && value.fract() != 0.0 {
            return Err(ValidationError::NotInteger { field: field() });
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) if value < min || value > max => {
                Err(ValidationError::OutOfRange {
                    field: field(),
                    min,
                    max,
                })
            }
            (Some(min), None) if value < min => {
                Err(ValidationError::TooSmall { field: field(), min })
            }
            (None, Some(max)) if value > max => {
                Err(ValidationError::TooLarge { field: field(), max })
            }
            _ => Ok(value),
        }
    }
}

// =============================================================================
// Schemas
// =============================================================================

/// An input that validates into a normalized value.
pub trait Schema {
    type Output;

    /// Runs every rule; returns the normalized value or every failure.
    fn validate(self) -> Result<Self::Output, ValidationErrors>;
}

const EMAIL: StringRule = StringRule::new("email")
    .max_len(100)
    .format(TextFormat::Email)
    .safe_text();
const PHONE: StringRule = StringRule::new("phone").format(TextFormat::Phone);

fn person_name(field: &'static str) -> StringRule {
    StringRule::new(field).min_len(2).max_len(50).safe_text()
}

fn price(field: &'static str) -> NumberRule {
    NumberRule::new(field).min(0.0)
}

// -----------------------------------------------------------------------------
// Client
// -----------------------------------------------------------------------------

/// Client form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Schema for ClientInput {
    type Output = ClientInput;

    fn validate(self) -> Result<ClientInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let client = ClientInput {
            first_name: errors
                .take(person_name("first_name").check(&self.first_name))
                .unwrap_or_default(),
            last_name: errors
                .take(person_name("last_name").check(&self.last_name))
                .unwrap_or_default(),
            email: errors
                .take(EMAIL.check_optional(self.email.as_deref()))
                .flatten()
                .map(|email| email.to_lowercase()),
            phone: errors
                .take(PHONE.check_optional(self.phone.as_deref()))
                .flatten(),
            address: errors
                .take(
                    StringRule::new("address")
                        .max_len(200)
                        .safe_text()
                        .check_optional(self.address.as_deref()),
                )
                .flatten(),
            notes: errors
                .take(
                    StringRule::new("notes")
                        .max_len(500)
                        .safe_text()
                        .check_optional(self.notes.as_deref()),
                )
                .flatten(),
        };

        errors.into_result(client)
    }
}

// -----------------------------------------------------------------------------
// Product
// -----------------------------------------------------------------------------

/// Product form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub purchase_price: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub customs_tax: f64,
    #[serde(default)]
    pub vat: f64,
    #[serde(default)]
    pub other_fees: f64,
    #[serde(default)]
    pub stock: f64,
}

impl Schema for ProductInput {
    type Output = ProductInput;

    fn validate(self) -> Result<ProductInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let product = ProductInput {
            name: errors
                .take(
                    StringRule::new("name")
                        .min_len(2)
                        .max_len(100)
                        .safe_text()
                        .check(&self.name),
                )
                .unwrap_or_default(),
            description: errors
                .take(
                    StringRule::new("description")
                        .max_len(500)
                        .safe_text()
                        .check_optional(self.description.as_deref()),
                )
                .flatten(),
            category: errors
                .take(
                    StringRule::new("category")
                        .max_len(50)
                        .safe_text()
                        .check_optional(self.category.as_deref()),
                )
                .flatten(),
            purchase_price: errors
                .take(price("purchase_price").check(self.purchase_price))
                .unwrap_or_default(),
            selling_price: errors
                .take(price("selling_price").check(self.selling_price))
                .unwrap_or_default(),
            customs_tax: errors
                .take(price("customs_tax").check(self.customs_tax))
                .unwrap_or_default(),
            vat: errors
                .take(NumberRule::new("vat").min(0.0).max(100.0).check(self.vat))
                .unwrap_or_default(),
            other_fees: errors
                .take(price("other_fees").check(self.other_fees))
                .unwrap_or_default(),
            stock: errors
                .take(NumberRule::new("stock").min(0.0).integer().check(self.stock))
                .unwrap_or_default(),
        };

        errors.into_result(product)
    }
}

// -----------------------------------------------------------------------------
// Sale
// -----------------------------------------------------------------------------

/// Sale form, as typed by the cashier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleInput {
    pub product_id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    pub quantity: f64,
    pub selling_price: f64,
}

/// A sale that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidSale {
    #[ts(type = "string")]
    pub product_id: Uuid,
    #[ts(type = "string | null")]
    pub client_id: Option<Uuid>,
    pub quantity: u32,
    pub selling_price: f64,
}

/// Largest quantity accepted on one sale line.
pub const MAX_SALE_QUANTITY: f64 = 10_000.0;

fn parse_uuid(field: &'static str, value: &str) -> ValidationResult<Uuid> {
    let value = StringRule::new(field).format(TextFormat::Uuid).check(value)?;
    Uuid::parse_str(&value).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: TextFormat::Uuid.reason().to_string(),
    })
}

impl Schema for SaleInput {
    type Output = ValidSale;

    fn validate(self) -> Result<ValidSale, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let product_id = errors
            .take(parse_uuid("product_id", &self.product_id))
            .unwrap_or_default();
        let client_id = match self.client_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(id) => errors.take(parse_uuid("client_id", id)),
        };
        let quantity = errors
            .take(
                NumberRule::new("quantity")
                    .positive()
                    .integer()
                    .max(MAX_SALE_QUANTITY)
                    .check(self.quantity),
            )
            .unwrap_or_default();
        let selling_price = errors
            .take(price("selling_price").check(self.selling_price))
            .unwrap_or_default();

        errors.into_result(ValidSale {
            product_id,
            client_id,
            // integral and within (0, MAX_SALE_QUANTITY]
            quantity: quantity as u32,
            selling_price,
        })
    }
}

// -----------------------------------------------------------------------------
// Message
// -----------------------------------------------------------------------------

/// Internal message between staff members.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MessageInput {
    #[serde(default)]
    pub subject: Option<String>,
    pub content: String,
}

impl Schema for MessageInput {
    type Output = MessageInput;

    fn validate(self) -> Result<MessageInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let message = MessageInput {
            subject: errors
                .take(
                    StringRule::new("subject")
                        .max_len(100)
                        .safe_text()
                        .check_optional(self.subject.as_deref()),
                )
                .flatten(),
            content: errors
                .take(
                    StringRule::new("content")
                        .max_len(2000)
                        .safe_text()
                        .check(&self.content),
                )
                .unwrap_or_default(),
        };

        errors.into_result(message)
    }
}

// -----------------------------------------------------------------------------
// Credentials
// -----------------------------------------------------------------------------

/// Login form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Schema for LoginInput {
    type Output = LoginInput;

    fn validate(self) -> Result<LoginInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = errors.take(EMAIL.check(&self.email)).unwrap_or_default();
        // the password is never trimmed
        if self.password.is_empty() {
            errors.push(ValidationError::Required {
                field: "password".to_string(),
            });
        }

        errors.into_result(LoginInput {
            email: email.to_lowercase(),
            password: self.password,
        })
    }
}

/// Registration form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration that passed validation; the confirmation is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Minimum password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

fn check_password(password: &str) -> ValidationResult<()> {
    let len = password.chars().count();
    if len == 0 {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    if len > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "doit contenir au moins une lettre et un chiffre".to_string(),
        });
    }
    Ok(())
}

impl Schema for RegistrationInput {
    type Output = Registration;

    fn validate(self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors
            .take(person_name("name").check(&self.name))
            .unwrap_or_default();
        let email = errors.take(EMAIL.check(&self.email)).unwrap_or_default();
        errors.check(check_password(&self.password));
        if self.password != self.confirm_password {
            errors.push(ValidationError::Mismatch {
                field: "confirm_password".to_string(),
                other: "password".to_string(),
            });
        }

        errors.into_result(Registration {
            name,
            email: email.to_lowercase(),
            password: self.password,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

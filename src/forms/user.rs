//! Administrative user create/update forms.
//!
//! Mirrors the staff-management form semantics: the account status choice
//! maps onto `is_active`, the username is the normalized email, and the
//! password is confirmed before anything is persisted.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FieldErrors, push_error};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[\d\s()\-]{3,20}$").unwrap());

/// Account status choices offered by the staff form.
pub const STATUS_CHOICES: &[&str] = &["new", "active", "disabled"];

/// Create form for an administrative user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCreateForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role_id: Option<i32>,
    /// One of `new`, `active`, `disabled`.
    #[serde(default = "default_status")]
    pub status: String,
    pub password1: String,
    pub password2: String,
}

/// Update form for an administrative user. Passwords are optional; when
/// omitted the stored hash is kept.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserUpdateForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role_id: Option<i32>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub password1: Option<String>,
    #[serde(default)]
    pub password2: Option<String>,
}

fn default_status() -> String {
    "new".to_string()
}

/// A validated create form with normalized identity fields.
#[derive(Debug, Clone)]
pub struct ValidatedUserCreate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role_id: Option<i32>,
    pub is_active: bool,
    pub password: String,
}

/// A validated update form; `password` is set only when a change was
/// submitted.
#[derive(Debug, Clone)]
pub struct ValidatedUserUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role_id: Option<i32>,
    pub is_active: bool,
    pub password: Option<String>,
}

fn validate_common(
    email: &str,
    phone: &str,
    status: &str,
    errors: &mut FieldErrors,
) -> (String, bool) {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        push_error(errors, "email", "Email must not be empty");
    } else if !EMAIL_RE.is_match(&email) {
        push_error(errors, "email", "Enter a valid email address");
    }

    if !phone.trim().is_empty() && !PHONE_RE.is_match(phone.trim()) {
        push_error(errors, "phone", "Enter a valid phone number");
    }

    if !STATUS_CHOICES.contains(&status) {
        push_error(errors, "status", "Unknown status value");
    }

    (email, status == "active")
}

impl UserCreateForm {
    /// Validates the form, returning the normalized values or per-field
    /// errors. Nothing is persisted on failure.
    pub fn validate(self) -> Result<ValidatedUserCreate, FieldErrors> {
        let mut errors = FieldErrors::new();
        let (email, is_active) = validate_common(&self.email, &self.phone, &self.status, &mut errors);

        if self.password1.is_empty() {
            push_error(&mut errors, "password1", "Password must not be empty");
        } else if self.password1 != self.password2 {
            // Classic confirmation check: the error lands on the repeat field.
            push_error(&mut errors, "password2", "Passwords do not match");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedUserCreate {
            username: email.clone(),
            email,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            role_id: self.role_id,
            is_active,
            password: self.password1,
        })
    }
}

impl UserUpdateForm {
    pub fn validate(self) -> Result<ValidatedUserUpdate, FieldErrors> {
        let mut errors = FieldErrors::new();
        let (email, is_active) = validate_common(&self.email, &self.phone, &self.status, &mut errors);

        let password = match (
            self.password1.filter(|p| !p.is_empty()),
            self.password2.filter(|p| !p.is_empty()),
        ) {
            (None, None) => None,
            (Some(p1), Some(p2)) if p1 == p2 => Some(p1),
            _ => {
                push_error(&mut errors, "password2", "Passwords do not match");
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedUserUpdate {
            username: email.clone(),
            email,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            role_id: self.role_id,
            is_active,
            password,
        })
    }
}

//! User directory records and registration input.

use crate::model::form::{required_text, FieldErrors};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Stable identifier for a user. Immutable once created.
pub type UserId = Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Registered user. Credentials are handled outside of core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Raw registration submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl RegistrationForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            name: fields.get("name").cloned(),
            email: fields.get("email").cloned(),
        }
    }

    /// Validates the submission. Emails are normalized to lowercase.
    pub fn validate(&self) -> Result<RegistrationFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(self.name.as_deref());
        if name.is_none() {
            errors.add("name", "The name field is required.");
        }

        let email = required_text(self.email.as_deref()).map(|value| value.to_lowercase());
        match &email {
            None => errors.add("email", "The email field is required."),
            Some(value) if !EMAIL_RE.is_match(value) => {
                errors.add("email", "The email must be a valid email address.")
            }
            Some(_) => {}
        }

        errors.into_result(|| RegistrationFields {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
        })
    }
}

/// Validated registration fields accepted by the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFields {
    name: String,
    email: String,
}

impl RegistrationFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::RegistrationForm;

    #[test]
    fn validate_normalizes_email_case() {
        let fields = RegistrationForm::new("Ada", " Ada@Example.COM ")
            .validate()
            .expect("registration should validate");
        assert_eq!(fields.name(), "Ada");
        assert_eq!(fields.email(), "ada@example.com");
    }

    #[test]
    fn validate_rejects_malformed_email() {
        for email in ["ada", "ada@example", "a da@example.com", "@example.com"] {
            let errors = RegistrationForm::new("Ada", email)
                .validate()
                .expect_err("malformed email must fail");
            assert!(errors.contains("email"), "email `{email}` should be rejected");
        }
    }

    #[test]
    fn validate_requires_name() {
        let errors = RegistrationForm::new(" ", "ada@example.com")
            .validate()
            .expect_err("blank name must fail");
        assert!(errors.contains("name"));
        assert!(!errors.contains("email"));
    }
}

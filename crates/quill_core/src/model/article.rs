//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical article record and its submission form.
//! - Validate submitted title/body before any persistence happens.
//!
//! # Invariants
//! - `owner_id` is set once at creation and never changes.
//! - `title` and `body` are never empty after validation.
//! - `created_at <= updated_at`, both in Unix epoch milliseconds.

use crate::model::form::{required_text, FieldErrors};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Stable identifier for an article.
pub type ArticleId = Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// Canonical article record as persisted by the article store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    /// Owning user. Ownership never transfers.
    pub owner_id: UserId,
    pub title: String,
    pub body: String,
    /// Unix epoch milliseconds, set by the store on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed by the store on every update.
    pub updated_at: i64,
}

impl Article {
    /// Returns whether `user_id` owns this article.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Raw article submission, as received from a create or update request.
///
/// Fields are optional because a request may omit them entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleForm {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ArticleForm {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    /// Builds a form from submitted key/value pairs, ignoring unknown keys.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            title: fields.get("title").cloned(),
            body: fields.get("body").cloned(),
        }
    }

    /// Pre-fills a form with the current values of `article`.
    pub fn from_article(article: &Article) -> Self {
        Self::new(article.title.clone(), article.body.clone())
    }

    /// Validates the submission.
    ///
    /// Surrounding whitespace is trimmed; a title or body that is missing or
    /// blank after trimming is rejected, as is a title longer than
    /// `TITLE_MAX_CHARS`.
    pub fn validate(&self) -> Result<ArticleFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = required_text(self.title.as_deref());
        match &title {
            None => errors.add("title", "The title field is required."),
            Some(value) if value.chars().count() > TITLE_MAX_CHARS => errors.add(
                "title",
                format!("The title may not be greater than {TITLE_MAX_CHARS} characters."),
            ),
            Some(_) => {}
        }

        let body = required_text(self.body.as_deref());
        if body.is_none() {
            errors.add("body", "The body field is required.");
        }

        errors.into_result(|| ArticleFields {
            title: title.unwrap_or_default(),
            body: body.unwrap_or_default(),
        })
    }
}

/// Validated article fields accepted by the article store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    title: String,
    body: String,
}

impl ArticleFields {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::{ArticleForm, TITLE_MAX_CHARS};
    use std::collections::HashMap;

    #[test]
    fn validate_trims_and_accepts_non_empty_fields() {
        let fields = ArticleForm::new("  Hello ", "world\n")
            .validate()
            .expect("form should validate");
        assert_eq!(fields.title(), "Hello");
        assert_eq!(fields.body(), "world");
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let errors = ArticleForm::default()
            .validate()
            .expect_err("empty form must fail");
        assert!(errors.contains("title"));
        assert!(errors.contains("body"));
    }

    #[test]
    fn validate_rejects_whitespace_only_body() {
        let errors = ArticleForm::new("title", "   ")
            .validate()
            .expect_err("blank body must fail");
        assert!(!errors.contains("title"));
        assert!(errors.contains("body"));
    }

    #[test]
    fn validate_rejects_overlong_title() {
        let title = "x".repeat(TITLE_MAX_CHARS + 1);
        let errors = ArticleForm::new(title, "body")
            .validate()
            .expect_err("overlong title must fail");
        assert!(errors
            .get("title")
            .expect("title error")
            .contains("greater than"));
    }

    #[test]
    fn from_fields_ignores_unknown_keys() {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), "t".to_string());
        fields.insert("_token".to_string(), "csrf".to_string());
        let form = ArticleForm::from_fields(&fields);
        assert_eq!(form.title.as_deref(), Some("t"));
        assert_eq!(form.body, None);
    }
}

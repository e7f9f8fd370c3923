//! Framework-agnostic request layer.
//!
//! # Responsibility
//! - Map HTTP-shaped requests onto user and article use-cases.
//! - Turn use-case failures into redirects, 403s and 404s at one boundary.
//!
//! # Invariants
//! - Handlers never panic and never propagate errors; every outcome is a
//!   `Response`.
//! - Anonymous write attempts redirect to `LOGIN_PATH`; authenticated
//!   non-owners get `Response::Forbidden`.

pub mod handlers;
pub mod page;
pub mod request;
pub mod router;

pub use page::{Page, EDIT_AFFORDANCE};
pub use request::{Method, Request, Response};
pub use router::{resolve, App, Route};

/// Login entry point; anonymous write attempts are sent here.
pub const LOGIN_PATH: &str = "/login";

/// Canonical show path for an article.
pub fn article_path(id: crate::model::article::ArticleId) -> String {
    format!("/articles/{id}")
}

/// Canonical profile path for a user.
pub fn user_path(id: crate::model::user::UserId) -> String {
    format!("/users/{id}")
}

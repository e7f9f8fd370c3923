//! Core domain logic for Quill: users author articles and only owners may
//! change or remove them.
//!
//! Layering, leaves first: `model` → `db` → `repo` → `auth` → `service` →
//! `web`.

pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod web;

pub use auth::guard::{authorize, can_modify, require_authenticated, Action, GuardError};
pub use auth::identity::Identity;
pub use config::{AppConfig, ConfigError, DbLocation};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::article::{Article, ArticleFields, ArticleForm, ArticleId, TITLE_MAX_CHARS};
pub use model::form::FieldErrors;
pub use model::user::{RegistrationFields, RegistrationForm, User, UserId};
pub use repo::article_repo::{ArticleListQuery, ArticleRepository, SqliteArticleRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::article_service::{ArticleService, ArticleView, ServiceError, ServiceResult};
pub use service::user_service::UserService;
pub use web::{App, Method, Page, Request, Response, Route};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Ownership guard for article actions.
//!
//! # Responsibility
//! - Gate edit, update and delete on article ownership.
//! - Distinguish "not logged in" from "logged in but not the owner" so the
//!   request layer can redirect or forbid accordingly.
//!
//! # Invariants
//! - `can_modify` is true iff the identity is authenticated and equals the
//!   article owner.
//! - Viewing an article is never restricted.

use crate::auth::identity::Identity;
use crate::model::article::{Article, ArticleId};
use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Action requested on an existing article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Edit,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns whether the action mutates (or prepares to mutate) the article.
    pub fn is_write(self) -> bool {
        !matches!(self, Self::View)
    }
}

/// Authorization denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// No authenticated identity; the caller should log in first.
    Unauthenticated,
    /// Authenticated, but not the article owner.
    Forbidden {
        user_id: UserId,
        article_id: ArticleId,
        action: Action,
    },
}

impl Display for GuardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "authentication required"),
            Self::Forbidden {
                user_id,
                article_id,
                action,
            } => write!(
                f,
                "user {user_id} may not {} article {article_id}",
                action.as_str()
            ),
        }
    }
}

impl Error for GuardError {}

/// Returns whether `identity` may edit, update or delete `article`.
pub fn can_modify(identity: &Identity, article: &Article) -> bool {
    identity
        .user_id()
        .is_some_and(|user_id| article.is_owned_by(user_id))
}

/// Requires an authenticated identity, returning its user id.
pub fn require_authenticated(identity: &Identity) -> Result<UserId, GuardError> {
    identity.user_id().ok_or(GuardError::Unauthenticated)
}

/// Authorizes `action` on `article` for `identity`.
///
/// Anonymous callers get `Unauthenticated` for every write action, before
/// ownership is considered.
pub fn authorize(identity: &Identity, article: &Article, action: Action) -> Result<(), GuardError> {
    if !action.is_write() {
        return Ok(());
    }

    let user_id = require_authenticated(identity)?;
    if article.is_owned_by(user_id) {
        return Ok(());
    }

    Err(GuardError::Forbidden {
        user_id,
        article_id: article.id,
        action,
    })
}

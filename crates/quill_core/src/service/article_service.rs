//! Article use-case service.
//!
//! # Responsibility
//! - Orchestrate show/create/edit/update/delete for articles.
//! - Translate guard and repository failures into use-case errors.
//!
//! # Invariants
//! - Write use-cases check authentication first, then existence, then
//!   ownership.
//! - Update mutates only title/body; id, owner and `created_at` are kept.

use crate::auth::guard::{authorize, can_modify, require_authenticated, Action, GuardError};
use crate::auth::identity::Identity;
use crate::model::article::{Article, ArticleForm, ArticleId};
use crate::model::form::FieldErrors;
use crate::model::user::UserId;
use crate::repo::article_repo::{ArticleListQuery, ArticleRepository};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case error for article and user services.
#[derive(Debug)]
pub enum ServiceError {
    /// Target record does not exist.
    NotFound { entity: &'static str, id: uuid::Uuid },
    /// Write attempted without an authenticated identity.
    Unauthenticated,
    /// Authenticated identity is not allowed to perform the action.
    Forbidden(GuardError),
    /// Submitted fields failed validation; nothing was written.
    Validation(FieldErrors),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Unauthenticated => write!(f, "authentication required"),
            Self::Forbidden(err) => write!(f, "{err}"),
            Self::Validation(errors) => write!(f, "validation failed: {errors}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Forbidden(err) => Some(err),
            Self::Validation(errors) => Some(errors),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GuardError> for ServiceError {
    fn from(value: GuardError) -> Self {
        match value {
            GuardError::Unauthenticated => Self::Unauthenticated,
            forbidden @ GuardError::Forbidden { .. } => Self::Forbidden(forbidden),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::UnknownOwner(_) => Self::Unauthenticated,
            other => Self::Repo(other),
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Article as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub article: Article,
    /// Whether the viewer may edit or delete the article.
    pub is_owner: bool,
}

/// Use-case service for articles.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads an article for display. Viewing is open to every identity.
    pub fn show(&self, identity: &Identity, id: ArticleId) -> ServiceResult<ArticleView> {
        let article = self.load(id)?;
        authorize(identity, &article, Action::View)?;
        let is_owner = can_modify(identity, &article);
        Ok(ArticleView { article, is_owner })
    }

    pub fn list(&self, query: &ArticleListQuery) -> ServiceResult<Vec<Article>> {
        Ok(self.repo.list_articles(query)?)
    }

    pub fn list_by_owner(&self, owner_id: UserId) -> ServiceResult<Vec<Article>> {
        Ok(self.repo.list_by_owner(owner_id)?)
    }

    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count_articles()?)
    }

    /// Checks that `identity` may open the create form.
    pub fn prepare_create(&self, identity: &Identity) -> ServiceResult<UserId> {
        Ok(require_authenticated(identity)?)
    }

    /// Validates `form` and stores a new article owned by `identity`.
    pub fn create(&self, identity: &Identity, form: &ArticleForm) -> ServiceResult<Article> {
        let owner_id = require_authenticated(identity)?;
        let fields = form.validate()?;
        Ok(self.repo.create_article(&fields, owner_id)?)
    }

    /// Loads an article the caller is about to edit.
    pub fn load_for_edit(&self, identity: &Identity, id: ArticleId) -> ServiceResult<Article> {
        self.load_authorized(identity, id, Action::Edit)
    }

    /// Validates `form` and replaces title/body of an owned article.
    pub fn update(
        &self,
        identity: &Identity,
        id: ArticleId,
        form: &ArticleForm,
    ) -> ServiceResult<Article> {
        self.load_authorized(identity, id, Action::Update)?;
        let fields = form.validate()?;
        Ok(self.repo.update_article(id, &fields)?)
    }

    /// Removes an owned article and returns the record as it was.
    pub fn delete(&self, identity: &Identity, id: ArticleId) -> ServiceResult<Article> {
        let article = self.load_authorized(identity, id, Action::Delete)?;
        self.repo.delete_article(id)?;
        Ok(article)
    }

    fn load(&self, id: ArticleId) -> ServiceResult<Article> {
        self.repo
            .get_article(id)?
            .ok_or(ServiceError::NotFound {
                entity: "article",
                id,
            })
    }

    fn load_authorized(
        &self,
        identity: &Identity,
        id: ArticleId,
        action: Action,
    ) -> ServiceResult<Article> {
        require_authenticated(identity)?;
        let article = self.load(id)?;
        authorize(identity, &article, action)?;
        Ok(article)
    }
}

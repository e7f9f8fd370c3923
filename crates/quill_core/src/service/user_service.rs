//! User directory use-cases: registration and profiles.

use crate::auth::identity::Identity;
use crate::model::form::FieldErrors;
use crate::model::user::{RegistrationForm, User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::article_service::{ServiceError, ServiceResult};

/// Use-case service for the user directory.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates `form` and creates a user.
    ///
    /// A taken email is reported as a field error, like any other invalid
    /// input.
    pub fn register(&self, form: &RegistrationForm) -> ServiceResult<User> {
        let fields = form.validate()?;
        match self.repo.create_user(&fields) {
            Ok(user) => Ok(user),
            Err(RepoError::Conflict(_)) => {
                let mut errors = FieldErrors::new();
                errors.add("email", "The email has already been taken.");
                Err(ServiceError::Validation(errors))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Downgrades an authenticated identity the directory does not know to
    /// `Anonymous`.
    pub fn resolve_identity(&self, identity: &Identity) -> ServiceResult<Identity> {
        match identity.user_id() {
            Some(id) if self.repo.get_user(id)?.is_none() => Ok(Identity::Anonymous),
            _ => Ok(*identity),
        }
    }

    pub fn profile(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .get_user(id)?
            .ok_or(ServiceError::NotFound { entity: "user", id })
    }
}

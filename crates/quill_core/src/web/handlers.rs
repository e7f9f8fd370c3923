//! Request handlers for auth entry points, profiles and articles.
//!
//! # Invariants
//! - Each handler performs at most one store mutation.
//! - Failures are logged with ids only; titles, bodies and emails never
//!   reach the log.

use crate::auth::identity::Identity;
use crate::model::article::{ArticleForm, ArticleId};
use crate::model::form::FieldErrors;
use crate::model::user::{RegistrationForm, UserId};
use crate::repo::article_repo::{ArticleListQuery, ArticleRepository};
use crate::repo::user_repo::UserRepository;
use crate::service::article_service::{ArticleService, ServiceError};
use crate::service::user_service::UserService;
use crate::web::page::Page;
use crate::web::request::Response;
use crate::web::{article_path, user_path, LOGIN_PATH};
use log::{error, info, warn};

/// Maximum number of articles on the index page.
pub const ARTICLE_INDEX_LIMIT: u32 = 50;

pub fn register_page() -> Response {
    Response::Page(Page::Register {
        form: RegistrationForm::default(),
        errors: FieldErrors::new(),
    })
}

/// Creates a user and redirects to the new profile.
pub fn register_submit<U: UserRepository>(
    users: &UserService<U>,
    identity: &Identity,
    form: &RegistrationForm,
) -> Response {
    match users.register(form) {
        Ok(user) => {
            info!(
                "event=user_register module=web status=ok user_id={}",
                user.id
            );
            Response::redirect(user_path(user.id))
        }
        Err(ServiceError::Validation(errors)) => {
            info!(
                "event=user_register module=web status=invalid fields={}",
                errors.len()
            );
            Response::Page(Page::Register {
                form: form.clone(),
                errors,
            })
        }
        Err(err) => failure("user_register", identity, err),
    }
}

pub fn login_page() -> Response {
    Response::Page(Page::Login)
}

/// Profile page listing the user's articles.
pub fn show_user<U: UserRepository, A: ArticleRepository>(
    users: &UserService<U>,
    articles: &ArticleService<A>,
    identity: &Identity,
    id: UserId,
) -> Response {
    let user = match users.profile(id) {
        Ok(user) => user,
        Err(err) => return failure("user_show", identity, err),
    };

    match articles.list_by_owner(user.id) {
        Ok(articles) => Response::Page(Page::UserProfile { user, articles }),
        Err(err) => failure("user_show", identity, err),
    }
}

pub fn list_articles<A: ArticleRepository>(
    articles: &ArticleService<A>,
    identity: &Identity,
) -> Response {
    let query = ArticleListQuery {
        limit: Some(ARTICLE_INDEX_LIMIT),
        ..ArticleListQuery::default()
    };

    match articles.list(&query) {
        Ok(articles) => Response::Page(Page::ArticleIndex { articles }),
        Err(err) => failure("article_list", identity, err),
    }
}

pub fn show_article<A: ArticleRepository>(
    articles: &ArticleService<A>,
    identity: &Identity,
    id: ArticleId,
) -> Response {
    match articles.show(identity, id) {
        Ok(view) => Response::Page(Page::ArticleShow(view)),
        Err(err) => failure("article_show", identity, err),
    }
}

pub fn create_article_page<A: ArticleRepository>(
    articles: &ArticleService<A>,
    identity: &Identity,
) -> Response {
    match articles.prepare_create(identity) {
        Ok(_) => Response::Page(Page::ArticleCreate {
            form: ArticleForm::default(),
            errors: FieldErrors::new(),
        }),
        Err(err) => failure("article_create_form", identity, err),
    }
}

/// Stores a new article and redirects to its show page.
pub fn store_article<A: ArticleRepository>(
    articles: &ArticleService<A>,
    identity: &Identity,
    form: &ArticleForm,
) -> Response {
    match articles.create(identity, form) {
        Ok(article) => {
            info!(
                "event=article_create module=web status=ok article_id={} owner_id={}",
                article.id, article.owner_id
            );
            Response::redirect(article_path(article.id))
        }
        Err(ServiceError::Validation(errors)) => {
            info!(
                "event=article_create module=web status=invalid identity={} fields={}",
                identity,
                errors.len()
            );
            Response::Page(Page::ArticleCreate {
                form: form.clone(),
                errors,
            })
        }
        Err(err) => failure("article_create", identity, err),
    }
}

pub fn edit_article_page<A: ArticleRepository>(
    articles: &ArticleService<A>,
    identity: &Identity,
    id: ArticleId,
) -> Response {
    match articles.load_for_edit(identity, id) {
        Ok(article) => Response::Page(Page::ArticleEdit {
            form: ArticleForm::from_article(&article),
            article,
            errors: FieldErrors::new(),
        }),
        Err(err) => failure("article_edit_form", identity, err),
    }
}

/// Replaces title/body of an owned article and redirects to its show page.
pub fn update_article<A: ArticleRepository>(
    articles: &ArticleService<A>,
    identity: &Identity,
    id: ArticleId,
    form: &ArticleForm,
) -> Response {
    match articles.update(identity, id, form) {
        Ok(article) => {
            info!(
                "event=article_update module=web status=ok article_id={}",
                article.id
            );
            Response::redirect(article_path(article.id))
        }
        Err(ServiceError::Validation(errors)) => {
            info!(
                "event=article_update module=web status=invalid article_id={} fields={}",
                id,
                errors.len()
            );
            match articles.load_for_edit(identity, id) {
                Ok(article) => Response::Page(Page::ArticleEdit {
                    article,
                    form: form.clone(),
                    errors,
                }),
                Err(err) => failure("article_update", identity, err),
            }
        }
        Err(err) => failure("article_update", identity, err),
    }
}

/// Removes an owned article and redirects to the owner's profile.
pub fn delete_article<A: ArticleRepository>(
    articles: &ArticleService<A>,
    identity: &Identity,
    id: ArticleId,
) -> Response {
    match articles.delete(identity, id) {
        Ok(article) => {
            info!(
                "event=article_delete module=web status=ok article_id={}",
                article.id
            );
            Response::redirect(user_path(article.owner_id))
        }
        Err(err) => failure("article_delete", identity, err),
    }
}

fn failure(event: &'static str, identity: &Identity, err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound { entity, id } => {
            info!("event={event} module=web status=not_found entity={entity} id={id}");
            Response::NotFound
        }
        ServiceError::Unauthenticated => {
            info!("event={event} module=web status=redirect_login");
            Response::redirect(LOGIN_PATH)
        }
        ServiceError::Forbidden(reason) => {
            warn!("event={event} module=web status=forbidden identity={identity} reason={reason}");
            Response::Forbidden
        }
        other => {
            error!("event={event} module=web status=error identity={identity} error={other}");
            Response::ServerError
        }
    }
}

//! Route table and per-connection application entry point.

use crate::auth::identity::Identity;
use crate::model::article::{ArticleForm, ArticleId};
use crate::model::user::{RegistrationForm, UserId};
use crate::repo::article_repo::SqliteArticleRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::RepoResult;
use crate::service::article_service::ArticleService;
use crate::service::user_service::UserService;
use crate::web::handlers;
use crate::web::request::{Method, Request, Response};
use log::{debug, error, info};
use rusqlite::Connection;
use uuid::Uuid;

/// Resolved route with its path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    RegisterForm,
    Register,
    LoginForm,
    ShowUser(UserId),
    ListArticles,
    CreateArticleForm,
    StoreArticle,
    ShowArticle(ArticleId),
    EditArticleForm(ArticleId),
    UpdateArticle(ArticleId),
    DeleteArticle(ArticleId),
}

/// Resolves `method` + `path` to a route. Query strings are ignored.
///
/// Returns `None` for unknown paths and for ids that are not UUIDs.
pub fn resolve(method: Method, path: &str) -> Option<Route> {
    let path = path.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let route = match (method, segments.as_slice()) {
        (Method::Get, ["register"]) => Route::RegisterForm,
        (Method::Post, ["register"]) => Route::Register,
        (Method::Get, ["login"]) => Route::LoginForm,
        (Method::Get, ["users", id]) => Route::ShowUser(parse_id(id)?),
        (Method::Get, ["articles"]) => Route::ListArticles,
        (Method::Get, ["articles", "create"]) => Route::CreateArticleForm,
        (Method::Post, ["articles"]) => Route::StoreArticle,
        (Method::Get, ["articles", id]) => Route::ShowArticle(parse_id(id)?),
        (Method::Post, ["articles", id]) => Route::UpdateArticle(parse_id(id)?),
        (Method::Get, ["articles", id, "edit"]) => Route::EditArticleForm(parse_id(id)?),
        (Method::Get | Method::Post, ["articles", id, "delete"]) => {
            Route::DeleteArticle(parse_id(id)?)
        }
        _ => return None,
    };

    Some(route)
}

fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}

/// Application bound to one database connection.
///
/// Build one `App` per worker connection; requests on different
/// connections may run concurrently against the same database file.
pub struct App<'conn> {
    articles: ArticleService<SqliteArticleRepository<'conn>>,
    users: UserService<SqliteUserRepository<'conn>>,
}

impl<'conn> App<'conn> {
    /// Binds the application to a migrated connection.
    pub fn new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            articles: ArticleService::new(SqliteArticleRepository::try_new(conn)?),
            users: UserService::new(SqliteUserRepository::try_new(conn)?),
        })
    }

    pub fn articles(&self) -> &ArticleService<SqliteArticleRepository<'conn>> {
        &self.articles
    }

    pub fn users(&self) -> &UserService<SqliteUserRepository<'conn>> {
        &self.users
    }

    /// Handles one request end to end.
    ///
    /// An authenticated identity unknown to the user directory is handled as
    /// anonymous.
    pub fn handle(&self, request: &Request) -> Response {
        let response = match resolve(request.method, &request.path) {
            Some(route) => match self.users.resolve_identity(&request.identity) {
                Ok(identity) => {
                    if identity != request.identity {
                        info!(
                            "event=identity_resolve module=web status=unknown_user identity={}",
                            request.identity
                        );
                    }
                    self.dispatch(route, &identity, request)
                }
                Err(err) => {
                    error!(
                        "event=identity_resolve module=web status=error identity={} error={err}",
                        request.identity
                    );
                    Response::ServerError
                }
            },
            None => Response::NotFound,
        };

        debug!(
            "event=request module=web method={} path={} status={}",
            request.method.as_str(),
            request.path,
            response.status()
        );
        response
    }

    fn dispatch(&self, route: Route, identity: &Identity, request: &Request) -> Response {
        match route {
            Route::RegisterForm => handlers::register_page(),
            Route::Register => handlers::register_submit(
                &self.users,
                identity,
                &RegistrationForm::from_fields(&request.fields),
            ),
            Route::LoginForm => handlers::login_page(),
            Route::ShowUser(id) => {
                handlers::show_user(&self.users, &self.articles, identity, id)
            }
            Route::ListArticles => handlers::list_articles(&self.articles, identity),
            Route::CreateArticleForm => handlers::create_article_page(&self.articles, identity),
            Route::StoreArticle => handlers::store_article(
                &self.articles,
                identity,
                &ArticleForm::from_fields(&request.fields),
            ),
            Route::ShowArticle(id) => handlers::show_article(&self.articles, identity, id),
            Route::EditArticleForm(id) => {
                handlers::edit_article_page(&self.articles, identity, id)
            }
            Route::UpdateArticle(id) => handlers::update_article(
                &self.articles,
                identity,
                id,
                &ArticleForm::from_fields(&request.fields),
            ),
            Route::DeleteArticle(id) => handlers::delete_article(&self.articles, identity, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve, Route};
    use crate::web::request::Method;
    use uuid::Uuid;

    #[test]
    fn create_form_is_not_mistaken_for_an_article_id() {
        assert_eq!(
            resolve(Method::Get, "/articles/create"),
            Some(Route::CreateArticleForm)
        );
    }

    #[test]
    fn resolves_article_routes_with_ids() {
        let id = Uuid::new_v4();
        assert_eq!(
            resolve(Method::Get, &format!("/articles/{id}")),
            Some(Route::ShowArticle(id))
        );
        assert_eq!(
            resolve(Method::Get, &format!("/articles/{id}/edit/")),
            Some(Route::EditArticleForm(id))
        );
        assert_eq!(
            resolve(Method::Post, &format!("/articles/{id}")),
            Some(Route::UpdateArticle(id))
        );
        assert_eq!(
            resolve(Method::Get, &format!("/articles/{id}/delete")),
            Some(Route::DeleteArticle(id))
        );
        assert_eq!(
            resolve(Method::Post, &format!("/articles/{id}/delete")),
            Some(Route::DeleteArticle(id))
        );
    }

    #[test]
    fn ignores_query_strings() {
        assert_eq!(resolve(Method::Get, "/login?next=/"), Some(Route::LoginForm));
    }

    #[test]
    fn rejects_unknown_paths_and_malformed_ids() {
        assert_eq!(resolve(Method::Get, "/articles/42"), None);
        assert_eq!(resolve(Method::Get, "/nope"), None);
        assert_eq!(resolve(Method::Post, "/login"), None);
    }
}

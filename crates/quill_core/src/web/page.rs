//! Rendered views.
//!
//! Rendering is plain text: enough for callers and tests to inspect what a
//! page exposes, without a template engine.

use crate::model::article::{Article, ArticleForm};
use crate::model::form::FieldErrors;
use crate::model::user::{RegistrationForm, User};
use crate::service::article_service::ArticleView;
use crate::web::{article_path, user_path};
use std::fmt::{Display, Formatter};

/// Label of the link to the edit form, shown to article owners only.
pub const EDIT_AFFORDANCE: &str = "Edit Article";
/// Label of the delete link, shown to article owners only.
pub const DELETE_AFFORDANCE: &str = "Delete Article";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Register {
        form: RegistrationForm,
        errors: FieldErrors,
    },
    Login,
    UserProfile {
        user: User,
        articles: Vec<Article>,
    },
    ArticleIndex {
        articles: Vec<Article>,
    },
    ArticleShow(ArticleView),
    ArticleCreate {
        form: ArticleForm,
        errors: FieldErrors,
    },
    ArticleEdit {
        article: Article,
        form: ArticleForm,
        errors: FieldErrors,
    },
}

impl Page {
    /// Stable view identifier.
    pub fn view_name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "auth.register",
            Self::Login => "auth.login",
            Self::UserProfile { .. } => "users.show",
            Self::ArticleIndex { .. } => "articles.index",
            Self::ArticleShow(_) => "articles.show",
            Self::ArticleCreate { .. } => "articles.create",
            Self::ArticleEdit { .. } => "articles.edit",
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Validation messages carried by form pages.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Register { errors, .. }
            | Self::ArticleCreate { errors, .. }
            | Self::ArticleEdit { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register { form, errors } => {
                writeln!(f, "Register")?;
                write_errors(f, errors)?;
                writeln!(f, "name: {}", form.name.as_deref().unwrap_or_default())?;
                writeln!(f, "email: {}", form.email.as_deref().unwrap_or_default())
            }
            Self::Login => writeln!(f, "Login"),
            Self::UserProfile { user, articles } => {
                writeln!(f, "{} ({})", user.name, user.id)?;
                write_article_links(f, articles)
            }
            Self::ArticleIndex { articles } => {
                writeln!(f, "Articles")?;
                write_article_links(f, articles)
            }
            Self::ArticleShow(view) => {
                let article = &view.article;
                writeln!(f, "{}", article.title)?;
                writeln!(f, "by {}", user_path(article.owner_id))?;
                writeln!(f)?;
                writeln!(f, "{}", article.body)?;
                if view.is_owner {
                    let path = article_path(article.id);
                    writeln!(f)?;
                    writeln!(f, "[{EDIT_AFFORDANCE}]({path}/edit)")?;
                    writeln!(f, "[{DELETE_AFFORDANCE}]({path}/delete)")?;
                }
                Ok(())
            }
            Self::ArticleCreate { form, errors } => {
                writeln!(f, "New article")?;
                write_errors(f, errors)?;
                write_article_form(f, form)
            }
            Self::ArticleEdit {
                article,
                form,
                errors,
            } => {
                writeln!(f, "Editing {}", article_path(article.id))?;
                write_errors(f, errors)?;
                write_article_form(f, form)
            }
        }
    }
}

fn write_errors(f: &mut Formatter<'_>, errors: &FieldErrors) -> std::fmt::Result {
    for (field, message) in errors.iter() {
        writeln!(f, "! {field}: {message}")?;
    }
    Ok(())
}

fn write_article_form(f: &mut Formatter<'_>, form: &ArticleForm) -> std::fmt::Result {
    writeln!(f, "title: {}", form.title.as_deref().unwrap_or_default())?;
    writeln!(f, "body: {}", form.body.as_deref().unwrap_or_default())
}

fn write_article_links(f: &mut Formatter<'_>, articles: &[Article]) -> std::fmt::Result {
    if articles.is_empty() {
        return writeln!(f, "No articles yet.");
    }
    for article in articles {
        writeln!(f, "- [{}]({})", article.title, article_path(article.id))?;
    }
    Ok(())
}

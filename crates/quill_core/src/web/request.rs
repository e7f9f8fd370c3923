//! Request and response envelopes.

use crate::auth::identity::Identity;
use crate::model::user::UserId;
use crate::web::page::Page;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One incoming request with its caller identity and submitted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub identity: Identity,
    pub fields: HashMap<String, String>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            identity: Identity::Anonymous,
            fields: HashMap::new(),
        }
    }

    pub fn post<K, V>(path: impl Into<String>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::Post,
            path: path.into(),
            identity: Identity::Anonymous,
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Attaches an authenticated identity to the request.
    pub fn acting_as(mut self, user_id: UserId) -> Self {
        self.identity = Identity::Authenticated(user_id);
        self
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// 200 with a rendered page.
    Page(Page),
    /// 302 to the given location.
    Redirect(String),
    Forbidden,
    NotFound,
    ServerError,
}

impl Response {
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect(location.into())
    }

    /// HTTP status code equivalent.
    pub fn status(&self) -> u16 {
        match self {
            Self::Page(_) => 200,
            Self::Redirect(_) => 302,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect(location) => Some(location),
            _ => None,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Rendered response body.
    pub fn body(&self) -> String {
        match self {
            Self::Page(page) => page.render(),
            Self::Redirect(location) => format!("Redirecting to {location}"),
            Self::Forbidden => "Forbidden".to_string(),
            Self::NotFound => "Not Found".to_string(),
            Self::ServerError => "Server Error".to_string(),
        }
    }
}

//! Outbound cookie instructions.

use chrono::{DateTime, Utc};
use cookie::time::OffsetDateTime;
use cookie::{Cookie, CookieBuilder};

use crate::SameSite;

/// Attributes attached to a cookie write or deletion.
///
/// `None` fields are omitted and left to browser defaults. A write without
/// `expires` is a session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieAttributes {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: Option<SameSite>,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Option<DateTime<Utc>>,
}

impl CookieAttributes {
    /// Renders a `Set-Cookie` cookie carrying `value`.
    pub fn to_cookie(&self, name: &str, value: &str) -> Cookie<'static> {
        let mut builder = self.scoped(Cookie::build((name.to_owned(), value.to_owned())));

        if self.http_only {
            builder = builder.http_only(true);
        }
        if self.secure {
            builder = builder.secure(true);
        }
        if let Some(same_site) = self.same_site {
            builder = builder.same_site(to_cookie_same_site(same_site));
        }
        if let Some(expires) = self.expires {
            match OffsetDateTime::from_unix_timestamp(expires.timestamp()) {
                Ok(expires) => builder = builder.expires(expires),
                Err(_) => log::warn!(
                    target: "enclave_remember::cookie",
                    "msg=\"cookie expiration out of range, writing session cookie\", expires=\"{expires}\""
                ),
            }
        }

        builder.build()
    }

    /// Renders a cookie that makes the browser drop `name`. Only domain and
    /// path are carried over, since they must match the original cookie.
    pub fn to_removal_cookie(&self, name: &str) -> Cookie<'static> {
        let mut cookie = self.scoped(Cookie::build((name.to_owned(), String::new()))).build();
        cookie.make_removal();
        cookie
    }

    fn scoped(&self, mut builder: CookieBuilder<'static>) -> CookieBuilder<'static> {
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        if let Some(path) = &self.path {
            builder = builder.path(path.clone());
        }
        builder
    }
}

fn to_cookie_same_site(same_site: SameSite) -> cookie::SameSite {
    match same_site {
        SameSite::Strict => cookie::SameSite::Strict,
        SameSite::Lax => cookie::SameSite::Lax,
        SameSite::None => cookie::SameSite::None,
    }
}

/// Response-side cookie writer supplied by the HTTP layer.
pub trait CookieSink {
    fn set_cookie(&mut self, name: &str, value: String, attributes: &CookieAttributes);

    fn delete_cookie(&mut self, name: &str, attributes: &CookieAttributes);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCookie {
    Set {
        name: String,
        value: String,
        attributes: CookieAttributes,
    },
    Delete {
        name: String,
        attributes: CookieAttributes,
    },
}

impl ResponseCookie {
    pub fn name(&self) -> &str {
        match self {
            ResponseCookie::Set { name, .. } | ResponseCookie::Delete { name, .. } => name,
        }
    }

    pub fn attributes(&self) -> &CookieAttributes {
        match self {
            ResponseCookie::Set { attributes, .. } | ResponseCookie::Delete { attributes, .. } => {
                attributes
            }
        }
    }

    /// The written value, or `None` for a deletion.
    pub fn value(&self) -> Option<&str> {
        match self {
            ResponseCookie::Set { value, .. } => Some(value),
            ResponseCookie::Delete { .. } => None,
        }
    }

    pub fn is_deletion(&self) -> bool {
        matches!(self, ResponseCookie::Delete { .. })
    }

    pub fn to_cookie(&self) -> Cookie<'static> {
        match self {
            ResponseCookie::Set {
                name,
                value,
                attributes,
            } => attributes.to_cookie(name, value),
            ResponseCookie::Delete { name, attributes } => attributes.to_removal_cookie(name),
        }
    }
}

/// A [`CookieSink`] that records instructions in order, for frameworks
/// without a native cookie jar and for tests.
#[derive(Debug, Clone, Default)]
pub struct ResponseCookies {
    cookies: Vec<ResponseCookie>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last instruction recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&ResponseCookie> {
        self.cookies.iter().rev().find(|cookie| cookie.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponseCookie> {
        self.cookies.iter()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Renders every instruction as a `Set-Cookie` header value.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies
            .iter()
            .map(|cookie| cookie.to_cookie().to_string())
            .collect()
    }
}

impl CookieSink for ResponseCookies {
    fn set_cookie(&mut self, name: &str, value: String, attributes: &CookieAttributes) {
        self.cookies.push(ResponseCookie::Set {
            name: name.to_owned(),
            value,
            attributes: attributes.clone(),
        });
    }

    fn delete_cookie(&mut self, name: &str, attributes: &CookieAttributes) {
        self.cookies.push(ResponseCookie::Delete {
            name: name.to_owned(),
            attributes: attributes.clone(),
        });
    }
}

//! Inbound request data seen by a session.

use std::collections::HashMap;

use cookie::Cookie;

/// Cookies sent with a request, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies {
    cookies: HashMap<String, String>,
}

impl RequestCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `Cookie` request header. Malformed pairs are skipped.
    pub fn from_header(header: &str) -> Self {
        let cookies = Cookie::split_parse(header)
            .filter_map(Result::ok)
            .map(|cookie| (cookie.name().to_owned(), cookie.value().to_owned()))
            .collect();

        Self { cookies }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RequestCookies
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cookies: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// The parts of an inbound request a session needs: its host (for computed
/// cookie domains) and its cookies.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    host: Option<String>,
    cookies: RequestCookies,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cookie_header(header: &str) -> Self {
        Self {
            host: None,
            cookies: RequestCookies::from_header(header),
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_cookies(mut self, cookies: RequestCookies) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn cookies(&self) -> &RequestCookies {
        &self.cookies
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header() {
        let cookies = RequestCookies::from_header("remember_token=abc123; theme=dark");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("remember_token"), Some("abc123"));
        assert_eq!(cookies.get("theme"), Some("dark"));
        assert_eq!(cookies.get("missing"), None);
    }

    #[test]
    fn test_from_header_skips_malformed() {
        let cookies = RequestCookies::from_header("novalue; remember_token=abc123");
        assert_eq!(cookies.get("remember_token"), Some("abc123"));
        assert!(!cookies.contains("novalue"));
    }

    #[test]
    fn test_from_empty_header() {
        assert!(RequestCookies::from_header("").is_empty());
    }

    #[test]
    fn test_from_iter() {
        let cookies: RequestCookies = [("a", "1"), ("b", "2")].into_iter().collect();
        let mut pairs: Vec<_> = cookies.iter().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_request_context_builder() {
        let request = RequestContext::new()
            .with_host("example.com")
            .with_cookie("remember_token", "abc");

        assert_eq!(request.host(), Some("example.com"));
        assert_eq!(request.cookie("remember_token"), Some("abc"));
        assert_eq!(request.cookies().len(), 1);
    }
}

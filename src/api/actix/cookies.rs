use actix_web::cookie::time::OffsetDateTime;
use actix_web::cookie::{Cookie, SameSite as ActixSameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};

use crate::session::{CookieAttributes, CookieSink, RequestContext, RequestCookies};
use crate::SameSite;

impl From<&HttpRequest> for RequestContext {
    fn from(req: &HttpRequest) -> Self {
        let cookies: RequestCookies = match req.cookies() {
            Ok(cookies) => cookies
                .iter()
                .map(|cookie| (cookie.name().to_owned(), cookie.value().to_owned()))
                .collect(),
            Err(err) => {
                log::warn!(target: "enclave_remember::cookie", "msg=\"unparseable cookie header\", error=\"{err}\"");
                RequestCookies::new()
            }
        };

        RequestContext::new()
            .with_host(req.connection_info().host())
            .with_cookies(cookies)
    }
}

fn build_cookie(name: &str, value: String, attributes: &CookieAttributes) -> Cookie<'static> {
    let mut cookie = Cookie::build(name.to_owned(), value)
        .http_only(attributes.http_only)
        .secure(attributes.secure)
        .finish();

    if let Some(same_site) = attributes.same_site {
        cookie.set_same_site(match same_site {
            SameSite::None => ActixSameSite::None,
            SameSite::Lax => ActixSameSite::Lax,
            SameSite::Strict => ActixSameSite::Strict,
        });
    }
    scope(&mut cookie, attributes);
    if let Some(expires) = attributes.expires {
        if let Ok(expires) = OffsetDateTime::from_unix_timestamp(expires.timestamp()) {
            cookie.set_expires(expires);
        }
    }

    cookie
}

fn build_removal_cookie(name: &str, attributes: &CookieAttributes) -> Cookie<'static> {
    let mut cookie = Cookie::named(name.to_owned());
    scope(&mut cookie, attributes);
    cookie.make_removal();
    cookie
}

fn scope(cookie: &mut Cookie<'static>, attributes: &CookieAttributes) {
    if let Some(domain) = &attributes.domain {
        cookie.set_domain(domain.clone());
    }
    if let Some(path) = &attributes.path {
        cookie.set_path(path.clone());
    }
}

impl CookieSink for HttpResponseBuilder {
    fn set_cookie(&mut self, name: &str, value: String, attributes: &CookieAttributes) {
        self.cookie(build_cookie(name, value, attributes));
    }

    fn delete_cookie(&mut self, name: &str, attributes: &CookieAttributes) {
        self.cookie(build_removal_cookie(name, attributes));
    }
}

#[cfg(test)]
mod tests {
    use actix_web::HttpResponse;
    use actix_web::test::TestRequest;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_request_context_from_http_request() {
        let req = TestRequest::default()
            .insert_header(("host", "app.example.com"))
            .cookie(Cookie::new("remember_token", "abc123"))
            .to_http_request();

        let request = RequestContext::from(&req);
        assert_eq!(request.host(), Some("app.example.com"));
        assert_eq!(request.cookie("remember_token"), Some("abc123"));
    }

    #[test]
    fn test_build_cookie_attributes() {
        let attributes = CookieAttributes {
            http_only: true,
            secure: true,
            same_site: Some(SameSite::Lax),
            domain: Some("example.com".to_owned()),
            path: Some("/".to_owned()),
            expires: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
        };
        let cookie = build_cookie("remember_token", "abc".to_owned(), &attributes);

        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(ActixSameSite::Lax));
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.expires_datetime().is_some());
    }

    #[test]
    fn test_response_builder_sink() {
        let mut builder = HttpResponse::Ok();
        builder.set_cookie("remember_token", "abc".to_owned(), &CookieAttributes::default());
        let response = builder.finish();

        let cookie = response.cookies().next().unwrap();
        assert_eq!(cookie.name(), "remember_token");
        assert_eq!(cookie.value(), "abc");
    }

    #[test]
    fn test_removal_cookie_keeps_domain() {
        let attributes = CookieAttributes {
            domain: Some("example.com".to_owned()),
            ..Default::default()
        };
        let cookie = build_removal_cookie("remember_token", &attributes);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.domain(), Some("example.com"));
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }
}

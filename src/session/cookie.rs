//! Remember-token cookie codec.
//!
//! Applies the configured [`CookieSigning`] mode on read and write and
//! assembles cookie attributes from the configuration.

use chrono::{DateTime, Utc};

use super::request::{RequestContext, RequestCookies};
use super::response::{CookieAttributes, CookieSink};
use crate::crypto::{sign_value, verify_signed_value};
use crate::{CookieSigning, RememberConfig};

#[derive(Debug, Clone, Copy)]
pub struct CookieCodec<'a> {
    config: &'a RememberConfig,
}

impl<'a> CookieCodec<'a> {
    pub fn new(config: &'a RememberConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &'a str {
        &self.config.cookie_name
    }

    /// Reads the remember token from the request cookies.
    ///
    /// - `Signed`: only a correctly signed value is accepted.
    /// - `Unsigned`: the raw value is returned.
    /// - `Migrate`: a correctly signed value wins, otherwise the raw value.
    ///
    /// Empty values read as absent.
    pub fn read(&self, cookies: &RequestCookies) -> Option<String> {
        let raw = cookies.get(self.cookie_name())?;

        let token = match self.config.signed_cookie {
            CookieSigning::Signed => self.read_signed(raw)?,
            CookieSigning::Unsigned => raw.to_owned(),
            CookieSigning::Migrate => self.read_signed(raw).unwrap_or_else(|| raw.to_owned()),
        };

        (!token.is_empty()).then_some(token)
    }

    fn read_signed(&self, raw: &str) -> Option<String> {
        verify_signed_value(raw, &self.config.secret_key)
    }

    /// Writes the token. Only `Signed` mode signs it; `Migrate` writes the raw
    /// value.
    pub fn write<K>(&self, sink: &mut K, token: &str, attributes: &CookieAttributes)
    where
        K: CookieSink + ?Sized,
    {
        let value = match self.config.signed_cookie {
            CookieSigning::Signed => sign_value(token, &self.config.secret_key),
            CookieSigning::Unsigned | CookieSigning::Migrate => token.to_owned(),
        };

        sink.set_cookie(self.cookie_name(), value, attributes);
    }

    pub fn delete<K>(&self, sink: &mut K, attributes: &CookieAttributes)
    where
        K: CookieSink + ?Sized,
    {
        sink.delete_cookie(self.cookie_name(), attributes);
    }

    /// Attributes for a token write, evaluated against the current request.
    pub fn write_attributes(&self, request: &RequestContext, now: DateTime<Utc>) -> CookieAttributes {
        CookieAttributes {
            http_only: self.config.http_only,
            secure: self.config.secure_cookie,
            same_site: self.config.same_site,
            domain: self.domain(request),
            path: self.config.cookie_path.clone(),
            expires: self.config.cookie_expiration.resolve(request.cookies(), now),
        }
    }

    /// Attributes for a deletion: the same domain and path a write would use.
    pub fn removal_attributes(&self, request: &RequestContext) -> CookieAttributes {
        CookieAttributes {
            domain: self.domain(request),
            path: self.config.cookie_path.clone(),
            ..Default::default()
        }
    }

    fn domain(&self, request: &RequestContext) -> Option<String> {
        self.config
            .cookie_domain
            .as_ref()
            .map(|domain| domain.resolve(request))
    }
}

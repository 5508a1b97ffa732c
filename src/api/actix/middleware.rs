use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};

use crate::api::ErrorResponse;
use crate::{AuthError, Authenticator, RequestContext, TokenStore};

/// The user signed in through the remember-token cookie.
///
/// Requires `web::Data<Authenticator<S>>` in app data. Rejects with 401 when
/// the request carries no valid remember token.
pub struct RememberedUser<S>
where
    S: TokenStore,
{
    user: S::User,
}

impl<S> RememberedUser<S>
where
    S: TokenStore,
{
    pub fn user(&self) -> &S::User {
        &self.user
    }

    pub fn into_inner(self) -> S::User {
        self.user
    }
}

#[derive(Debug)]
pub struct AuthenticationError {
    pub error: AuthError,
}

impl From<AuthError> for AuthenticationError {
    fn from(error: AuthError) -> Self {
        Self { error }
    }
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse::from(self.error.clone());

        match &self.error {
            AuthError::TokenExpired | AuthError::TokenInvalid => {
                HttpResponse::Unauthorized().json(error_response)
            }
            _ => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl<S> FromRequest for RememberedUser<S>
where
    S: TokenStore + 'static,
{
    type Error = AuthenticationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let authenticator = req.app_data::<web::Data<Authenticator<S>>>().cloned();
        let request = RequestContext::from(req);

        Box::pin(async move {
            let authenticator = authenticator.ok_or_else(|| AuthenticationError {
                error: AuthError::ConfigurationError("Authenticator not found".to_owned()),
            })?;

            let mut session = authenticator.session(&request);
            let user = session
                .current_user()
                .await?
                .cloned()
                .ok_or(AuthenticationError {
                    error: AuthError::TokenInvalid,
                })?;

            Ok(RememberedUser { user })
        })
    }
}

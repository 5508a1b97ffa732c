//! actix-web integration.
//!
//! - `RequestContext::from(&HttpRequest)` captures the host and cookies.
//! - [`HttpResponseBuilder`](actix_web::HttpResponseBuilder) is a
//!   [`CookieSink`](crate::CookieSink), so a session can flush into a response.
//! - [`RememberedUser`] extracts the signed-in user, answering 401 otherwise.
//!
//! ```rust,ignore
//! async fn sign_out(
//!     req: HttpRequest,
//!     authenticator: web::Data<Authenticator<MyStore>>,
//! ) -> Result<HttpResponse, AuthenticationError> {
//!     let request = RequestContext::from(&req);
//!     let mut session = authenticator.session(&request);
//!     session.sign_out().await.map_err(AuthenticationError::from)?;
//!
//!     let mut response = HttpResponse::Ok();
//!     session.add_cookie_to_headers(&mut response);
//!     Ok(response.finish())
//! }
//! ```

mod cookies;
mod middleware;

pub use middleware::{AuthenticationError, RememberedUser};

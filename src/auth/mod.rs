//! Fake JWT bearer authentication.
//!
//! A stand-in for real bearer-token authentication in tests: the stage reads
//! the `Authorization` header, decodes the claims it carries, and never
//! verifies a signature. Do not register it in a production pipeline.
//!
//! ```rust
//! use fake_jwt_bearer::{App, FakeJwtBearerAppExt, Method, Request, Response, Router, Status};
//! use fake_jwt_bearer::auth::{self, fake_token};
//! use serde_json::json;
//!
//! async fn me(req: Request) -> Response {
//!     match auth::principal(&req).and_then(|p| p.name()) {
//!         Some(name) => Response::text(name.to_owned()),
//!         None => Response::status(Status::Unauthorized),
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut app = App::new(Router::new().get("/me", me));
//! app.use_fake_jwt_bearer_authentication();
//!
//! let req = Request::builder(Method::Get, "/me")
//!     .header("authorization", &fake_token(&json!({ "sub": "alice" })))
//!     .build();
//! let res = app.into_service().call(req).await;
//! assert_eq!(res.body(), b"alice");
//! # }
//! ```

mod builder;
mod options;
mod principal;
mod stage;
mod token;

pub use builder::{
    use_fake_jwt_bearer_authentication, use_fake_jwt_bearer_authentication_with,
    FakeJwtBearerAppExt,
};
pub use options::{AuthenticationMode, FakeJwtBearerOptions, DEFAULT_SCHEME};
pub use principal::Principal;
pub use stage::{Authenticator, FakeJwtBearer};
pub use token::{fake_jwt, fake_token, AuthError};

use crate::request::Request;

/// The principal an Active stage attached to `req`, if any.
pub fn principal(req: &Request) -> Option<&Principal> {
    req.extensions().get::<Principal>()
}

/// Authenticates `req` on demand.
///
/// Returns the principal an Active stage already attached; otherwise decodes
/// the credential with the options of the Passive stage the request went
/// through. `Ok(None)` when there is no credential, or no fake bearer stage
/// in the pipeline at all.
pub fn authenticate(req: &Request) -> Result<Option<Principal>, AuthError> {
    if let Some(principal) = principal(req) {
        return Ok(Some(principal.clone()));
    }
    match req.extensions().get::<Authenticator>() {
        Some(authenticator) => authenticator.authenticate(req),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Options;
    use crate::Method;

    #[test]
    fn authenticate_without_a_stage_is_anonymous() {
        let req = Request::builder(Method::Get, "/")
            .header("authorization", r#"FakeBearer {"sub":"alice"}"#)
            .build();
        assert!(authenticate(&req).unwrap().is_none());
    }

    #[test]
    fn authenticate_uses_the_passive_authenticator() {
        let mut req = Request::builder(Method::Get, "/")
            .header("authorization", r#"FakeBearer {"sub":"alice"}"#)
            .build();
        let options = Options::new(FakeJwtBearerOptions::new().passive());
        req.extensions_mut().insert(Authenticator::new(options));

        assert!(principal(&req).is_none());
        let principal = authenticate(&req).unwrap().unwrap();
        assert_eq!(principal.name(), Some("alice"));
    }
}

//! The fake bearer middleware stage.

use serde_json::json;
use tracing::{debug, warn};

use super::options::{AuthenticationMode, FakeJwtBearerOptions};
use super::principal::Principal;
use super::token::{self, AuthError};
use crate::handler::BoxFuture;
use crate::middleware::{Configure, Middleware, Next, Options};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Decodes credentials for one set of [`FakeJwtBearerOptions`].
///
/// In Passive mode the stage leaves one of these in the request extensions
/// so [`authenticate`](super::authenticate) can run later, on demand.
#[derive(Clone, Debug)]
pub struct Authenticator {
    options: Options<FakeJwtBearerOptions>,
}

impl Authenticator {
    pub fn new(options: Options<FakeJwtBearerOptions>) -> Self {
        Self { options }
    }

    /// `Ok(None)` when the request carries no credential for this scheme.
    pub fn authenticate(&self, req: &Request) -> Result<Option<Principal>, AuthError> {
        let Some(header) = req.headers().get(http::header::AUTHORIZATION) else {
            return Ok(None);
        };
        // Lossy first: a foreign scheme is ignored whatever its bytes are.
        let bytes = header.as_bytes();
        let text = String::from_utf8_lossy(bytes);
        let Some(raw) = token::extract(&text, &self.options.authentication_scheme) else {
            return Ok(None);
        };
        if std::str::from_utf8(bytes).is_err() {
            return Err(AuthError::NonUtf8Header);
        }

        let claims = token::decode_claims(raw)?;
        let options = self.options.value();
        let principal = Principal::new(
            options.authentication_scheme.clone(),
            claims,
            options.name_claim_type.clone(),
            options.role_claim_type.clone(),
            options.save_token.then(|| raw.to_owned()),
        );
        debug!(scheme = %options.authentication_scheme, name = ?principal.name(), "decoded fake bearer token");
        Ok(Some(principal))
    }
}

/// Fake JWT bearer authentication.
///
/// Reads `Authorization: FakeBearer <token>` (scheme configurable), decodes
/// the claims without any signature check, and exposes the resulting
/// [`Principal`] according to the configured [`AuthenticationMode`]. Meant
/// for integration tests that need authenticated requests without a token
/// issuer.
///
/// Register it with [`FakeJwtBearerAppExt`](super::FakeJwtBearerAppExt).
pub struct FakeJwtBearer {
    authenticator: Authenticator,
}

impl Configure for FakeJwtBearer {
    type Options = FakeJwtBearerOptions;

    fn from_options(options: Options<FakeJwtBearerOptions>) -> Self {
        Self { authenticator: Authenticator::new(options) }
    }

    fn options(&self) -> &Options<FakeJwtBearerOptions> {
        &self.authenticator.options
    }
}

impl Middleware for FakeJwtBearer {
    fn name(&self) -> &'static str { "FakeJwtBearer" }

    fn handle(&self, mut req: Request, next: Next) -> BoxFuture {
        match self.options().authentication_mode {
            AuthenticationMode::Passive => {
                req.extensions_mut().insert(self.authenticator.clone());
                next.run(req)
            }
            AuthenticationMode::Active => match self.authenticator.authenticate(&req) {
                Ok(Some(principal)) => {
                    req.extensions_mut().insert(principal);
                    next.run(req)
                }
                Ok(None) => next.run(req),
                Err(e) => {
                    warn!(path = %req.path(), "rejecting fake bearer token: {e}");
                    let res = self.challenge(&e);
                    Box::pin(async move { res })
                }
            },
        }
    }
}

impl FakeJwtBearer {
    fn challenge(&self, err: &AuthError) -> Response {
        let options = self.options();
        let mut value = options.authentication_scheme.clone();
        if let Some(realm) = &options.realm {
            value.push_str(&format!(" realm=\"{realm}\","));
        }
        value.push_str(" error=\"invalid_token\"");

        let body = json!({ "error": "invalid_token", "error_description": err.to_string() });
        Response::builder()
            .status(Status::Unauthorized)
            .header("www-authenticate", &value)
            .json(body.to_string().into_bytes())
    }
}

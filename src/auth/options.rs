//! Configuration for the fake bearer stage.

use serde::Deserialize;

/// Header scheme the stage answers to unless configured otherwise.
pub const DEFAULT_SCHEME: &str = "FakeBearer";

/// How the stage treats a request carrying a credential.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub enum AuthenticationMode {
    /// Claims are decoded on the way in and the [`Principal`](super::Principal)
    /// is attached to the request. A malformed credential is answered with `401`.
    #[default]
    Active,
    /// The request passes through untouched; handlers call
    /// [`authenticate`](super::authenticate) when they want the claims.
    Passive,
}

/// Options for [`FakeJwtBearer`](super::FakeJwtBearer).
///
/// Every field has a default, so options can be written in code or loaded
/// from application config:
///
/// ```rust
/// use fake_jwt_bearer::auth::{AuthenticationMode, FakeJwtBearerOptions};
///
/// let from_code = FakeJwtBearerOptions::new().passive().realm("api");
///
/// let from_config: FakeJwtBearerOptions = serde_json::from_str(
///     r#"{ "authenticationMode": "Passive", "realm": "api" }"#,
/// ).unwrap();
///
/// assert_eq!(from_code, from_config);
/// assert_eq!(from_config.authentication_mode, AuthenticationMode::Passive);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FakeJwtBearerOptions {
    pub authentication_mode: AuthenticationMode,
    /// Scheme expected in front of the token in the `Authorization` header.
    pub authentication_scheme: String,
    /// Realm advertised in the `www-authenticate` challenge.
    pub realm: Option<String>,
    /// Claim holding the principal's name.
    pub name_claim_type: String,
    /// Claim holding the principal's roles (a string or an array of strings).
    pub role_claim_type: String,
    /// Keep the raw token on the [`Principal`](super::Principal).
    pub save_token: bool,
}

impl FakeJwtBearerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: AuthenticationMode) -> Self {
        self.authentication_mode = mode;
        self
    }

    pub fn passive(self) -> Self {
        self.mode(AuthenticationMode::Passive)
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.authentication_scheme = scheme.into();
        self
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn name_claim_type(mut self, claim: impl Into<String>) -> Self {
        self.name_claim_type = claim.into();
        self
    }

    pub fn role_claim_type(mut self, claim: impl Into<String>) -> Self {
        self.role_claim_type = claim.into();
        self
    }

    pub fn save_token(mut self, save: bool) -> Self {
        self.save_token = save;
        self
    }

    /// `true` when no `Authorization` header can ever carry this scheme.
    pub fn is_unmatchable(&self) -> bool {
        let scheme = &self.authentication_scheme;
        scheme.is_empty() || scheme.contains(char::is_whitespace)
    }
}

impl Default for FakeJwtBearerOptions {
    fn default() -> Self {
        Self {
            authentication_mode: AuthenticationMode::Active,
            authentication_scheme: DEFAULT_SCHEME.to_owned(),
            realm: None,
            name_claim_type: "sub".to_owned(),
            role_claim_type: "role".to_owned(),
            save_token: false,
        }
    }
}

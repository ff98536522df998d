//! The identity decoded from a fake bearer token.

use serde_json::{Map, Value};

/// Claims fall-back order when the configured name claim is absent.
const NAME_FALLBACKS: [&str; 2] = ["unique_name", "name"];

/// An authenticated identity: the token's claims plus the claim names the
/// stage was configured with.
#[derive(Clone, Debug, PartialEq)]
pub struct Principal {
    scheme: String,
    claims: Map<String, Value>,
    name_claim_type: String,
    role_claim_type: String,
    token: Option<String>,
}

impl Principal {
    pub(crate) fn new(
        scheme: String,
        claims: Map<String, Value>,
        name_claim_type: String,
        role_claim_type: String,
        token: Option<String>,
    ) -> Self {
        Self { scheme, claims, name_claim_type, role_claim_type, token }
    }

    /// The scheme that authenticated this principal (e.g. `FakeBearer`).
    pub fn scheme(&self) -> &str { &self.scheme }

    pub fn claims(&self) -> &Map<String, Value> { &self.claims }

    pub fn claim(&self, key: &str) -> Option<&Value> { self.claims.get(key) }

    /// The raw token, when the stage was configured to save it.
    pub fn token(&self) -> Option<&str> { self.token.as_deref() }

    pub fn name(&self) -> Option<&str> {
        std::iter::once(self.name_claim_type.as_str())
            .chain(NAME_FALLBACKS)
            .find_map(|key| self.claims.get(key).and_then(Value::as_str))
    }

    /// Roles from the role claim. A single string counts as one role;
    /// non-string array entries are skipped.
    pub fn roles(&self) -> Vec<&str> {
        match self.claims.get(&self.role_claim_type) {
            Some(Value::String(role)) => vec![role.as_str()],
            Some(Value::Array(roles)) => roles.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles().contains(&role)
    }
}

//! Reading claims out of a fake bearer credential.
//!
//! Two token shapes are understood, neither of them verified:
//!
//! - a bare JSON object: `FakeBearer {"sub":"alice","role":["admin"]}`
//! - a JWT-shaped string, `header.payload[.signature]`, whose payload segment
//!   is base64url JSON. The header and signature are ignored.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a credential addressed to this stage could not be read.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("the authorization header carries no token")]
    EmptyToken,

    #[error("the authorization header is not valid UTF-8")]
    NonUtf8Header,

    #[error("token is neither a JSON object nor `header.payload[.signature]`")]
    Malformed,

    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token claims are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token claims must be a JSON object")]
    NotAnObject,
}

/// Splits `<scheme> <token>` and returns the token when the scheme matches
/// (ASCII case-insensitive). `None` means the header belongs to some other
/// scheme and is none of this stage's business. An empty scheme matches nothing.
pub(crate) fn extract<'a>(header: &'a str, scheme: &str) -> Option<&'a str> {
    if scheme.is_empty() {
        return None;
    }
    let header = header.trim_start();
    let (found, rest) = header.split_once(char::is_whitespace).unwrap_or((header, ""));
    found.eq_ignore_ascii_case(scheme).then(|| rest.trim())
}

pub(crate) fn decode_claims(token: &str) -> Result<Map<String, Value>, AuthError> {
    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }

    let value: Value = if token.starts_with('{') {
        serde_json::from_str(token)?
    } else {
        let segments: Vec<&str> = token.split('.').collect();
        if !(2..=3).contains(&segments.len()) {
            return Err(AuthError::Malformed);
        }
        let payload = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
        serde_json::from_slice(&payload)?
    };

    match value {
        Value::Object(claims) => Ok(claims),
        _ => Err(AuthError::NotAnObject),
    }
}

/// `Authorization` header value carrying `claims` as a bare JSON token.
///
/// ```rust
/// use fake_jwt_bearer::auth::fake_token;
/// use serde_json::json;
///
/// let header = fake_token(&json!({ "sub": "alice" }));
/// assert_eq!(header, r#"FakeBearer {"sub":"alice"}"#);
/// ```
pub fn fake_token(claims: &Value) -> String {
    format!("{} {claims}", super::DEFAULT_SCHEME)
}

/// An unsigned JWT-shaped token (`alg: none`) carrying `claims`.
///
/// Useful when the code under test forwards the token somewhere that
/// expects three dot-separated segments.
pub fn fake_jwt(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use serde_json::json;

    #[test]
    fn extract_matches_scheme_case_insensitively() {
        assert_eq!(extract("FakeBearer abc", "FakeBearer"), Some("abc"));
        assert_eq!(extract("fakebearer   abc ", "FakeBearer"), Some("abc"));
        assert_eq!(extract("FakeBearer", "FakeBearer"), Some(""));
        assert_eq!(extract("Bearer abc", "FakeBearer"), None);
        assert_eq!(extract("FakeBearerabc", "FakeBearer"), None);
        assert_eq!(extract("", ""), None);
        assert_eq!(extract(" abc", ""), None);
    }

    #[test]
    fn decodes_bare_json_object() {
        let claims = decode_claims(r#"{"sub":"alice","role":["admin"]}"#).unwrap();
        assert_eq!(claims["sub"], "alice");
        assert_eq!(claims["role"], json!(["admin"]));
    }

    #[test]
    fn decodes_jwt_payload_without_checking_signature() {
        let token = fake_jwt(&json!({"sub": "bob"}));
        assert_eq!(decode_claims(&token).unwrap()["sub"], "bob");

        let signed = format!("{}not-a-real-signature", token);
        assert_eq!(decode_claims(&signed).unwrap()["sub"], "bob");
    }

    #[test]
    fn accepts_padded_payload() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"c"}"#);
        let claims = decode_claims(&format!("e30.{payload}")).unwrap();
        assert_eq!(claims["sub"], "c");
    }

    #[test]
    fn rejects_unreadable_tokens() {
        assert!(matches!(decode_claims(""), Err(AuthError::EmptyToken)));
        assert!(matches!(decode_claims("opaque"), Err(AuthError::Malformed)));
        assert!(matches!(decode_claims("a.b.c.d"), Err(AuthError::Malformed)));
        assert!(matches!(decode_claims("e30.!!!"), Err(AuthError::Encoding(_))));
        assert!(matches!(decode_claims("{not json"), Err(AuthError::Json(_))));
        assert!(matches!(decode_claims("e30.WzFd"), Err(AuthError::NotAnObject)));
    }

    #[test]
    fn fake_token_uses_the_default_scheme() {
        let header = fake_token(&json!({"sub": "alice"}));
        let token = extract(&header, "FakeBearer").unwrap();
        assert_eq!(decode_claims(token).unwrap()["sub"], "alice");
    }
}

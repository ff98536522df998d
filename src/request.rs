//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Extensions;

use crate::method::Method;

/// An incoming HTTP request with its body fully buffered.
///
/// Middleware can stash per-request values in [`extensions`](Request::extensions);
/// the fake bearer stage uses this to hand the authenticated
/// [`Principal`](crate::auth::Principal) to handlers.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) extensions: Extensions,
}

impl Request {
    pub(crate) fn from_parts(method: Method, parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method,
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers: parts.headers,
            body,
            params: HashMap::new(),
            extensions: parts.extensions,
        }
    }

    /// Builds a request in process, without a socket.
    ///
    /// Used to drive a [`Service`](crate::Service) from tests:
    ///
    /// ```rust
    /// use fake_jwt_bearer::{Method, Request};
    ///
    /// let req = Request::builder(Method::Get, "/me?verbose=1")
    ///     .header("authorization", r#"FakeBearer {"sub":"alice"}"#)
    ///     .build();
    /// assert_eq!(req.path(), "/me");
    /// assert_eq!(req.query(), Some("verbose=1"));
    /// ```
    pub fn builder(method: Method, uri: &str) -> RequestBuilder {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (uri.to_owned(), None),
        };
        RequestBuilder { method, path, query, headers: HeaderMap::new(), body: Bytes::new() }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Header lookup. Names are case-insensitive; values that are not valid
    /// UTF-8 read as `None`. Non-ASCII UTF-8 (`zoë`) is returned as-is.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn extensions(&self) -> &Extensions { &self.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.extensions }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }
}

/// Fluent builder for [`Request`]. Obtain via [`Request::builder`].
pub struct RequestBuilder {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestBuilder {
    /// Appends a header.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `value` is not a valid header name / value.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name = HeaderName::from_bytes(name.as_bytes())
            .unwrap_or_else(|e| panic!("invalid header name `{name}`: {e}"));
        let value = HeaderValue::from_str(value)
            .unwrap_or_else(|e| panic!("invalid header value for `{name}`: {e}"));
        self.headers.append(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: self.body,
            params: HashMap::new(),
            extensions: Extensions::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::builder(Method::Get, "/")
            .header("X-Request-Id", "abc")
            .build();
        assert_eq!(req.header("x-request-id"), Some("abc"));
        assert_eq!(req.header("X-REQUEST-ID"), Some("abc"));
        assert_eq!(req.header("missing"), None);
    }

    #[test]
    fn header_lookup_decodes_utf8_values() {
        let mut req = Request::builder(Method::Get, "/")
            .header("x-user", "zoë")
            .build();
        assert_eq!(req.header("x-user"), Some("zoë"));

        req.headers.insert("x-user", HeaderValue::from_bytes(b"\xff").unwrap());
        assert_eq!(req.header("x-user"), None);
    }

    #[test]
    fn builder_splits_query_from_path() {
        let req = Request::builder(Method::Post, "/users").body("{}").build();
        assert_eq!(req.path(), "/users");
        assert_eq!(req.query(), None);
        assert_eq!(req.body(), b"{}");
    }

    #[test]
    fn extensions_carry_values_between_stages() {
        #[derive(Clone, Debug, PartialEq)]
        struct Marker(u8);

        let mut req = Request::builder(Method::Get, "/").build();
        req.extensions_mut().insert(Marker(7));
        assert_eq!(req.extensions().get::<Marker>(), Some(&Marker(7)));
    }
}

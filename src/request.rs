//! Incoming HTTP request type.

use bytes::Bytes;
use http::HeaderMap;

use crate::method::Method;
use crate::params::Params;

/// An incoming HTTP request with its body fully buffered.
pub struct Request {
    method: http::Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Bytes,
    params: Params,
}

impl Request {
    /// Builds a request by hand, e.g. to drive an [`App`](crate::App) in tests.
    ///
    /// `uri` is a path with an optional query string: `"/users/42?full=1"`.
    pub fn new(method: Method, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (uri.to_owned(), None),
        };
        Self {
            method: method.into(),
            path,
            query,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            params: Params::default(),
        }
    }

    pub(crate) fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers: parts.headers,
            body,
            params: Params::default(),
        }
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a header.
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn method(&self) -> &str { self.method.as_str() }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    pub(crate) fn http_method(&self) -> &http::Method { &self.method }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/:id`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// All path parameters captured for this request.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub(crate) fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    /// Removes `prefix` from the front of the path when it ends on a segment
    /// boundary. `/static/css/a.css` minus `/static` is `/css/a.css`, and
    /// `/static` minus `/static` is `/`.
    pub(crate) fn strip_prefix(&mut self, prefix: &str) {
        let Some(rest) = self.path.strip_prefix(prefix) else {
            return;
        };
        if rest.is_empty() {
            self.path = "/".to_owned();
        } else if rest.starts_with('/') {
            self.path = rest.to_owned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_query() {
        let req = Request::new(Method::Get, "/users/42?full=1");
        assert_eq!(req.path(), "/users/42");
        assert_eq!(req.query(), Some("full=1"));
        assert_eq!(req.method(), "GET");
    }

    #[test]
    fn strip_prefix_respects_segments() {
        let mut req = Request::new(Method::Get, "/static/css/a.css");
        req.strip_prefix("/static");
        assert_eq!(req.path(), "/css/a.css");

        let mut req = Request::new(Method::Get, "/static");
        req.strip_prefix("/static");
        assert_eq!(req.path(), "/");

        let mut req = Request::new(Method::Get, "/staticky");
        req.strip_prefix("/static");
        assert_eq!(req.path(), "/staticky");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::Post, "/")
            .with_header(http::header::CONTENT_TYPE, http::HeaderValue::from_static("text/plain"));
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
    }
}

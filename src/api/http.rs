/*!
 * HTTP Mapping
 * Conversions between hyper messages and the service's request/response types
 *
 * Handlers only see the method, path and decoded query. Request bodies are
 * never read.
 */

use super::types::{ApiError, StatusCode};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};

/// Body type of every response the service writes
pub type ResponseBody = Full<Bytes>;

/// Decoded query string; lookups return the first occurrence of a key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse `a=1&b=2` with form decoding
    pub fn parse(query: &str) -> Self {
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Routing view of an incoming request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: QueryParams,
}

impl<B> From<&hyper::Request<B>> for HttpRequest {
    fn from(request: &hyper::Request<B>) -> Self {
        let uri = request.uri();
        Self {
            method: request.method().as_str().to_string(),
            path: uri.path().to_string(),
            query: QueryParams::parse(uri.query().unwrap_or_default()),
        }
    }
}

/// Response produced by a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
        }
    }

    pub fn json(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.into(),
        }
    }

    /// Error body is the error text plus a newline
    pub fn from_error(error: &ApiError) -> Self {
        Self::text(error.status(), format!("{}\n", error))
    }

    pub fn into_hyper(self) -> hyper::Response<ResponseBody> {
        let mut response = hyper::Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = self.status.into();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        response
    }
}

//! Assembled outbound request.

use bytes::buf::Reader;
use bytes::{Buf, Bytes};
use http::{HeaderMap, Method};
use url::Url;

/// A fully assembled request, ready for a transport.
///
/// The `Host` override lives in its own field and never in `headers`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    host: Option<String>,
    body: Option<Bytes>,
}

impl OutboundRequest {
    pub(crate) fn new(
        method: Method,
        url: Url,
        headers: HeaderMap,
        host: Option<String>,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            host,
            body,
        }
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the resolved URL, including merged query parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the `Host` override, if one was given.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Get the body bytes. `None` for an empty body.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Get the body length. `None` for an empty body, leaving the choice to
    /// the transport.
    pub fn content_length(&self) -> Option<u64> {
        self.body.as_ref().map(|b| b.len() as u64)
    }

    /// Get a reader over the body.
    pub fn body_reader(&self) -> Reader<Bytes> {
        self.body.clone().unwrap_or_default().reader()
    }

    /// Split into method, URL, headers, host override and body.
    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.host, self.body)
    }
}

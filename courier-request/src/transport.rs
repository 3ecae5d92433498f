//! Hand-off to transport layers.
//!
//! The assembled request is converted, not sent: connection handling, TLS,
//! redirects and retries stay with whichever client dispatches it.

use bytes::Bytes;
use http::HeaderValue;
use http::header::HOST;

use crate::{OutboundRequest, RequestError, Result};

impl OutboundRequest {
    /// Convert into an [`http::Request`].
    ///
    /// The `Host` override is written back as a single `Host` header, since
    /// `http::Request` has no separate slot for it. An empty body becomes an
    /// empty `Bytes`.
    pub fn into_http(self) -> Result<http::Request<Bytes>> {
        let (method, url, mut headers, host, body) = self.into_parts();

        if let Some(host) = host {
            let value = HeaderValue::from_str(&host)
                .map_err(|_| RequestError::InvalidHost { value: host.clone() })?;
            headers.insert(HOST, value);
        }

        let uri: http::Uri = url
            .as_str()
            .parse()
            .map_err(|e: http::uri::InvalidUri| RequestError::Transport(e.to_string()))?;

        let mut request = http::Request::new(body.unwrap_or_default());
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.headers_mut() = headers;
        Ok(request)
    }
}

impl From<OutboundRequest> for reqwest::Request {
    /// The host override is already part of the URL, which is what reqwest
    /// derives its `Host` header from.
    fn from(outbound: OutboundRequest) -> Self {
        let (method, url, headers, _host, body) = outbound.into_parts();

        let mut request = reqwest::Request::new(method, url);
        *request.headers_mut() = headers;
        if let Some(body) = body {
            *request.body_mut() = Some(reqwest::Body::from(body));
        }
        request
    }
}

//! Request assembler.

use http::header::{CONTENT_TYPE, HOST, USER_AGENT};
use http::uri::Authority;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

use crate::body::{BodyTuple, build_body, encode_pairs};
use crate::headers::build_header;
use crate::input::{Field, Request};
use crate::{AssemblerConfig, OutboundRequest, RequestError, Result};

/// Turns input requests into outbound requests.
///
/// Holds only immutable configuration, so one assembler can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct RequestAssembler {
    config: Arc<AssemblerConfig>,
}

impl RequestAssembler {
    /// Create a new assembler with the given configuration.
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Get the assembler configuration.
    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assemble an outbound request.
    ///
    /// Fails on the first error; nothing is returned for a partially built
    /// request.
    pub fn assemble(&self, request: &Request) -> Result<OutboundRequest> {
        let method = request.method.clone();
        let mut url = build_url(&request.url, &request.parameters)?;
        let mut headers = build_header(&request.header)?;
        let body = build_body(&request.body)?;

        self.apply_defaults(&mut headers, &body)?;
        let host = apply_host_override(&mut headers, &mut url)?;

        debug!(
            method = %method,
            url = %url,
            headers = headers.len(),
            content_length = body.content_length,
            "Assembled request"
        );

        Ok(OutboundRequest::new(method, url, headers, host, body.content))
    }

    /// Add default headers that the request did not set itself.
    fn apply_defaults(&self, headers: &mut HeaderMap, body: &BodyTuple) -> Result<()> {
        if let Some(content_type) = body.content_type {
            insert_if_absent(headers, CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        let user_agent = HeaderValue::from_str(&self.config.user_agent).map_err(|_| {
            RequestError::InvalidHeaderValue {
                name: USER_AGENT.to_string(),
            }
        })?;
        insert_if_absent(headers, USER_AGENT, user_agent);

        for (name, value) in &self.config.default_headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|_| RequestError::InvalidHeaderName { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| RequestError::InvalidHeaderValue { name: name.clone() })?;
            insert_if_absent(headers, header_name, header_value);
        }

        Ok(())
    }
}

impl Default for RequestAssembler {
    fn default() -> Self {
        Self::new(AssemblerConfig::default())
    }
}

/// Assemble a request with the default configuration.
pub fn build_request(request: &Request) -> Result<OutboundRequest> {
    RequestAssembler::default().assemble(request)
}

fn insert_if_absent(headers: &mut HeaderMap, name: HeaderName, value: HeaderValue) {
    if headers.contains_key(&name) {
        return;
    }
    trace!(header = %name, "Applying default header");
    headers.insert(name, value);
}

/// Append query parameters after any query already present in the URL.
fn build_url(base: &Url, parameters: &[Field]) -> Result<Url> {
    let mut url = base.clone();

    if !parameters.is_empty() {
        let values = parameters
            .iter()
            .map(Field::resolve_bytes)
            .collect::<Result<Vec<_>>>()?;
        let suffix = encode_pairs(
            parameters
                .iter()
                .zip(&values)
                .map(|(field, value)| (field.name.as_str(), value.as_slice())),
        );

        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{suffix}"),
            _ => suffix,
        };
        url.set_query(Some(&query));
    }

    Ok(url)
}

/// Move a `Host` header out of the map and into the URL authority.
///
/// When the header is repeated only the first value is used; all of them are
/// removed from the map.
fn apply_host_override(headers: &mut HeaderMap, url: &mut Url) -> Result<Option<String>> {
    let Some(value) = headers.remove(HOST) else {
        return Ok(None);
    };

    let invalid = || RequestError::InvalidHost {
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    };

    let host = value.to_str().map_err(|_| invalid())?;
    let authority: Authority = host.parse().map_err(|_| invalid())?;
    // Anything after the host is a port and must fit in a u16.
    let has_port = authority.as_str().len() > authority.host().len();
    if host.contains('@') || (has_port && authority.port_u16().is_none()) {
        return Err(invalid());
    }

    url.set_host(Some(authority.host())).map_err(|_| invalid())?;
    url.set_port(authority.port_u16()).map_err(|_| invalid())?;

    trace!(host = %host, "Applied host override");
    Ok(Some(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Body, BodyKind};
    use http::Method;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_build_url_merges_parameters() {
        let merged = build_url(
            &url("https://localhost:8080/foo"),
            &[Field::new("q", "hello world")],
        )
        .unwrap();
        assert_eq!(merged.as_str(), "https://localhost:8080/foo?q=hello+world");
    }

    #[test]
    fn test_build_url_keeps_existing_query() {
        let merged = build_url(
            &url("https://example.com/search?q=first&lang=en"),
            &[Field::new("q", "second"), Field::new("page", "2")],
        )
        .unwrap();
        assert_eq!(
            merged.as_str(),
            "https://example.com/search?q=first&lang=en&q=second&page=2"
        );
    }

    #[test]
    fn test_build_url_without_parameters() {
        let original = url("https://example.com/path");
        assert_eq!(build_url(&original, &[]).unwrap(), original);
    }

    #[test]
    fn test_host_override() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("example.com:8080"));
        let mut target = url("https://localhost:8443/foo?q=1");

        let host = apply_host_override(&mut headers, &mut target).unwrap();

        assert_eq!(host.as_deref(), Some("example.com:8080"));
        assert!(!headers.contains_key(HOST));
        assert_eq!(target.as_str(), "https://example.com:8080/foo?q=1");
    }

    #[test]
    fn test_host_override_without_port() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("api.internal"));
        let mut target = url("http://127.0.0.1:3000/");

        apply_host_override(&mut headers, &mut target).unwrap();
        assert_eq!(target.as_str(), "http://api.internal/");
    }

    #[test]
    fn test_build_url_non_utf8_file_parameter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &[0x61, 0xff, 0x62]).unwrap();

        let merged = build_url(
            &url("http://localhost/upload?v=1"),
            &[Field::file("blob", file.path())],
        )
        .unwrap();
        assert_eq!(merged.as_str(), "http://localhost/upload?v=1&blob=a%FFb");
    }

    #[test]
    fn test_host_override_rejects_out_of_range_port() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("example.com:99999"));
        let mut target = url("http://localhost:3000/x");

        let err = apply_host_override(&mut headers, &mut target).unwrap_err();
        assert!(matches!(err, RequestError::InvalidHost { ref value } if value == "example.com:99999"));
        assert_eq!(target.as_str(), "http://localhost:3000/x");
    }

    #[test]
    fn test_host_override_rejects_empty_port() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("example.com:"));
        let mut target = url("http://localhost:3000/");

        assert!(apply_host_override(&mut headers, &mut target).is_err());
    }

    #[test]
    fn test_repeated_host_uses_first_value() {
        let mut headers = HeaderMap::new();
        headers.append(HOST, HeaderValue::from_static("first.example:8081"));
        headers.append(HOST, HeaderValue::from_static("second.example:8082"));
        let mut target = url("http://localhost/");

        let host = apply_host_override(&mut headers, &mut target).unwrap();

        assert_eq!(host.as_deref(), Some("first.example:8081"));
        assert_eq!(headers.get_all(HOST).iter().count(), 0);
        assert_eq!(target.as_str(), "http://first.example:8081/");
    }

    #[test]
    fn test_host_override_rejects_userinfo() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("user@example.com"));
        let mut target = url("http://localhost/");

        let err = apply_host_override(&mut headers, &mut target).unwrap_err();
        assert!(matches!(err, RequestError::InvalidHost { .. }));
    }

    #[test]
    fn test_no_host_header() {
        let mut headers = HeaderMap::new();
        let mut target = url("http://localhost/");
        assert_eq!(apply_host_override(&mut headers, &mut target).unwrap(), None);
        assert_eq!(target.as_str(), "http://localhost/");
    }

    #[test]
    fn test_defaults_do_not_override() {
        let assembler = RequestAssembler::new(
            AssemblerConfig::builder()
                .default_header("Accept", "application/json")
                .build(),
        );
        let request = Request::builder(Method::POST, url("https://example.com/"))
            .header("Content-Type", "text/plain")
            .header("user-agent", "custom/2.0")
            .header("Accept", "*/*")
            .body(Body::json(vec![Field::new("a", "1")], vec![]))
            .build();

        let outbound = assembler.assemble(&request).unwrap();
        let headers = outbound.headers();

        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers[USER_AGENT], "custom/2.0");
        assert_eq!(headers["accept"], "*/*");
    }

    #[test]
    fn test_defaults_applied() {
        let assembler = RequestAssembler::new(
            AssemblerConfig::builder()
                .user_agent("checker/1.0")
                .default_header("Accept", "application/json")
                .build(),
        );
        let request = Request::builder(Method::POST, url("https://example.com/"))
            .body(Body::form(vec![Field::new("a", "1")]))
            .build();

        let outbound = assembler.assemble(&request).unwrap();
        let headers = outbound.headers();

        assert_eq!(headers[CONTENT_TYPE], crate::body::FORM_CONTENT_TYPE);
        assert_eq!(headers[USER_AGENT], "checker/1.0");
        assert_eq!(assembler.config().user_agent, "checker/1.0");
        assert_eq!(headers["accept"], "application/json");
    }

    #[test]
    fn test_empty_body_has_no_content_type() {
        let request = Request::new(Method::GET, url("https://example.com/"));
        assert_eq!(request.body.kind, BodyKind::Empty);

        let outbound = build_request(&request).unwrap();
        assert!(!outbound.headers().contains_key(CONTENT_TYPE));
        assert!(outbound.headers().contains_key(USER_AGENT));
        assert!(outbound.body().is_none());
        assert_eq!(outbound.content_length(), None);
    }

    #[test]
    fn test_invalid_user_agent() {
        let assembler =
            RequestAssembler::new(AssemblerConfig::builder().user_agent("bad\nagent").build());
        let request = Request::new(Method::GET, url("https://example.com/"));

        let err = assembler.assemble(&request).unwrap_err();
        assert!(matches!(err, RequestError::InvalidHeaderValue { ref name } if name == "user-agent"));
    }

    #[test]
    fn test_assembler_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequestAssembler>();
    }
}

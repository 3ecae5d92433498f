//! Declarative request description.
//!
//! This is the model handed over by the argument parser. It is plain data:
//! nothing here touches the file system until [`Field::resolve`] is called
//! during assembly.

use crate::{RequestError, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// A single header, query or body entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Literal value, or a path when `is_file` is set.
    pub value: String,
    /// Whether `value` names a file whose contents become the value.
    #[serde(default)]
    pub is_file: bool,
}

impl Field {
    /// Create a field with a literal value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_file: false,
        }
    }

    /// Create a field whose value is read from `path` at build time.
    pub fn file(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            value: path.as_ref().to_string_lossy().into_owned(),
            is_file: true,
        }
    }

    /// Resolve the value as raw bytes, reading the whole file for file-backed
    /// fields. Used wherever the encoding is byte-based: headers, query
    /// parameters and form bodies.
    pub fn resolve_bytes(&self) -> Result<Vec<u8>> {
        if !self.is_file {
            return Ok(self.value.clone().into_bytes());
        }

        let bytes = std::fs::read(&self.value).map_err(|source| self.file_error(source))?;
        tracing::trace!(field = %self.name, path = %self.value, len = bytes.len(), "Resolved file field");
        Ok(bytes)
    }

    /// Resolve the value as text, for JSON strings.
    ///
    /// File contents must be UTF-8; other bytes are reported as a read error
    /// for the file rather than replaced.
    pub fn resolve(&self) -> Result<String> {
        let bytes = self.resolve_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            self.file_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn file_error(&self, source: std::io::Error) -> RequestError {
        RequestError::FileRead {
            path: self.value.clone().into(),
            source,
        }
    }
}

/// Ordered header fields. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Fields in input order.
    pub fields: Vec<Field>,
}

impl Header {
    /// Create a header from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Check if there are no header fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Kind of request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// No body.
    #[default]
    Empty,
    /// JSON object built from fields.
    Json,
    /// URL-encoded form.
    Form,
}

/// Request body description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Which builder branch runs.
    pub kind: BodyKind,
    /// String-valued fields.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Pre-formatted JSON fragments. Only used by JSON bodies; `is_file` is
    /// not consulted for these.
    #[serde(default)]
    pub raw_fields: Vec<Field>,
}

impl Body {
    /// Create an empty body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a JSON body.
    pub fn json(fields: Vec<Field>, raw_fields: Vec<Field>) -> Self {
        Self {
            kind: BodyKind::Json,
            fields,
            raw_fields,
        }
    }

    /// Create a form body.
    pub fn form(fields: Vec<Field>) -> Self {
        Self {
            kind: BodyKind::Form,
            fields,
            raw_fields: Vec::new(),
        }
    }
}

/// Input request description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Parsed target URL.
    pub url: Url,
    /// Query parameters, appended to any query already in `url`.
    pub parameters: Vec<Field>,
    /// Header fields.
    pub header: Header,
    /// Body description.
    pub body: Body,
}

impl Request {
    /// Create a request with no parameters, headers or body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            parameters: Vec::new(),
            header: Header::default(),
            body: Body::default(),
        }
    }

    /// Create a request builder.
    pub fn builder(method: Method, url: Url) -> RequestBuilder {
        RequestBuilder {
            request: Self::new(method, url),
        }
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Add a query parameter.
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.parameters.push(Field::new(name, value));
        self
    }

    /// Add a header field.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.header.fields.push(Field::new(name, value));
        self
    }

    /// Add a header field read from a file.
    pub fn header_file(mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.request.header.fields.push(Field::file(name, path));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: Body) -> Self {
        self.request.body = body;
        self
    }

    /// Build the request.
    pub fn build(self) -> Request {
        self.request
    }
}

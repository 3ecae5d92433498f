//! # Courier Request
//!
//! Assembles a declarative request description into an outbound HTTP
//! request: URL with merged query string, finalized headers and an encoded
//! body.
//!
//! ## Features
//!
//! - **Multi-value headers**: repeated header fields are kept in input order
//! - **File-backed fields**: header, query and body values read from files at build time
//! - **JSON bodies**: string fields plus raw JSON fragments embedded as values
//! - **Form bodies**: `application/x-www-form-urlencoded` encoding
//! - **Defaults**: content type and user agent applied only when absent
//! - **Host override**: a `Host` field retargets the request authority
//!
//! ## Quick Start
//!
//! ```rust
//! use courier_request::{Body, Field, Method, Request, Url, build_request};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = Request::builder(Method::POST, Url::parse("https://localhost:8080/foo")?)
//!     .parameter("q", "hello world")
//!     .header("X-Foo", "fizz buzz")
//!     .body(Body::json(
//!         vec![Field::new("name", "widget")],
//!         vec![Field::new("in_stock", "true")],
//!     ))
//!     .build();
//!
//! let outbound = build_request(&request)?;
//! assert_eq!(outbound.url().as_str(), "https://localhost:8080/foo?q=hello+world");
//! assert_eq!(outbound.headers()["content-type"], "application/json");
//! # Ok(())
//! # }
//! ```
//!
//! ## Sending
//!
//! ```rust,no_run
//! use courier_request::{Method, Request, Url, build_request};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = Request::new(Method::GET, Url::parse("https://api.example.com/users")?);
//!     let outbound = build_request(&request)?;
//!
//!     let client = reqwest::Client::new();
//!     let response = client.execute(outbound.into()).await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod assembler;
mod body;
mod config;
mod error;
mod headers;
mod input;
mod outbound;
mod transport;

pub use assembler::{RequestAssembler, build_request};
pub use body::{BodyTuple, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, build_body, build_json_object};
pub use config::{AssemblerConfig, AssemblerConfigBuilder};
pub use error::{RequestError, Result};
pub use headers::build_header;
pub use input::{Body, BodyKind, Field, Header, Request, RequestBuilder};
pub use outbound::OutboundRequest;

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderValue, Method, header};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use courier_request::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assembler::{RequestAssembler, build_request};
    pub use crate::body::BodyTuple;
    pub use crate::config::{AssemblerConfig, AssemblerConfigBuilder};
    pub use crate::error::{RequestError, Result};
    pub use crate::input::{Body, BodyKind, Field, Header, Request};
    pub use crate::outbound::OutboundRequest;
    pub use http::{HeaderMap, Method, header};
    pub use url::Url;
}

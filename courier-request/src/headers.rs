//! Header builder.

use crate::input::Header;
use crate::{RequestError, Result};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Build the header map from header fields.
///
/// Values are appended, never replaced, so repeated names become
/// multi-value headers in input order. No implicit headers are added.
pub fn build_header(header: &Header) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(header.fields.len());

    for field in &header.fields {
        let name = HeaderName::try_from(field.name.as_str()).map_err(|_| {
            RequestError::InvalidHeaderName {
                name: field.name.clone(),
            }
        })?;
        let value = HeaderValue::from_bytes(&field.resolve_bytes()?).map_err(|_| {
            RequestError::InvalidHeaderValue {
                name: field.name.clone(),
            }
        })?;
        headers.append(name, value);
    }

    Ok(headers)
}

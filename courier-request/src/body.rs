//! Body builder.

use crate::input::{Body, BodyKind, Field};
use crate::{RequestError, Result};
use bytes::Bytes;
use serde_json::{Map, Value};
use url::form_urlencoded::byte_serialize;

/// Content type of JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// A materialized body.
///
/// The default value stands for an empty body: no content, no content type
/// and zero length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyTuple {
    /// Encoded body bytes.
    pub content: Option<Bytes>,
    /// Content type of `content`.
    pub content_type: Option<&'static str>,
    /// Exact byte length of `content`.
    pub content_length: u64,
}

impl BodyTuple {
    fn new(content: Vec<u8>, content_type: &'static str) -> Self {
        let content = Bytes::from(content);
        Self {
            content_length: content.len() as u64,
            content: Some(content),
            content_type: Some(content_type),
        }
    }

    /// Check if this is the empty body.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

/// Build the body for a request.
pub fn build_body(body: &Body) -> Result<BodyTuple> {
    match body.kind {
        BodyKind::Empty => Ok(BodyTuple::default()),
        BodyKind::Json => build_json_body(&body.fields, &body.raw_fields),
        BodyKind::Form => build_form_body(&body.fields),
    }
}

fn build_json_body(fields: &[Field], raw_fields: &[Field]) -> Result<BodyTuple> {
    let object = build_json_object(fields, raw_fields)?;
    let bytes = serde_json::to_vec(&Value::Object(object))?;
    Ok(BodyTuple::new(bytes, JSON_CONTENT_TYPE))
}

/// Build the top-level JSON object.
///
/// String fields come first, then raw fragments, each in input order. A key
/// may only be given once across both.
pub fn build_json_object(fields: &[Field], raw_fields: &[Field]) -> Result<Map<String, Value>> {
    let mut object = Map::new();

    for field in fields {
        insert_unique(&mut object, &field.name, Value::String(field.resolve()?))?;
    }

    for field in raw_fields {
        let value = serde_json::from_str::<Value>(&field.value).map_err(|source| {
            RequestError::InvalidJsonFragment {
                field: field.name.clone(),
                source,
            }
        })?;
        insert_unique(&mut object, &field.name, value)?;
    }

    Ok(object)
}

fn insert_unique(object: &mut Map<String, Value>, name: &str, value: Value) -> Result<()> {
    if object.contains_key(name) {
        return Err(RequestError::DuplicateJsonKey {
            name: name.to_string(),
        });
    }
    object.insert(name.to_string(), value);
    Ok(())
}

fn build_form_body(fields: &[Field]) -> Result<BodyTuple> {
    let values = fields
        .iter()
        .map(Field::resolve_bytes)
        .collect::<Result<Vec<_>>>()?;
    let encoded = encode_pairs(
        fields
            .iter()
            .zip(&values)
            .map(|(field, value)| (field.name.as_str(), value.as_slice())),
    );
    Ok(BodyTuple::new(encoded.into_bytes(), FORM_CONTENT_TYPE))
}

/// Encode pairs as `application/x-www-form-urlencoded`.
///
/// Values are percent-encoded byte by byte, so they need not be UTF-8.
pub(crate) fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> String {
    let mut encoded = String::new();
    for (index, (name, value)) in pairs.into_iter().enumerate() {
        if index > 0 {
            encoded.push('&');
        }
        encoded.extend(byte_serialize(name.as_bytes()));
        encoded.push('=');
        encoded.extend(byte_serialize(value));
    }
    encoded
}

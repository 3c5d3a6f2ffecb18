//! Lenient decoding of the date-index response body.
//!
//! The date-index endpoint has served several body shapes over time. Each
//! shape has its own decoder; [`decode_identifiers`] tries them in a fixed
//! order and takes the first that yields a result:
//!
//! 1. `["a", "b"]`
//! 2. `[{"id": "a"}, {"_id": "b"}]` (rejected when no object carries an id)
//! 3. `{"items": ["a", "b"]}`
//! 4. `{"contents": [{"_id": "a"}, ...]}` (same object rule as shape 2)

use serde::Deserialize;

use crate::api::ApiError;
use crate::content::ContentId;

/// One decode attempt. `None` means "not this shape".
type ShapeDecoder = fn(&[u8]) -> Option<Vec<ContentId>>;

/// Decoders in the order they are attempted.
const DECODERS: [(&str, ShapeDecoder); 4] = [
    ("string_list", decode_string_list),
    ("object_list", decode_object_list),
    ("items_envelope", decode_items_envelope),
    ("contents_envelope", decode_contents_envelope),
];

#[derive(Deserialize)]
struct IdObject {
    id: Option<String>,
    #[serde(rename = "_id")]
    underscore_id: Option<String>,
}

#[derive(Deserialize)]
struct ItemsEnvelope {
    items: Vec<String>,
}

#[derive(Deserialize)]
struct ContentsEnvelope {
    contents: Vec<IdObject>,
}

/// Decode a date-index body into identifiers, in server order.
///
/// # Errors
///
/// [`ApiError::Parse`] when no shape matches.
pub fn decode_identifiers(body: &[u8]) -> Result<Vec<ContentId>, ApiError> {
    for (name, decoder) in DECODERS {
        if let Some(ids) = decoder(body) {
            tracing::debug!(shape = name, count = ids.len(), "Decoded identifier list");
            return Ok(ids);
        }
    }

    Err(ApiError::Parse(
        "date index body matched no known identifier shape".to_string(),
    ))
}

pub(crate) fn decode_string_list(body: &[u8]) -> Option<Vec<ContentId>> {
    serde_json::from_slice::<Vec<String>>(body).ok()
}

pub(crate) fn decode_object_list(body: &[u8]) -> Option<Vec<ContentId>> {
    let objects: Vec<IdObject> = serde_json::from_slice(body).ok()?;
    collect_object_ids(objects)
}

pub(crate) fn decode_items_envelope(body: &[u8]) -> Option<Vec<ContentId>> {
    serde_json::from_slice::<ItemsEnvelope>(body)
        .ok()
        .map(|env| env.items)
}

pub(crate) fn decode_contents_envelope(body: &[u8]) -> Option<Vec<ContentId>> {
    let envelope: ContentsEnvelope = serde_json::from_slice(body).ok()?;
    collect_object_ids(envelope.contents)
}

/// `id` wins over `_id`; objects with neither are skipped. An empty result
/// rejects the shape.
fn collect_object_ids(objects: Vec<IdObject>) -> Option<Vec<ContentId>> {
    let ids: Vec<ContentId> = objects
        .into_iter()
        .filter_map(|o| o.id.or(o.underscore_id))
        .collect();
    (!ids.is_empty()).then_some(ids)
}

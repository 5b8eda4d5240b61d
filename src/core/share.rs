//! Share links: a full result embedded in a hash-routed URL
//!
//! Shape: `<origin><path>#/result?data=<url-encoded base64 JSON>`

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::types::{SurveyError, SurveyResult, TypeResult};
use crate::{RESULT_ROUTE, SHARE_DATA_PARAM};

/// Base64 of the result's JSON (UTF-8 bytes, standard alphabet, padded)
pub fn encode_result(result: &TypeResult) -> SurveyResult<String> {
    let json = serde_json::to_string(result)
        .map_err(|e| SurveyError::ShareError(format!("cannot serialize result: {}", e)))?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Inverse of `encode_result`
pub fn decode_result(encoded: &str) -> SurveyResult<TypeResult> {
    let trimmed = encoded.trim();
    let bytes = STANDARD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed.trim_end_matches('=')))
        .map_err(|e| SurveyError::DecodeError(format!("invalid base64: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| SurveyError::DecodeError(format!("invalid result JSON: {}", e)))
}

/// Build the share URL for `result`, preserving `path`
pub fn build_share_link(origin: &str, path: &str, result: &TypeResult) -> SurveyResult<String> {
    let encoded = encode_result(result)?;
    let param: String = form_urlencoded::byte_serialize(encoded.as_bytes()).collect();
    let path = if path.is_empty() { "/" } else { path };
    Ok(format!(
        "{}{}{}?{}={}",
        origin.trim_end_matches('/'),
        path,
        RESULT_ROUTE,
        SHARE_DATA_PARAM,
        param
    ))
}

/// Value of the `data` parameter in a query string
fn data_param(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SHARE_DATA_PARAM)
        // An unescaped '+' from base64 reads back as a space
        .map(|(_, value)| value.replace(' ', "+"))
        .filter(|value| !value.is_empty())
}

/// Pull the encoded payload out of a link.
///
/// The regular query string wins; otherwise the query embedded in the
/// fragment (`#/result?data=...`) is used.
pub fn extract_payload(link: &str) -> Option<String> {
    let (before_hash, fragment) = link.split_once('#').unwrap_or((link, ""));

    before_hash
        .split_once('?')
        .and_then(|(_, query)| data_param(query))
        .or_else(|| fragment.split_once('?').and_then(|(_, query)| data_param(query)))
}

/// Decode the result carried by a link.
///
/// `Ok(None)` when the link carries no payload at all.
pub fn decode_share_link(link: &str) -> SurveyResult<Option<TypeResult>> {
    match extract_payload(link) {
        Some(payload) => decode_result(&payload).map(Some),
        None => Ok(None),
    }
}

/// Result from a link, or `None`; decode failures are logged, not raised
pub fn result_from_link(link: &str) -> Option<TypeResult> {
    match decode_share_link(link) {
        Ok(Some(result)) => {
            debug!("Decoded shared {} result", result.kind);
            Some(result)
        }
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to decode shared result: {}", e);
            None
        }
    }
}

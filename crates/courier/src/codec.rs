//! Attachment codec: converts uploaded bytes to the transport-safe
//! base64 form carried in webhook payloads, and back.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use uuid::Uuid;

use crate::errors::{RelayError, RelayResult};
use crate::models::Attachment;

/// Encode raw bytes into an attachment. Pure transform: no compression,
/// no validation of the mime type against the content.
pub fn encode(data: &[u8], filename: &str, mime_type: &str) -> Attachment {
    let id = Uuid::new_v4().to_string();
    Attachment {
        url: format!("/attachments/{}", id),
        id,
        name: filename.to_string(),
        mime_type: mime_type.to_string(),
        size_bytes: data.len() as u64,
        encoded_payload: Some(STANDARD.encode(data)),
    }
}

/// Recover the original bytes from an encoded attachment.
pub fn decode(attachment: &Attachment) -> RelayResult<Vec<u8>> {
    let payload = attachment
        .encoded_payload
        .as_deref()
        .ok_or_else(|| RelayError::Internal("attachment has no encoded payload".to_string()))?;

    STANDARD
        .decode(payload)
        .map_err(|e| RelayError::Internal(format!("invalid attachment encoding: {}", e)))
}

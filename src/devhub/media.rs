//! Image attachments travel inline as data URIs, keeping a hub directory
//! self-contained. Encoding happens before the post is constructed, so a
//! post never references a half-read file.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{HubError, Result};

const DATA_URI_PREFIX: &str = "data:";

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    pub mime: String,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Reads a file and encodes it as `data:<mime>;base64,<payload>`, guessing
/// the mime type from the extension.
pub fn encode_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(HubError::Io)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(encode_bytes(mime.essence_str(), &bytes))
}

pub fn encode_bytes(mime: &str, bytes: &[u8]) -> String {
    format!("{}{};base64,{}", DATA_URI_PREFIX, mime, BASE64.encode(bytes))
}

/// Parses a base64 data URI back into mime and bytes.
pub fn parse(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| HubError::Validation("Not a data URI".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| HubError::Validation("Data URI has no payload".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| HubError::Validation("Only base64 data URIs are supported".into()))?;
    let data = BASE64
        .decode(payload)
        .map_err(|e| HubError::Validation(format!("Invalid base64 payload: {}", e)))?;
    Ok(DataUri {
        mime: mime.to_string(),
        data,
    })
}

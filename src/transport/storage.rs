use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::domain::{FileUpload, FileUploadResponse};
use crate::transport::TransportError;

/// JSON body for `POST /storage/v1/files`.
///
/// File bytes travel base64-encoded in the `file` field; the `type` tag is
/// the literal uppercase form the API documents.
pub fn encode_upload_body(upload: &FileUpload) -> Value {
    let mut body = Map::new();
    body.insert("file".to_owned(), json!(BASE64.encode(upload.data())));
    body.insert("type".to_owned(), json!(upload.file_type().as_str()));
    if let Some(name) = upload.file_name() {
        body.insert("name".to_owned(), json!(name));
    }
    if let Some(link) = upload.link_url() {
        body.insert("link".to_owned(), json!(link));
    }
    Value::Object(body)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadWire {
    file_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

pub fn decode_upload_response(json: &str) -> Result<FileUploadResponse, TransportError> {
    let wire: UploadWire = serde_json::from_str(json)?;
    if wire.file_id.trim().is_empty() {
        return Err(TransportError::MissingField { field: "fileId" });
    }
    Ok(FileUploadResponse {
        file_id: wire.file_id,
        name: wire.name,
        url: wire.url,
    })
}

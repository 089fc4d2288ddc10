//! Transport layer: wire-format details (signing, query encoding, JSON
//! serialization/deserialization).

pub mod auth;
mod cash;
mod groups;
mod messages;
pub mod query;
mod statistics;
mod storage;

pub use cash::decode_balance;
pub use groups::{
    decode_add_messages_response, decode_group_info, decode_group_list, encode_add_messages_body,
    encode_create_group_body, encode_remove_messages_body, encode_reserve_body,
};
pub use messages::{
    decode_detailed_send_response, decode_message_list, decode_single_send_response,
    encode_send_many_body, encode_send_one_body,
};
pub use statistics::decode_statistics;
pub use storage::{decode_upload_response, encode_upload_body};

use crate::domain::ScheduledDate;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains unparseable date: {input}")]
    InvalidDate { input: String },

    #[error("response is missing required field: {field}")]
    MissingField { field: &'static str },
}

/// Parse an optional server-side date string back into canonical form.
pub(crate) fn opt_date(value: Option<String>) -> Result<Option<ScheduledDate>, TransportError> {
    match value {
        None => Ok(None),
        Some(input) => ScheduledDate::parse(&input)
            .map(Some)
            .map_err(|_| TransportError::InvalidDate { input }),
    }
}

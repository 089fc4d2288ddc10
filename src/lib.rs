//! Typed Rust client for the Solapi messaging HTTP API.
//!
//! The design follows a small layered split: a domain layer of strong types,
//! a transport layer for wire-format concerns (HMAC request signing, query
//! encoding, JSON bodies), and a client layer mapping one async method onto
//! each API operation.
//!
//! ```rust,no_run
//! use solapi::{Credentials, Message, Recipient, SolapiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), solapi::SolapiError> {
//!     let client = SolapiClient::new(Credentials::new("api-key", "api-secret")?);
//!     let message = Message::new(
//!         Recipient::new("01012345678")?,
//!         Recipient::new("01000000000")?,
//!     )
//!     .text("hello");
//!     let _resp = client.send_one(message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{HttpMethod, SolapiClient, SolapiClientBuilder, SolapiError};
pub use domain::{
    AddMessageResult, AddMessagesResponse, Agent, ApiKey, ApiSecret, AppId, Balance, Credentials,
    DetailedSendResponse, FailedMessage, FileType, FileUpload, FileUploadResponse, GetGroupsQuery,
    GetMessagesQuery, GroupId, GroupInfo, GroupList, ImageId, Message, MessageCount, MessageId,
    MessageList, MessageRecord, MessageType, PhoneNumber, Recipient, SEND_MAX_MESSAGES,
    ScheduledDate, SendMany, SendOptions, SingleSendResponse, Statistics, StatisticsQuery,
    ValidationError,
};

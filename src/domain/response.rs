use std::collections::BTreeMap;

use crate::domain::datetime::ScheduledDate;
use crate::domain::value::{GroupId, MessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Per-group message counters as reported by the server.
pub struct MessageCount {
    pub total: u64,
    pub sent_total: u64,
    pub sent_failed: u64,
    pub sent_success: u64,
    pub sent_pending: u64,
    pub sent_replacement: u64,
    pub refund: u64,
    pub registered_failed: u64,
    pub registered_success: u64,
}

#[derive(Debug, Clone, PartialEq)]
/// State of a message group.
pub struct GroupInfo {
    pub group_id: GroupId,
    pub count: MessageCount,
    pub status: Option<String>,
    pub scheduled_date: Option<ScheduledDate>,
    pub date_created: Option<ScheduledDate>,
    pub date_updated: Option<ScheduledDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One message the server rejected during registration.
pub struct FailedMessage {
    pub to: String,
    pub from: Option<String>,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of a detailed batch send (`send-many/detail`).
///
/// `failed_messages` lists per-message rejections within an otherwise
/// accepted batch; a batch where every message failed is surfaced as an
/// error instead, never as this value.
pub struct DetailedSendResponse {
    pub group_info: GroupInfo,
    pub failed_messages: Vec<FailedMessage>,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of a single-message send (`send`).
pub struct SingleSendResponse {
    pub message_id: MessageId,
    pub group_id: Option<GroupId>,
    pub to: String,
    pub from: Option<String>,
    pub message_type: Option<String>,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
    pub country: Option<String>,
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Outcome of adding messages to an existing group.
pub struct AddMessagesResponse {
    pub error_count: u64,
    pub results: Vec<AddMessageResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-message registration outcome inside [`AddMessagesResponse`].
pub struct AddMessageResult {
    pub to: Option<String>,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Page of groups returned by `get_groups`.
pub struct GroupList {
    pub start_key: Option<String>,
    pub next_key: Option<String>,
    pub limit: Option<u32>,
    pub groups: BTreeMap<GroupId, GroupInfo>,
}

#[derive(Debug, Clone, PartialEq)]
/// Page of messages returned by `get_messages` / `get_group_messages`.
pub struct MessageList {
    pub start_key: Option<String>,
    pub next_key: Option<String>,
    pub limit: Option<u32>,
    pub messages: BTreeMap<MessageId, MessageRecord>,
}

#[derive(Debug, Clone, PartialEq)]
/// A stored message as returned by the list endpoints.
pub struct MessageRecord {
    pub to: String,
    pub from: Option<String>,
    pub text: Option<String>,
    pub message_type: Option<String>,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
    pub group_id: Option<GroupId>,
    pub date_received: Option<ScheduledDate>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Account balance (`GET /cash/v1/balance`).
pub struct Balance {
    pub balance: f64,
    pub point: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// Aggregate counters for a queried date range.
pub struct Statistics {
    pub start_date: Option<ScheduledDate>,
    pub end_date: Option<ScheduledDate>,
    pub count: MessageCount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a storage upload (`POST /storage/v1/files`).
pub struct FileUploadResponse {
    pub file_id: String,
    pub name: Option<String>,
    pub url: Option<String>,
}

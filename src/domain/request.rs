use crate::domain::datetime::ScheduledDate;
use crate::domain::validation::ValidationError;
use crate::domain::value::{AppId, FileType, GroupId, ImageId, MessageId, MessageType, Recipient};

/// Server-side cap on one batch send (`send-many/detail`).
pub const SEND_MAX_MESSAGES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Client descriptor embedded in send and group bodies for diagnostics.
///
/// Computed once at client construction and passed along explicitly; there is
/// no ambient global.
pub struct Agent {
    pub sdk_version: String,
    pub os_platform: String,
}

impl Agent {
    /// Descriptor for the running process: crate version plus host platform.
    pub fn current() -> Self {
        Self {
            sdk_version: format!("rust/{}", env!("CARGO_PKG_VERSION")),
            os_platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::current()
    }
}

#[derive(Debug, Clone)]
/// A single outgoing message.
///
/// `to` and `from` are required; everything else is optional and omitted from
/// the wire when absent. When `message_type` is not set the server detects it
/// from the content.
pub struct Message {
    pub to: Recipient,
    pub from: Recipient,
    pub text: Option<String>,
    pub message_type: Option<MessageType>,
    pub subject: Option<String>,
    pub image_id: Option<ImageId>,
    pub country: Option<String>,
    pub auto_type_detect: Option<bool>,
}

impl Message {
    /// Create a message with only the required addressing fields set.
    pub fn new(to: Recipient, from: Recipient) -> Self {
        Self {
            to,
            from,
            text: None,
            message_type: None,
            subject: None,
            image_id: None,
            country: None,
            auto_type_detect: None,
        }
    }

    /// Set the message body text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an explicit channel type instead of server-side detection.
    pub fn message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = Some(message_type);
        self
    }
}

#[derive(Debug, Clone, Default)]
/// Options shared by send and group-creation calls.
pub struct SendOptions {
    /// Attach sends to a registered application.
    pub app_id: Option<AppId>,
    /// Allow duplicate recipient/text pairs within one group.
    pub allow_duplicates: bool,
    /// Schedule the whole batch instead of sending immediately.
    pub scheduled_date: Option<ScheduledDate>,
}

#[derive(Debug, Clone)]
/// Batch send request (`send-many/detail` and the deprecated `send-many`).
pub struct SendMany {
    messages: Vec<Message>,
    options: SendOptions,
}

impl SendMany {
    /// Create a batch with default options.
    ///
    /// Invariant: `1..=10_000` messages.
    pub fn new(messages: Vec<Message>) -> Result<Self, ValidationError> {
        Self::with_options(messages, SendOptions::default())
    }

    /// Create a batch with explicit options.
    pub fn with_options(
        messages: Vec<Message>,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty { field: "messages" });
        }
        if messages.len() > SEND_MAX_MESSAGES {
            return Err(ValidationError::TooManyMessages {
                max: SEND_MAX_MESSAGES,
                actual: messages.len(),
            });
        }
        Ok(Self { messages, options })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default)]
/// Filter for `get_groups` (`GET /messages/v4/groups`).
///
/// Absent fields are omitted from the query string entirely.
pub struct GetGroupsQuery {
    pub group_id: Option<GroupId>,
    pub criteria: Option<String>,
    pub cond: Option<String>,
    pub value: Option<String>,
    pub start_key: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default)]
/// Filter for `get_messages` (`GET /messages/v4/list`).
pub struct GetMessagesQuery {
    pub message_id: Option<MessageId>,
    pub group_id: Option<GroupId>,
    pub to: Option<Recipient>,
    pub from: Option<Recipient>,
    pub message_type: Option<MessageType>,
    pub status_code: Option<String>,
    pub start_date: Option<ScheduledDate>,
    pub end_date: Option<ScheduledDate>,
    pub start_key: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default)]
/// Date-range filter for `get_statistics` (`GET /messages/v4/statistics`).
pub struct StatisticsQuery {
    pub start_date: Option<ScheduledDate>,
    pub end_date: Option<ScheduledDate>,
}

#[derive(Debug, Clone)]
/// File content destined for `POST /storage/v1/files`.
///
/// The bytes are base64-encoded into the JSON body by the transport layer;
/// callers hand over the raw content.
pub struct FileUpload {
    data: Vec<u8>,
    file_type: FileType,
    name: Option<String>,
    link: Option<String>,
}

impl FileUpload {
    /// Create an upload request.
    ///
    /// Invariant: `data` must not be empty.
    pub fn new(data: Vec<u8>, file_type: FileType) -> Result<Self, ValidationError> {
        if data.is_empty() {
            return Err(ValidationError::Empty { field: "file" });
        }
        Ok(Self {
            data,
            file_type,
            name: None,
            link: None,
        })
    }

    /// Attach an original file name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a link target (used by RCS uploads).
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn file_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn link_url(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

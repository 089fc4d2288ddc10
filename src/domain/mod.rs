//! Domain layer: strong types with validation and invariants (no I/O).

mod datetime;
mod request;
mod response;
mod validation;
mod value;

pub use datetime::ScheduledDate;
pub use request::{
    Agent, FileUpload, GetGroupsQuery, GetMessagesQuery, Message, SEND_MAX_MESSAGES, SendMany,
    SendOptions, StatisticsQuery,
};
pub use response::{
    AddMessageResult, AddMessagesResponse, Balance, DetailedSendResponse, FailedMessage,
    FileUploadResponse, GroupInfo, GroupList, MessageCount, MessageList, MessageRecord,
    SingleSendResponse, Statistics,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, ApiSecret, AppId, Credentials, FileType, GroupId, ImageId, MessageId, MessageType,
    PhoneNumber, Recipient,
};

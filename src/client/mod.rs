//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use url::Url;

use crate::domain::{
    AddMessagesResponse, Agent, Balance, Credentials, DetailedSendResponse, FailedMessage,
    FileUpload, FileUploadResponse, GetGroupsQuery, GetMessagesQuery, GroupId, GroupInfo,
    GroupList, Message, MessageId, MessageList, ScheduledDate, SendMany, SendOptions,
    SingleSendResponse, Statistics, StatisticsQuery, ValidationError,
};
use crate::transport;

const DEFAULT_BASE_URL: &str = "https://api.solapi.com";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP verb used by one API operation.
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
        headers: &'a [(String, String)],
        body: Option<String>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
        headers: &'a [(String, String)],
        body: Option<String>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let method = match method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, url);
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = body {
                builder = builder
                    .header("Content-Type", "application/json")
                    .body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SolapiClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - the business-level "every message in the batch was rejected" case,
/// - validation/parse failures.
pub enum SolapiError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    ///
    /// `error_code` / `error_message` are the server's error payload when it
    /// could be parsed; `body` is the raw response for diagnostics.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus {
        status: u16,
        error_code: Option<String>,
        error_message: Option<String>,
        body: Option<String>,
    },

    /// The server accepted the HTTP request but rejected every message in the
    /// batch. Partial rejections are not an error; they are reported inside
    /// [`DetailedSendResponse::failed_messages`].
    #[error("no message was accepted ({} rejected)", failed_messages.len())]
    MessageNotAccepted { failed_messages: Vec<FailedMessage> },

    /// Response body could not be parsed as the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn parse_error(err: transport::TransportError) -> SolapiError {
    SolapiError::Parse(Box::new(err))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Clone)]
/// Builder for [`SolapiClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct SolapiClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    agent: Agent,
}

impl SolapiClientBuilder {
    /// Create a builder with the production base URL and no overrides.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            agent: Agent::current(),
        }
    }

    /// Override the API base URL (useful for tests and staging).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the agent descriptor embedded in request bodies.
    pub fn agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Build a [`SolapiClient`].
    pub fn build(self) -> Result<SolapiClient, SolapiError> {
        let base_url = self.base_url.trim_end_matches('/').to_owned();
        Url::parse(&base_url).map_err(|err| SolapiError::Transport(Box::new(err)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SolapiError::Transport(Box::new(err)))?;

        Ok(SolapiClient {
            credentials: self.credentials,
            base_url,
            agent: self.agent,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Solapi client.
///
/// One method per API operation; each builds a typed request, signs it, and
/// parses the typed response. The client holds no mutable state, so one
/// instance can serve concurrent calls; it never retries, queues, or
/// rate-limits on its own.
pub struct SolapiClient {
    credentials: Credentials,
    base_url: String,
    agent: Agent,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for SolapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolapiClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("agent", &self.agent)
            .finish_non_exhaustive()
    }
}

impl SolapiClient {
    /// Create a client against the production endpoint.
    ///
    /// For more customization, use [`SolapiClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            agent: Agent::current(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SolapiClientBuilder {
        SolapiClientBuilder::new(credentials)
    }

    /// Send a batch of messages with per-message results
    /// (`POST /messages/v4/send-many/detail`).
    ///
    /// Errors:
    /// - [`SolapiError::MessageNotAccepted`] when the server rejected every
    ///   message in the batch, carrying the per-message failure list,
    /// - [`SolapiError::HttpStatus`] for non-2xx responses.
    ///
    /// A partially rejected batch resolves successfully; inspect
    /// [`DetailedSendResponse::failed_messages`].
    pub async fn send(&self, batch: SendMany) -> Result<DetailedSendResponse, SolapiError> {
        let url = self.endpoint("/messages/v4/send-many/detail");
        let body = transport::encode_send_many_body(&batch, &self.agent);
        let raw = self.request(HttpMethod::Post, url, Some(body)).await?;
        let response = transport::decode_detailed_send_response(&raw).map_err(parse_error)?;

        let count = &response.group_info.count;
        if count.total > 0 && count.registered_failed == count.total {
            return Err(SolapiError::MessageNotAccepted {
                failed_messages: response.failed_messages,
            });
        }
        Ok(response)
    }

    /// Send a single message (`POST /messages/v4/send`).
    pub async fn send_one(&self, message: Message) -> Result<SingleSendResponse, SolapiError> {
        let url = self.endpoint("/messages/v4/send");
        let body = transport::encode_send_one_body(&message, &self.agent);
        let raw = self.request(HttpMethod::Post, url, Some(body)).await?;
        transport::decode_single_send_response(&raw).map_err(parse_error)
    }

    /// Send a batch through the legacy endpoint (`POST /messages/v4/send-many`).
    #[deprecated(since = "0.2.0", note = "the send-many endpoint is deprecated; use `send`")]
    pub async fn send_many(&self, batch: SendMany) -> Result<GroupInfo, SolapiError> {
        let url = self.endpoint("/messages/v4/send-many");
        let body = transport::encode_send_many_body(&batch, &self.agent);
        let raw = self.request(HttpMethod::Post, url, Some(body)).await?;
        transport::decode_group_info(&raw).map_err(parse_error)
    }

    /// Create an empty message group (`POST /messages/v4/groups`).
    pub async fn create_group(&self, options: SendOptions) -> Result<GroupInfo, SolapiError> {
        let url = self.endpoint("/messages/v4/groups");
        let body = transport::encode_create_group_body(&options, &self.agent);
        let raw = self.request(HttpMethod::Post, url, Some(body)).await?;
        transport::decode_group_info(&raw).map_err(parse_error)
    }

    /// Register messages into an existing group
    /// (`PUT /messages/v4/groups/{id}/messages`).
    pub async fn add_messages_to_group(
        &self,
        group_id: &GroupId,
        messages: Vec<Message>,
    ) -> Result<AddMessagesResponse, SolapiError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty { field: "messages" }.into());
        }
        let url = self.group_endpoint(group_id, "/messages");
        let body = transport::encode_add_messages_body(&messages);
        let raw = self.request(HttpMethod::Put, url, Some(body)).await?;
        transport::decode_add_messages_response(&raw).map_err(parse_error)
    }

    /// Dispatch a populated group immediately
    /// (`POST /messages/v4/groups/{id}/send`).
    pub async fn send_group(&self, group_id: &GroupId) -> Result<GroupInfo, SolapiError> {
        let url = self.group_endpoint(group_id, "/send");
        let raw = self.request(HttpMethod::Post, url, None).await?;
        transport::decode_group_info(&raw).map_err(parse_error)
    }

    /// Schedule a populated group for a future instant
    /// (`POST /messages/v4/groups/{id}/schedule`).
    pub async fn reserve_group(
        &self,
        group_id: &GroupId,
        scheduled_date: ScheduledDate,
    ) -> Result<GroupInfo, SolapiError> {
        let url = self.group_endpoint(group_id, "/schedule");
        let body = transport::encode_reserve_body(&scheduled_date);
        let raw = self.request(HttpMethod::Post, url, Some(body)).await?;
        transport::decode_group_info(&raw).map_err(parse_error)
    }

    /// Cancel a group's schedule (`DELETE /messages/v4/groups/{id}/schedule`).
    pub async fn remove_reservation(&self, group_id: &GroupId) -> Result<GroupInfo, SolapiError> {
        let url = self.group_endpoint(group_id, "/schedule");
        let raw = self.request(HttpMethod::Delete, url, None).await?;
        transport::decode_group_info(&raw).map_err(parse_error)
    }

    /// Delete a group server-side (`DELETE /messages/v4/groups/{id}`).
    pub async fn remove_group(&self, group_id: &GroupId) -> Result<GroupInfo, SolapiError> {
        let url = self.group_endpoint(group_id, "");
        let raw = self.request(HttpMethod::Delete, url, None).await?;
        transport::decode_group_info(&raw).map_err(parse_error)
    }

    /// List message groups (`GET /messages/v4/groups`).
    pub async fn get_groups(&self, query: GetGroupsQuery) -> Result<GroupList, SolapiError> {
        let pairs = transport::query::encode_get_groups_query(&query);
        let url = self.endpoint_with_query("/messages/v4/groups", pairs)?;
        let raw = self.request(HttpMethod::Get, url, None).await?;
        transport::decode_group_list(&raw).map_err(parse_error)
    }

    /// List the messages registered in a group
    /// (`GET /messages/v4/groups/{id}/messages`).
    pub async fn get_group_messages(
        &self,
        group_id: &GroupId,
    ) -> Result<MessageList, SolapiError> {
        let url = self.group_endpoint(group_id, "/messages");
        let raw = self.request(HttpMethod::Get, url, None).await?;
        transport::decode_message_list(&raw).map_err(parse_error)
    }

    /// Remove messages from a group before sending
    /// (`DELETE /messages/v4/groups/{id}/messages`).
    ///
    /// The ids travel in the JSON request body, not the query string.
    pub async fn remove_group_messages(
        &self,
        group_id: &GroupId,
        message_ids: Vec<MessageId>,
    ) -> Result<GroupInfo, SolapiError> {
        if message_ids.is_empty() {
            return Err(ValidationError::Empty {
                field: "messageIds",
            }
            .into());
        }
        let url = self.group_endpoint(group_id, "/messages");
        let body = transport::encode_remove_messages_body(&message_ids);
        let raw = self.request(HttpMethod::Delete, url, Some(body)).await?;
        transport::decode_group_info(&raw).map_err(parse_error)
    }

    /// Search sent messages (`GET /messages/v4/list`).
    pub async fn get_messages(
        &self,
        query: GetMessagesQuery,
    ) -> Result<MessageList, SolapiError> {
        let pairs = transport::query::encode_get_messages_query(&query);
        let url = self.endpoint_with_query("/messages/v4/list", pairs)?;
        let raw = self.request(HttpMethod::Get, url, None).await?;
        transport::decode_message_list(&raw).map_err(parse_error)
    }

    /// Aggregate send statistics for a date range
    /// (`GET /messages/v4/statistics`).
    pub async fn get_statistics(
        &self,
        query: StatisticsQuery,
    ) -> Result<Statistics, SolapiError> {
        let pairs = transport::query::encode_statistics_query(&query);
        let url = self.endpoint_with_query("/messages/v4/statistics", pairs)?;
        let raw = self.request(HttpMethod::Get, url, None).await?;
        transport::decode_statistics(&raw).map_err(parse_error)
    }

    /// Account balance (`GET /cash/v1/balance`).
    pub async fn get_balance(&self) -> Result<Balance, SolapiError> {
        let url = self.endpoint("/cash/v1/balance");
        let raw = self.request(HttpMethod::Get, url, None).await?;
        transport::decode_balance(&raw).map_err(parse_error)
    }

    /// Upload a file for later attachment (`POST /storage/v1/files`).
    pub async fn upload_file(
        &self,
        upload: FileUpload,
    ) -> Result<FileUploadResponse, SolapiError> {
        let url = self.endpoint("/storage/v1/files");
        let body = transport::encode_upload_body(&upload);
        let raw = self.request(HttpMethod::Post, url, Some(body)).await?;
        transport::decode_upload_response(&raw).map_err(parse_error)
    }

    /// Schedule a single message: create a group, add the message, reserve.
    ///
    /// Three strictly sequential round trips. There is no rollback: if a
    /// later step fails, the group stays created (and possibly populated)
    /// but unscheduled.
    pub async fn send_one_future(
        &self,
        message: Message,
        scheduled_date: ScheduledDate,
    ) -> Result<GroupInfo, SolapiError> {
        self.send_many_future(vec![message], scheduled_date).await
    }

    /// Schedule a batch: create a group, add the messages, reserve.
    ///
    /// Same sequencing and failure mode as [`SolapiClient::send_one_future`].
    pub async fn send_many_future(
        &self,
        messages: Vec<Message>,
        scheduled_date: ScheduledDate,
    ) -> Result<GroupInfo, SolapiError> {
        let group = self.create_group(SendOptions::default()).await?;
        let group_id = group.group_id.clone();
        self.add_messages_to_group(&group_id, messages).await?;
        self.reserve_group(&group_id, scheduled_date).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn group_endpoint(&self, group_id: &GroupId, suffix: &str) -> String {
        format!(
            "{}/messages/v4/groups/{}{suffix}",
            self.base_url,
            group_id.as_str()
        )
    }

    fn endpoint_with_query(
        &self,
        path: &str,
        pairs: Vec<(String, String)>,
    ) -> Result<String, SolapiError> {
        let mut url = Url::parse(&self.endpoint(path))
            .map_err(|err| SolapiError::Transport(Box::new(err)))?;
        transport::query::append_query(&mut url, &pairs);
        Ok(url.into())
    }

    /// Sign and issue one HTTP call, returning the raw 2xx body.
    ///
    /// The authorization header is recomputed here for every request; signed
    /// timestamps are only valid within a small server-side skew window.
    async fn request(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<serde_json::Value>,
    ) -> Result<String, SolapiError> {
        let headers = vec![(
            "Authorization".to_owned(),
            transport::auth::authorization_header(&self.credentials, Utc::now()),
        )];
        let body = body.map(|value| value.to_string());

        let response = self
            .http
            .send(method, &url, &headers, body)
            .await
            .map_err(SolapiError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let payload: Option<ErrorPayload> = serde_json::from_str(&response.body).ok();
            let (error_code, error_message) = payload
                .map(|payload| (payload.error_code, payload.error_message))
                .unwrap_or((None, None));
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SolapiError::HttpStatus {
                status: response.status,
                error_code,
                error_message,
                body,
            });
        }

        Ok(response.body)
    }
}

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::domain::{
    AddMessageResult, AddMessagesResponse, Agent, GroupId, GroupInfo, GroupList, Message,
    MessageCount, MessageId, ScheduledDate, SendOptions,
};
use crate::transport::messages::message_value;
use crate::transport::{TransportError, opt_date};

pub fn encode_create_group_body(options: &SendOptions, agent: &Agent) -> Value {
    let mut body = Map::new();
    body.insert("sdkVersion".to_owned(), json!(agent.sdk_version));
    body.insert("osPlatform".to_owned(), json!(agent.os_platform));
    if options.allow_duplicates {
        body.insert("allowDuplicates".to_owned(), json!(true));
    }
    if let Some(app_id) = options.app_id.as_ref() {
        body.insert("appId".to_owned(), json!(app_id.as_str()));
    }
    Value::Object(body)
}

pub fn encode_add_messages_body(messages: &[Message]) -> Value {
    json!({
        "messages": messages.iter().map(message_value).collect::<Vec<Value>>(),
    })
}

pub fn encode_reserve_body(scheduled_date: &ScheduledDate) -> Value {
    json!({ "scheduledDate": scheduled_date.to_iso8601() })
}

pub fn encode_remove_messages_body(message_ids: &[MessageId]) -> Value {
    json!({
        "messageIds": message_ids.iter().map(MessageId::as_str).collect::<Vec<&str>>(),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CountWire {
    total: u64,
    sent_total: u64,
    sent_failed: u64,
    sent_success: u64,
    sent_pending: u64,
    sent_replacement: u64,
    refund: u64,
    registered_failed: u64,
    registered_success: u64,
}

impl From<CountWire> for MessageCount {
    fn from(wire: CountWire) -> Self {
        Self {
            total: wire.total,
            sent_total: wire.sent_total,
            sent_failed: wire.sent_failed,
            sent_success: wire.sent_success,
            sent_pending: wire.sent_pending,
            sent_replacement: wire.sent_replacement,
            refund: wire.refund,
            registered_failed: wire.registered_failed,
            registered_success: wire.registered_success,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupInfoWire {
    group_id: String,
    #[serde(default)]
    count: CountWire,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    scheduled_date: Option<String>,
    #[serde(default)]
    date_created: Option<String>,
    #[serde(default)]
    date_updated: Option<String>,
}

impl GroupInfoWire {
    pub(crate) fn into_domain(self) -> Result<GroupInfo, TransportError> {
        let group_id = GroupId::new(self.group_id).map_err(|_| TransportError::MissingField {
            field: GroupId::FIELD,
        })?;
        Ok(GroupInfo {
            group_id,
            count: self.count.into(),
            status: self.status,
            scheduled_date: opt_date(self.scheduled_date)?,
            date_created: opt_date(self.date_created)?,
            date_updated: opt_date(self.date_updated)?,
        })
    }
}

pub fn decode_group_info(json: &str) -> Result<GroupInfo, TransportError> {
    let wire: GroupInfoWire = serde_json::from_str(json)?;
    wire.into_domain()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupListWire {
    #[serde(default)]
    start_key: Option<String>,
    #[serde(default)]
    next_key: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    group_list: BTreeMap<String, GroupInfoWire>,
}

pub fn decode_group_list(json: &str) -> Result<GroupList, TransportError> {
    let wire: GroupListWire = serde_json::from_str(json)?;

    let groups = wire
        .group_list
        .into_values()
        .map(|group| {
            let info = group.into_domain()?;
            Ok((info.group_id.clone(), info))
        })
        .collect::<Result<BTreeMap<GroupId, GroupInfo>, TransportError>>()?;

    Ok(GroupList {
        start_key: wire.start_key,
        next_key: wire.next_key,
        limit: wire.limit,
        groups,
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddMessagesWire {
    #[serde(default)]
    error_count: u64,
    #[serde(default)]
    result_list: Vec<AddResultWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddResultWire {
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    status_code: Option<String>,
    #[serde(default)]
    status_message: Option<String>,
}

pub fn decode_add_messages_response(json: &str) -> Result<AddMessagesResponse, TransportError> {
    let wire: AddMessagesWire = serde_json::from_str(json)?;
    Ok(AddMessagesResponse {
        error_count: wire.error_count,
        results: wire
            .result_list
            .into_iter()
            .map(|result| AddMessageResult {
                to: result.to,
                status_code: result.status_code,
                status_message: result.status_message,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{AppId, Recipient};

    use super::*;

    #[test]
    fn create_group_body_embeds_agent_and_optional_fields() {
        let agent = Agent {
            sdk_version: "rust/0.3.0".to_owned(),
            os_platform: "linux-x86_64".to_owned(),
        };

        let body = encode_create_group_body(&SendOptions::default(), &agent);
        assert_eq!(body["sdkVersion"], "rust/0.3.0");
        assert_eq!(body["osPlatform"], "linux-x86_64");
        assert!(body.get("allowDuplicates").is_none());
        assert!(body.get("appId").is_none());

        let options = SendOptions {
            app_id: Some(AppId::new("app-1").unwrap()),
            allow_duplicates: true,
            scheduled_date: None,
        };
        let body = encode_create_group_body(&options, &agent);
        assert_eq!(body["allowDuplicates"], true);
        assert_eq!(body["appId"], "app-1");
    }

    #[test]
    fn reserve_body_carries_iso8601_date() {
        let date = ScheduledDate::parse("2024-05-01 09:30:00").unwrap();
        let body = encode_reserve_body(&date);
        assert_eq!(body["scheduledDate"], "2024-05-01T09:30:00.000Z");
    }

    #[test]
    fn remove_messages_body_lists_ids() {
        let ids = vec![
            MessageId::new("M1").unwrap(),
            MessageId::new("M2").unwrap(),
        ];
        let body = encode_remove_messages_body(&ids);
        assert_eq!(body, json!({ "messageIds": ["M1", "M2"] }));
    }

    #[test]
    fn add_messages_body_wraps_message_list() {
        let message = Message::new(
            Recipient::new("01012345678").unwrap(),
            Recipient::new("01000000000").unwrap(),
        )
        .text("hi");
        let body = encode_add_messages_body(std::slice::from_ref(&message));
        assert_eq!(body["messages"][0]["to"], "01012345678");
        assert_eq!(body["messages"][0]["text"], "hi");
    }

    #[test]
    fn decode_group_info_normalizes_dates() {
        let json = r#"
        {
          "groupId": "G4V20240501",
          "status": "PENDING",
          "dateCreated": "2024-05-01T09:30:00+09:00",
          "count": { "total": 3, "registeredSuccess": 3 }
        }
        "#;

        let info = decode_group_info(json).unwrap();
        assert_eq!(info.group_id.as_str(), "G4V20240501");
        assert_eq!(info.status.as_deref(), Some("PENDING"));
        assert_eq!(info.count.total, 3);
        assert_eq!(info.count.registered_success, 3);
        assert_eq!(info.count.registered_failed, 0);
        assert_eq!(
            info.date_created.unwrap().to_iso8601(),
            "2024-05-01T00:30:00.000Z"
        );
        assert_eq!(info.scheduled_date, None);
    }

    #[test]
    fn decode_group_info_requires_group_id() {
        let err = decode_group_info(r#"{ "groupId": "  " }"#).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField { field: "groupId" }
        ));
    }

    #[test]
    fn decode_group_list_keys_groups_by_id() {
        let json = r#"
        {
          "startKey": null,
          "nextKey": "G4V2002",
          "limit": 2,
          "groupList": {
            "G4V2001": { "groupId": "G4V2001" },
            "G4V2002": { "groupId": "G4V2002", "status": "SENDING" }
          }
        }
        "#;

        let list = decode_group_list(json).unwrap();
        assert_eq!(list.next_key.as_deref(), Some("G4V2002"));
        assert_eq!(list.limit, Some(2));
        assert_eq!(list.groups.len(), 2);
        let second = list.groups.get(&GroupId::new("G4V2002").unwrap()).unwrap();
        assert_eq!(second.status.as_deref(), Some("SENDING"));
    }

    #[test]
    fn decode_add_messages_response_defaults() {
        let response = decode_add_messages_response("{}").unwrap();
        assert_eq!(response.error_count, 0);
        assert!(response.results.is_empty());

        let json = r#"
        {
          "errorCount": 1,
          "resultList": [
            { "to": "01012345678", "statusCode": "2000", "statusMessage": "ok" }
          ]
        }
        "#;
        let response = decode_add_messages_response(json).unwrap();
        assert_eq!(response.error_count, 1);
        assert_eq!(response.results[0].to.as_deref(), Some("01012345678"));
    }
}

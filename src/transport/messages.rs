use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::domain::{
    Agent, DetailedSendResponse, FailedMessage, GroupId, Message, MessageId, MessageList,
    MessageRecord, SendMany, SingleSendResponse,
};
use crate::transport::groups::GroupInfoWire;
use crate::transport::{TransportError, opt_date};

/// Wire form of one message.
///
/// Absent optional fields are left out of the object entirely; the encoder
/// never emits sentinel empty strings.
pub(crate) fn message_value(message: &Message) -> Value {
    let mut body = Map::new();
    body.insert("to".to_owned(), json!(message.to.raw()));
    body.insert("from".to_owned(), json!(message.from.raw()));
    if let Some(text) = message.text.as_ref() {
        body.insert("text".to_owned(), json!(text));
    }
    if let Some(kind) = message.message_type {
        body.insert("type".to_owned(), json!(kind.as_str()));
    }
    if let Some(subject) = message.subject.as_ref() {
        body.insert("subject".to_owned(), json!(subject));
    }
    if let Some(image_id) = message.image_id.as_ref() {
        body.insert("imageId".to_owned(), json!(image_id.as_str()));
    }
    if let Some(country) = message.country.as_ref() {
        body.insert("country".to_owned(), json!(country));
    }
    if let Some(auto) = message.auto_type_detect {
        body.insert("autoTypeDetect".to_owned(), json!(auto));
    }
    Value::Object(body)
}

fn agent_value(agent: &Agent) -> Value {
    json!({
        "sdkVersion": agent.sdk_version,
        "osPlatform": agent.os_platform,
    })
}

pub fn encode_send_one_body(message: &Message, agent: &Agent) -> Value {
    json!({
        "message": message_value(message),
        "agent": agent_value(agent),
    })
}

pub fn encode_send_many_body(batch: &SendMany, agent: &Agent) -> Value {
    let mut body = Map::new();
    body.insert(
        "messages".to_owned(),
        batch.messages().iter().map(message_value).collect(),
    );
    body.insert("agent".to_owned(), agent_value(agent));

    let options = batch.options();
    if options.allow_duplicates {
        body.insert("allowDuplicates".to_owned(), json!(true));
    }
    if let Some(app_id) = options.app_id.as_ref() {
        body.insert("appId".to_owned(), json!(app_id.as_str()));
    }
    if let Some(date) = options.scheduled_date.as_ref() {
        body.insert("scheduledDate".to_owned(), json!(date.to_iso8601()));
    }
    Value::Object(body)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailedSendWire {
    group_info: GroupInfoWire,
    #[serde(default)]
    failed_message_list: Vec<FailedMessageWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FailedMessageWire {
    #[serde(default)]
    to: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    status_code: Option<String>,
    #[serde(default)]
    status_message: Option<String>,
}

impl From<FailedMessageWire> for FailedMessage {
    fn from(wire: FailedMessageWire) -> Self {
        Self {
            to: wire.to,
            from: wire.from,
            status_code: wire.status_code,
            status_message: wire.status_message,
        }
    }
}

pub fn decode_detailed_send_response(json: &str) -> Result<DetailedSendResponse, TransportError> {
    let wire: DetailedSendWire = serde_json::from_str(json)?;
    Ok(DetailedSendResponse {
        group_info: wire.group_info.into_domain()?,
        failed_messages: wire
            .failed_message_list
            .into_iter()
            .map(FailedMessage::from)
            .collect(),
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SingleSendWire {
    message_id: String,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    to: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default, rename = "type")]
    message_type: Option<String>,
    #[serde(default)]
    status_code: Option<String>,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
}

pub fn decode_single_send_response(json: &str) -> Result<SingleSendResponse, TransportError> {
    let wire: SingleSendWire = serde_json::from_str(json)?;
    let message_id = MessageId::new(wire.message_id).map_err(|_| TransportError::MissingField {
        field: MessageId::FIELD,
    })?;
    let group_id = match wire.group_id {
        None => None,
        Some(id) => Some(GroupId::new(id).map_err(|_| TransportError::MissingField {
            field: GroupId::FIELD,
        })?),
    };
    Ok(SingleSendResponse {
        message_id,
        group_id,
        to: wire.to,
        from: wire.from,
        message_type: wire.message_type,
        status_code: wire.status_code,
        status_message: wire.status_message,
        country: wire.country,
        account_id: wire.account_id,
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageListWire {
    #[serde(default)]
    start_key: Option<String>,
    #[serde(default)]
    next_key: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    message_list: BTreeMap<String, MessageRecordWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRecordWire {
    #[serde(default)]
    to: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "type")]
    message_type: Option<String>,
    #[serde(default)]
    status_code: Option<String>,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    date_received: Option<String>,
}

pub fn decode_message_list(json: &str) -> Result<MessageList, TransportError> {
    let wire: MessageListWire = serde_json::from_str(json)?;

    let messages = wire
        .message_list
        .into_iter()
        .map(|(key, record)| {
            let message_id =
                MessageId::new(key).map_err(|_| TransportError::MissingField {
                    field: MessageId::FIELD,
                })?;
            let group_id = match record.group_id {
                None => None,
                Some(id) => {
                    Some(GroupId::new(id).map_err(|_| TransportError::MissingField {
                        field: GroupId::FIELD,
                    })?)
                }
            };
            Ok((
                message_id,
                MessageRecord {
                    to: record.to,
                    from: record.from,
                    text: record.text,
                    message_type: record.message_type,
                    status_code: record.status_code,
                    status_message: record.status_message,
                    group_id,
                    date_received: opt_date(record.date_received)?,
                },
            ))
        })
        .collect::<Result<BTreeMap<MessageId, MessageRecord>, TransportError>>()?;

    Ok(MessageList {
        start_key: wire.start_key,
        next_key: wire.next_key,
        limit: wire.limit,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{ImageId, MessageType, Recipient, ScheduledDate, SendOptions};

    use super::*;

    fn message() -> Message {
        Message::new(
            Recipient::new("01012345678").unwrap(),
            Recipient::new("01000000000").unwrap(),
        )
    }

    #[test]
    fn message_value_omits_absent_fields() {
        let value = message_value(&message());
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["to"], "01012345678");
        assert_eq!(object["from"], "01000000000");
    }

    #[test]
    fn message_value_includes_present_fields() {
        let mut msg = message().text("spring sale").message_type(MessageType::Mms);
        msg.subject = Some("sale".to_owned());
        msg.image_id = Some(ImageId::new("IMG1").unwrap());

        let value = message_value(&msg);
        assert_eq!(value["text"], "spring sale");
        assert_eq!(value["type"], "MMS");
        assert_eq!(value["subject"], "sale");
        assert_eq!(value["imageId"], "IMG1");
    }

    #[test]
    fn send_one_body_wraps_message_and_agent() {
        let agent = Agent {
            sdk_version: "rust/0.3.0".to_owned(),
            os_platform: "linux-x86_64".to_owned(),
        };
        let body = encode_send_one_body(&message().text("hi"), &agent);
        assert_eq!(body["message"]["to"], "01012345678");
        assert_eq!(body["agent"]["sdkVersion"], "rust/0.3.0");
        assert_eq!(body["agent"]["osPlatform"], "linux-x86_64");
    }

    #[test]
    fn send_many_body_includes_options_only_when_set() {
        let agent = Agent::current();

        let batch = SendMany::new(vec![message()]).unwrap();
        let body = encode_send_many_body(&batch, &agent);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert!(body.get("allowDuplicates").is_none());
        assert!(body.get("appId").is_none());
        assert!(body.get("scheduledDate").is_none());

        let options = SendOptions {
            allow_duplicates: true,
            scheduled_date: Some(ScheduledDate::parse("2024-05-01").unwrap()),
            ..Default::default()
        };
        let batch = SendMany::with_options(vec![message()], options).unwrap();
        let body = encode_send_many_body(&batch, &agent);
        assert_eq!(body["allowDuplicates"], true);
        assert_eq!(body["scheduledDate"], "2024-05-01T00:00:00.000Z");
    }

    #[test]
    fn decode_detailed_send_response_collects_failures() {
        let json = r#"
        {
          "groupInfo": {
            "groupId": "G4V2001",
            "count": { "total": 3, "registeredFailed": 1, "registeredSuccess": 2 }
          },
          "failedMessageList": [
            { "to": "01012345678", "statusCode": "1061", "statusMessage": "no route" }
          ]
        }
        "#;

        let response = decode_detailed_send_response(json).unwrap();
        assert_eq!(response.group_info.group_id.as_str(), "G4V2001");
        assert_eq!(response.group_info.count.registered_failed, 1);
        assert_eq!(response.failed_messages.len(), 1);
        assert_eq!(response.failed_messages[0].to, "01012345678");
        assert_eq!(
            response.failed_messages[0].status_message.as_deref(),
            Some("no route")
        );
    }

    #[test]
    fn decode_single_send_response_requires_message_id() {
        let json = r#"
        {
          "messageId": "M4V2001",
          "groupId": "G4V2001",
          "to": "01012345678",
          "type": "SMS",
          "statusCode": "2000",
          "statusMessage": "accepted"
        }
        "#;

        let response = decode_single_send_response(json).unwrap();
        assert_eq!(response.message_id.as_str(), "M4V2001");
        assert_eq!(response.group_id.unwrap().as_str(), "G4V2001");
        assert_eq!(response.status_code.as_deref(), Some("2000"));

        let err = decode_single_send_response(r#"{ "messageId": " " }"#).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField { field: "messageId" }
        ));
    }

    #[test]
    fn decode_message_list_keys_by_message_id() {
        let json = r#"
        {
          "limit": 20,
          "messageList": {
            "M1": {
              "to": "01012345678",
              "from": "01000000000",
              "text": "hello",
              "type": "SMS",
              "groupId": "G1",
              "dateReceived": "2024-05-01T00:00:00.000Z"
            }
          }
        }
        "#;

        let list = decode_message_list(json).unwrap();
        assert_eq!(list.limit, Some(20));
        let record = list.messages.get(&MessageId::new("M1").unwrap()).unwrap();
        assert_eq!(record.text.as_deref(), Some("hello"));
        assert_eq!(record.group_id.as_ref().unwrap().as_str(), "G1");
        assert_eq!(
            record.date_received.unwrap().to_iso8601(),
            "2024-05-01T00:00:00.000Z"
        );
    }
}

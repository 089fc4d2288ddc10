use url::Url;

use crate::domain::{GetGroupsQuery, GetMessagesQuery, StatisticsQuery};

/// Append ordered pairs to a URL's query string.
///
/// Percent-encoding comes from the `url` crate. Pair order follows the
/// input slice; absent fields never reach this function.
pub fn append_query(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        return;
    }
    let mut serializer = url.query_pairs_mut();
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
}

pub fn encode_get_groups_query(query: &GetGroupsQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::<(String, String)>::new();
    push_opt(
        &mut pairs,
        "groupId",
        query.group_id.as_ref().map(|id| id.as_str().to_owned()),
    );
    push_opt(&mut pairs, "criteria", query.criteria.clone());
    push_opt(&mut pairs, "cond", query.cond.clone());
    push_opt(&mut pairs, "value", query.value.clone());
    push_opt(&mut pairs, "startKey", query.start_key.clone());
    push_opt(&mut pairs, "limit", query.limit.map(|limit| limit.to_string()));
    pairs
}

pub fn encode_get_messages_query(query: &GetMessagesQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::<(String, String)>::new();
    push_opt(
        &mut pairs,
        "messageId",
        query.message_id.as_ref().map(|id| id.as_str().to_owned()),
    );
    push_opt(
        &mut pairs,
        "groupId",
        query.group_id.as_ref().map(|id| id.as_str().to_owned()),
    );
    push_opt(
        &mut pairs,
        "to",
        query.to.as_ref().map(|to| to.raw().to_owned()),
    );
    push_opt(
        &mut pairs,
        "from",
        query.from.as_ref().map(|from| from.raw().to_owned()),
    );
    push_opt(
        &mut pairs,
        "type",
        query.message_type.map(|kind| kind.as_str().to_owned()),
    );
    push_opt(&mut pairs, "statusCode", query.status_code.clone());
    push_opt(
        &mut pairs,
        "startDate",
        query.start_date.as_ref().map(|date| date.to_iso8601()),
    );
    push_opt(
        &mut pairs,
        "endDate",
        query.end_date.as_ref().map(|date| date.to_iso8601()),
    );
    push_opt(&mut pairs, "startKey", query.start_key.clone());
    push_opt(&mut pairs, "limit", query.limit.map(|limit| limit.to_string()));
    pairs
}

pub fn encode_statistics_query(query: &StatisticsQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::<(String, String)>::new();
    push_opt(
        &mut pairs,
        "startDate",
        query.start_date.as_ref().map(|date| date.to_iso8601()),
    );
    push_opt(
        &mut pairs,
        "endDate",
        query.end_date.as_ref().map(|date| date.to_iso8601()),
    );
    pairs
}

fn push_opt(pairs: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        pairs.push((key.to_owned(), value));
    }
}

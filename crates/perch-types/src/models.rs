use serde::{Deserialize, Serialize};

/// A stored account, id included. Serialized with the original wire
/// field names (`accountId` etc.), password and all — credentials are
/// plain text in this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

/// A stored message. `time_posted_epoch` is an opaque client-supplied
/// value, carried through unvalidated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_posted_epoch: Option<i64>,
}

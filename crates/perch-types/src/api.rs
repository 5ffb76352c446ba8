use serde::Deserialize;

// Request bodies. Extra fields are ignored on purpose: clients of the
// original API send whole entity representations where only a subset is
// read (the PATCH body in particular).

// -- Accounts --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: Option<i64>,
}

/// PATCH body for a message; only the text is read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    pub message_text: String,
}

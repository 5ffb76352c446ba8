use std::sync::Arc;

use perch_db::Database;
use perch_db::models::MessageRow;
use perch_types::models::Message;

use crate::error::ServiceError;

const MAX_TEXT_CHARS: usize = 255;

/// Message CRUD. Needs the accounts table only to resolve `posted_by`
/// at creation time.
#[derive(Clone)]
pub struct MessageService {
    db: Arc<Database>,
}

impl MessageService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Persist a new message and return it with its assigned id.
    /// `time_posted_epoch` is carried through unvalidated.
    pub fn create(
        &self,
        posted_by: i64,
        text: &str,
        time_posted_epoch: Option<i64>,
    ) -> Result<Message, ServiceError> {
        validate_text(text)?;
        if !self.db.account_exists(posted_by)? {
            return Err(ServiceError::Validation(format!(
                "postedBy {posted_by} does not reference an existing account"
            )));
        }

        let row = self.db.insert_message(posted_by, text, time_posted_epoch)?;
        Ok(message_from_row(row))
    }

    /// Every message, in insertion order.
    pub fn list_all(&self) -> Result<Vec<Message>, ServiceError> {
        let rows = self.db.list_messages()?;
        Ok(rows.into_iter().map(message_from_row).collect())
    }

    /// Absence is an ordinary `None`, not an error.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Message>, ServiceError> {
        Ok(self.db.get_message(id)?.map(message_from_row))
    }

    /// Rows affected: 0 or 1. Deleting a missing message is not an
    /// error — deletion is idempotent.
    pub fn delete_by_id(&self, id: i64) -> Result<usize, ServiceError> {
        Ok(self.db.delete_message(id)?)
    }

    /// Replace the text of an existing message, leaving every other
    /// column as it was. Returns the rows affected (always 1 on
    /// success); a missing target is a validation failure.
    pub fn update_text(&self, id: i64, new_text: &str) -> Result<usize, ServiceError> {
        validate_text(new_text)?;

        let rows = self.db.update_message_text(id, new_text)?;
        if rows == 0 {
            return Err(ServiceError::Validation(format!(
                "message {id} does not exist"
            )));
        }
        Ok(rows)
    }

    /// Messages posted by the given account, in insertion order. An
    /// unknown account yields an empty list — no existence check.
    pub fn list_by_account(&self, account_id: i64) -> Result<Vec<Message>, ServiceError> {
        let rows = self.db.list_messages_by_account(account_id)?;
        Ok(rows.into_iter().map(message_from_row).collect())
    }
}

fn validate_text(text: &str) -> Result<(), ServiceError> {
    if text.trim().is_empty() {
        return Err(ServiceError::Validation("message text is blank".into()));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ServiceError::Validation(format!(
            "message text exceeds {MAX_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

fn message_from_row(row: MessageRow) -> Message {
    Message {
        message_id: row.id,
        posted_by: row.posted_by,
        message_text: row.message_text,
        time_posted_epoch: row.time_posted_epoch,
    }
}

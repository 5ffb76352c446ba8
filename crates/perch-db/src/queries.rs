use crate::Database;
use crate::models::{AccountRow, MessageRow};
use anyhow::Result;
use rusqlite::OptionalExtension;

impl Database {
    // -- Accounts --

    /// Insert a new account and return it with its assigned id.
    /// Returns `None` when the username is already taken — the UNIQUE
    /// constraint on `username` is the duplicate check.
    pub fn insert_account(&self, username: &str, password: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO accounts (username, password) VALUES (?1, ?2)",
                (username, password),
            );
            match inserted {
                Ok(_) => Ok(Some(AccountRow {
                    id: conn.last_insert_rowid(),
                    username: username.to_string(),
                    password: password.to_string(),
                })),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn account_exists(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?1)",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    /// Exact (username, password) match, or `None`.
    pub fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, username, password FROM accounts
                     WHERE username = ?1 AND password = ?2",
                    (username, password),
                    account_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: Option<i64>,
    ) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (posted_by, message_text, time_posted_epoch)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![posted_by, message_text, time_posted_epoch],
            )?;
            Ok(MessageRow {
                id: conn.last_insert_rowid(),
                posted_by,
                message_text: message_text.to_string(),
                time_posted_epoch,
            })
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, posted_by, message_text, time_posted_epoch
                     FROM messages WHERE id = ?1",
                    [id],
                    message_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// All messages in primary-key order.
    pub fn list_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, posted_by, message_text, time_posted_epoch
                 FROM messages ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_messages_by_account(&self, account_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, posted_by, message_text, time_posted_epoch
                 FROM messages WHERE posted_by = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map([account_id], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Rows affected: 0 or 1.
    pub fn delete_message(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let rows = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(rows)
        })
    }

    /// Replace only the text column. Rows affected: 0 or 1.
    pub fn update_message_text(&self, id: i64, message_text: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let rows = conn.execute(
                "UPDATE messages SET message_text = ?1 WHERE id = ?2",
                (message_text, id),
            )?;
            Ok(rows)
        })
    }
}

fn account_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn insert_account_assigns_sequential_ids() {
        let db = db();
        let a = db.insert_account("bob", "pass1").unwrap().unwrap();
        let b = db.insert_account("alice", "pass2").unwrap().unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn duplicate_username_yields_none_and_no_row() {
        let db = db();
        db.insert_account("bob", "pass1").unwrap().unwrap();
        assert!(db.insert_account("bob", "other").unwrap().is_none());

        // The original row is intact and no second row was written.
        let found = db.find_account_by_credentials("bob", "pass1").unwrap();
        assert_eq!(found.unwrap().id, 1);
        assert!(
            db.find_account_by_credentials("bob", "other")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn credential_lookup_requires_both_fields() {
        let db = db();
        db.insert_account("bob", "pass1").unwrap().unwrap();
        assert!(
            db.find_account_by_credentials("bob", "pass1")
                .unwrap()
                .is_some()
        );
        assert!(
            db.find_account_by_credentials("bob", "wrong")
                .unwrap()
                .is_none()
        );
        assert!(
            db.find_account_by_credentials("alice", "pass1")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn message_round_trip_and_rows_affected() {
        let db = db();
        let account = db.insert_account("bob", "pass1").unwrap().unwrap();
        let msg = db.insert_message(account.id, "hello", Some(1700000000)).unwrap();
        assert_eq!(msg.id, 1);

        let fetched = db.get_message(msg.id).unwrap().unwrap();
        assert_eq!(fetched.message_text, "hello");
        assert_eq!(fetched.posted_by, account.id);
        assert_eq!(fetched.time_posted_epoch, Some(1700000000));

        assert_eq!(db.update_message_text(msg.id, "edited").unwrap(), 1);
        assert_eq!(db.update_message_text(999, "edited").unwrap(), 0);

        assert_eq!(db.delete_message(msg.id).unwrap(), 1);
        assert_eq!(db.delete_message(msg.id).unwrap(), 0);
        assert!(db.get_message(msg.id).unwrap().is_none());
    }

    #[test]
    fn listings_are_in_insertion_order() {
        let db = db();
        let bob = db.insert_account("bob", "pass1").unwrap().unwrap();
        let alice = db.insert_account("alice", "pass2").unwrap().unwrap();
        db.insert_message(bob.id, "first", None).unwrap();
        db.insert_message(alice.id, "second", None).unwrap();
        db.insert_message(bob.id, "third", None).unwrap();

        let all: Vec<String> = db
            .list_messages()
            .unwrap()
            .into_iter()
            .map(|m| m.message_text)
            .collect();
        assert_eq!(all, ["first", "second", "third"]);

        let bobs: Vec<String> = db
            .list_messages_by_account(bob.id)
            .unwrap()
            .into_iter()
            .map(|m| m.message_text)
            .collect();
        assert_eq!(bobs, ["first", "third"]);

        assert!(db.list_messages_by_account(999).unwrap().is_empty());
    }
}

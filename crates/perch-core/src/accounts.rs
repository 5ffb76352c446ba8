use std::sync::Arc;

use perch_db::Database;
use perch_types::models::Account;

use crate::error::ServiceError;

const MIN_PASSWORD_CHARS: usize = 4;

/// Registration and login. Holds only the shared database handle; every
/// operation is a single validation-then-persist step.
#[derive(Clone)]
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new account and return it with its assigned id.
    ///
    /// Field checks run before the store is touched, so a rejected
    /// request has no side effect. The username UNIQUE constraint
    /// reports the duplicate, which keeps two concurrent registrations
    /// from both succeeding.
    pub fn register(&self, username: &str, password: &str) -> Result<Account, ServiceError> {
        if username.trim().is_empty() || password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServiceError::Validation(
                "registration criteria not met".into(),
            ));
        }

        let row = self
            .db
            .insert_account(username, password)?
            .ok_or(ServiceError::Duplicate)?;

        Ok(account_from_row(row))
    }

    /// Verify credentials against a stored account. A miss is a uniform
    /// failure whether the username exists or not.
    pub fn login(&self, username: &str, password: &str) -> Result<Account, ServiceError> {
        let row = self
            .db
            .find_account_by_credentials(username, password)?
            .ok_or(ServiceError::Unauthorized)?;

        Ok(account_from_row(row))
    }
}

fn account_from_row(row: perch_db::models::AccountRow) -> Account {
    Account {
        account_id: row.id,
        username: row.username,
        password: row.password,
    }
}

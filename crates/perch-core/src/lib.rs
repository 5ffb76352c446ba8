pub mod accounts;
pub mod error;
pub mod messages;

pub use accounts::AccountService;
pub use error::ServiceError;
pub use messages::MessageService;

pub mod client;
pub mod error;
pub mod model;

pub use client::EmailsApi;
pub use error::EmailsError;
pub use model::{Email, EmailUpdate, Field, NewEmail, Reason, Violation};

use serde::Serialize;
use uuid::Uuid;

/// Stored email record.
///
/// `email` is the primary key and never changes after creation. `id` is
/// generated once by the service and is not part of the GraphQL surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Data for creating a new record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmail {
    pub email: String,
    pub name: String,
}

/// Data for renaming an existing record; `email` selects the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailUpdate {
    pub email: String,
    pub name: String,
}

/// Record field a validation violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Name,
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reason {
    Empty,
    Malformed,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: Field,
    pub reason: Reason,
}

impl Violation {
    pub fn new(field: Field, reason: Reason) -> Self {
        Self { field, reason }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Email => f.write_str("email"),
            Field::Name => f.write_str("name"),
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Empty => f.write_str("empty"),
            Reason::Malformed => f.write_str("malformed"),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is {}", self.field, self.reason)
    }
}

use async_graphql::{InputObject, SimpleObject};

use crate::contract::model::{Email, EmailUpdate, NewEmail};

/// GraphQL representation of a stored record. The generated id stays internal.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Email")]
pub struct EmailDto {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateEmailInput {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct UpdateEmailInput {
    pub email: String,
    pub name: String,
}

// Conversion implementations between GraphQL types and contract models

impl From<Email> for EmailDto {
    fn from(e: Email) -> Self {
        Self {
            email: e.email,
            name: e.name,
        }
    }
}

impl From<CreateEmailInput> for NewEmail {
    fn from(input: CreateEmailInput) -> Self {
        Self {
            email: input.email,
            name: input.name,
        }
    }
}

impl From<UpdateEmailInput> for EmailUpdate {
    fn from(input: UpdateEmailInput) -> Self {
        Self {
            email: input.email,
            name: input.name,
        }
    }
}

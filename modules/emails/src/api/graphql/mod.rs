pub mod dto;
pub mod error;
pub mod resolver;
pub mod routes;

pub use resolver::{build_schema, EmailsSchema, MutationRoot, QueryRoot};

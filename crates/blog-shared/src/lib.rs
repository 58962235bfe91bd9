//! # Blog Shared
//!
//! Request and response bodies exchanged with API clients.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldProblem};

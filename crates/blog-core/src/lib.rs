//! # Blog Core
//!
//! The domain layer of Quillpost: posts, comments, their lifecycle rules
//! and the access layer that enforces who may see and change what.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::BlogService;

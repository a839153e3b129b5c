//! Core types and traits for the linkstash URL shortener.
//!
//! This crate provides the short code type and the alias store contract
//! shared by the storage backends and the HTTP gateway.

pub mod error;
pub mod shortcode;
pub mod store;

pub use error::{CoreError, StorageError};
pub use shortcode::{ShortCode, ALPHABET, CODE_LENGTH};
pub use store::{AliasStore, SaveOutcome};

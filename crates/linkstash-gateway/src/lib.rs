//! HTTP front end for linkstash.
//!
//! Translates `POST /shorten` and `GET /redirect/{code}` into calls on an
//! [`AliasStore`](linkstash_core::AliasStore). The gateway itself is
//! stateless; everything mutable lives in the store.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;

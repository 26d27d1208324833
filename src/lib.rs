//! folio library entrypoint.
//!
//! Modules:
//! - `app`: configuration, backend selection, shared state, startup
//! - `store`: the guestbook append-log and its backends
//! - `http`: Axum router and handlers
//! - `chat`: proxy to the conversational model
//! - `profile`: static profile passthrough
//! - `db`: SQLite schema and path helpers
//! - `models`: typed records used across layers
//! - `error`: the shared error type
//! - `util`: tracing setup

pub mod app;
pub mod chat;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod profile;
pub mod store;
pub mod util;

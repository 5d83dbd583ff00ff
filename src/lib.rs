//! Confsync: configuration synchronization and validation
//!
//! A library for fetching a server's TOML configuration through its admin
//! API, tracking the stored and effective documents, importing
//! replacements, and turning failures into classified, user-facing
//! messages.

pub mod classify;
pub mod config;
pub mod controller;
pub mod store;
pub mod time;
pub mod transport;
pub mod validate;

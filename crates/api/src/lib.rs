//! Typed access to the Glean REST API: configuration, the search/chat
//! operations behind the [`GleanApi`] trait, wire-contract request types, and
//! the error taxonomy for upstream failures.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{GleanApi, GleanClient};
pub use config::GleanConfig;
pub use error::GleanError;

//! # PO Token Server Library
//!
//! Provides functionality for generating the proof-of-origin token a video
//! platform requires for server-originated requests, caching it until expiry,
//! and exposing it to a downloading backend over HTTP.
//!
//! Modules:
//! - `config` — service configuration types
//! - `cache` — credential record and store
//! - `generator` — single-flight credential generation
//! - `server` — axum HTTP front end

pub mod config;
pub mod cache;
pub mod generator;
pub mod tests;
pub mod observability;
pub mod server;
pub mod helpers;
pub mod utils;


pub use crate::cache::credential::Credential;
pub use crate::config::settings::Settings;

//! Deploy insights fixture library.
//!
//! Builds the deterministic deployment and test history the dashboard reads,
//! and exposes query, analytics and schema helpers over it.

pub mod analytics;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod output;
pub mod queries;
pub mod schema;
pub mod seed;

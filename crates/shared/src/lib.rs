//! Shared types, errors, and configuration for Finnza.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Pagination types for list views and backend pages
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

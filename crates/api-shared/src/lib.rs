//! # API Shared
//!
//! Shared utilities and definitions for the Trends API.
//!
//! Contains:
//! - `HealthService` and its response type
//! - The error body returned by the REST API
//! - HTTP Basic authentication

pub mod auth;
pub mod error;
pub mod health;

pub use auth::{validate_basic_auth, AuthError, Credentials};
pub use error::ErrorRes;
pub use health::{HealthRes, HealthService};

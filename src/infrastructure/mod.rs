//! Infrastructure layer with external service implementations.
//!
//! # Modules
//!
//! - [`http`] - JSON-over-HTTP client for the exam API

pub mod http;

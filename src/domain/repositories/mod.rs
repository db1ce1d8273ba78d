//! Trait definitions for the collaborators the domain consumes.
//!
//! The exam API is abstracted behind [`ExamApi`] so the search controller,
//! view counter and registration workflow can be exercised without a network.
//!
//! # Architecture
//!
//! - Traits define the contract for remote operations
//! - Implementations live in `crate::infrastructure::http`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See `tests/http_exam_api.rs` for the HTTP implementation against a local server.

pub mod exam_api;

pub use exam_api::ExamApi;

#[cfg(test)]
pub use exam_api::MockExamApi;

//! # Exam Catalog
//!
//! Browse, search and register exams of an academic exam repository.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the exam API trait and the aggregation engine
//! - **Application Layer** ([`application`]) - Search controller, view counter, registration
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP client for the exam API
//! - **Presentation** ([`render`]) - Terminal rendering used by the `exam-catalog` binary
//!
//! ## Features
//!
//! - Instructor → category → exam hierarchy derived from association records
//! - Debounced incremental search that never lets an older response win
//! - Fire-and-forget view counting
//! - Exam registration with client-side required-field validation
//!
//! ## Quick Start
//!
//! ```bash
//! export EXAM_API_URL="http://localhost:5000"
//! export EXAM_API_TOKEN="..."
//!
//! cargo run -- browse
//! cargo run -- search
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod render;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CatalogService, ExamDraft, ExamService, SearchConfig, SearchController, SearchState,
        Submission, ViewCounter, ViewDispatch,
    };
    pub use crate::application::{Alert, AlertKind, AlertSender, alert_channel};
    pub use crate::domain::aggregation::{
        CategoryGroup, ExamEntry, InstructorGroup, build_hierarchy, categories_with_exams,
        distinct_teacher_names, exams_for,
    };
    pub use crate::domain::auth::{AuthContext, AuthToken};
    pub use crate::domain::entities::{
        AssociationRecord, Category, Discipline, Exam, NewExam, Teacher,
    };
    pub use crate::domain::record_store::{RecordStore, Snapshot};
    pub use crate::domain::repositories::ExamApi;
    pub use crate::error::AppError;
    pub use crate::infrastructure::http::HttpExamApi;
}

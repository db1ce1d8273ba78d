//! Application layer: services and controllers orchestrating the domain.
//!
//! Services consume the [`crate::domain::repositories::ExamApi`] trait and are
//! the boundary where errors become user-visible [`Alert`]s.
//!
//! # Available Services
//!
//! - [`services::search_controller::SearchController`] - Debounced incremental search
//! - [`services::view_counter::ViewCounter`] - Fire-and-forget view counting
//! - [`services::catalog_service::CatalogService`] - Category, discipline and teacher lookups
//! - [`services::exam_service::ExamService`] - Exam registration

pub mod alert;
pub mod services;

pub use alert::{Alert, AlertKind, AlertSender, alert_channel};

//! Business logic services for the application layer.

pub mod catalog_service;
pub mod exam_service;
pub mod search_controller;
pub mod view_counter;

pub use catalog_service::{CatalogService, FormOptions};
pub use exam_service::{ExamDraft, ExamService, Submission};
pub use search_controller::{SearchConfig, SearchController, SearchState};
pub use view_counter::{ViewCounter, ViewDispatch};

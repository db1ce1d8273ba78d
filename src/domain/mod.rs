//! Domain layer containing entities and the aggregation logic.
//!
//! # Architecture
//!
//! - [`entities`] - Data model as delivered by the exam API
//! - [`repositories`] - Trait for the remote exam API
//! - [`auth`] - Explicit credential context
//! - [`aggregation`] - Pure instructor → category → exam derivation
//! - [`record_store`] - Atomically replaced current result set
//! - [`view_event`] - View counting event model
//! - [`view_worker`] - Asynchronous view delivery worker
//!
//! # View Counting Flow
//!
//! 1. User opens an exam
//! 2. [`view_event::ViewEvent`] is sent to an async channel
//! 3. [`view_worker::run_view_worker`] calls the API
//! 4. Failures become alerts; nothing is retried

pub mod aggregation;
pub mod auth;
pub mod entities;
pub mod record_store;
pub mod repositories;
pub mod view_event;
pub mod view_worker;

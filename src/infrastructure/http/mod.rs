//! HTTP implementation of the exam API.

mod envelopes;
mod exam_api_client;

pub use exam_api_client::HttpExamApi;

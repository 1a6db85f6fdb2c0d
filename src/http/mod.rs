//! HTTP protocol layer module
//!
//! Converts transport-agnostic dispatcher replies into hyper responses.

pub mod response;

// Re-export commonly used builders
pub use response::{build_413_response, build_json_response};

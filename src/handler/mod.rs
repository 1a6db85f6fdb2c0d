//! Request handler module
//!
//! Responsible for request dispatch and the currency business logic:
//! - `dispatch`: transport-agnostic route table and responder contract
//! - `currency`: route handlers and payload validation
//! - `router`: hyper entry point

mod currency;
pub mod dispatch;
mod error;
pub mod router;
mod types;

// Re-export main entry points
pub use dispatch::Dispatcher;
pub use router::handle_request;

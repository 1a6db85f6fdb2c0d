//! Routing module
//!
//! Provides the path pattern primitives used by the dispatcher's route table:
//! - Literal segments
//! - Word captures (currency ids)
//! - Decimal amount captures

mod matcher;

pub use matcher::{Params, PathPattern, Segment};

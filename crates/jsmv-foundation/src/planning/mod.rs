//! Plan and result types for move operations.

pub mod edit;
pub mod result;

pub use edit::*;
pub use result::*;

//! Foundation Layer - Core types, path utilities and error handling
//!
//! This crate provides the building blocks shared by every jsmv crate:
//! - The [`JsmvError`] type and [`JsmvResult`] alias
//! - Lexical path classification helpers ([`paths`])
//! - The data model of a move ([`model`])
//! - Plan and report types produced by the move service ([`planning`])

pub mod error;
pub mod model;
pub mod paths;
pub mod planning;

// Re-export commonly used types for convenience
pub use error::*;
pub use model::*;
pub use planning::{FileRewrite, MovePlan, MoveReport};

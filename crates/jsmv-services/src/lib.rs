//! Services that carry out a move: file access and move orchestration

pub mod services;

pub use services::{ExcludeMatcher, FileService, MoveService};

pub mod file_service;
pub mod move_service;

pub use file_service::{ExcludeMatcher, FileService};
pub use move_service::MoveService;

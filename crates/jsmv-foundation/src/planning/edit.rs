//! Contains the move plan types.

use crate::model::{MoveOperation, RewriteRecord};
use serde::Serialize;
use std::path::PathBuf;

/// New content for one source file, computed before anything is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRewrite {
    /// Location of the file before the move; the rewrite is written here
    pub path: PathBuf,
    /// Location of the file once the move has been performed
    pub final_path: PathBuf,
    #[serde(skip)]
    pub content: String,
    pub records: Vec<RewriteRecord>,
}

/// Everything a move will change, in the order it will be applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlan {
    pub operation: MoveOperation,
    pub rewrites: Vec<FileRewrite>,
}

impl MovePlan {
    pub fn new(operation: MoveOperation) -> Self {
        Self {
            operation,
            rewrites: Vec::new(),
        }
    }

    /// Queue a file rewrite; rewrites without records are dropped
    pub fn push(&mut self, rewrite: FileRewrite) {
        if !rewrite.records.is_empty() {
            self.rewrites.push(rewrite);
        }
    }

    /// All rewrite records across files, in plan order
    pub fn records(&self) -> impl Iterator<Item = &RewriteRecord> {
        self.rewrites.iter().flat_map(|r| r.records.iter())
    }

    pub fn files_to_modify(&self) -> usize {
        self.rewrites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewrites.is_empty()
    }
}

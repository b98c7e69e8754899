//! Contains the move result type.

use crate::model::RewriteRecord;
use crate::planning::edit::MovePlan;
use serde::Serialize;
use std::path::PathBuf;

/// Summary of a planned or executed move
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub is_directory: bool,
    /// True when nothing was written or renamed
    pub dry_run: bool,
    pub files_updated: Vec<PathBuf>,
    pub rewrites: Vec<RewriteRecord>,
}

impl MoveReport {
    pub fn from_plan(plan: &MovePlan, dry_run: bool) -> Self {
        Self {
            source: plan.operation.source.clone(),
            destination: plan.operation.destination.clone(),
            is_directory: plan.operation.is_directory,
            dry_run,
            files_updated: plan.rewrites.iter().map(|r| r.final_path.clone()).collect(),
            rewrites: plan.records().cloned().collect(),
        }
    }
}

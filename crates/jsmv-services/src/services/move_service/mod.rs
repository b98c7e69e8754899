//! Move Service - planning and execution of file and directory moves
//!
//! A move runs in three steps:
//! - [`MoveService::prepare`] checks preconditions and settles the final
//!   destination, before anything is read
//! - [`MoveService::plan`] computes every rewrite against the unmoved tree
//! - [`MoveService::execute`] writes the rewrites in place, then renames
//!
//! Nothing is written unless planning finished without error.

mod planner;

use crate::services::file_service::FileService;
use jsmv_config::{AppConfig, ResolutionConfig};
use jsmv_foundation::paths::{is_super_directory, to_absolute};
use jsmv_foundation::{JsmvError, JsmvResult, MoveOperation, MovePlan, MoveReport};
use jsmv_lang_javascript::ModuleResolver;
use std::path::Path;
use tracing::{debug, info, warn};

/// Move/rename service for one project
#[derive(Debug, Clone)]
pub struct MoveService {
    /// Resolver bound to the project root
    resolver: ModuleResolver,
    /// Source discovery and disk access
    files: FileService,
}

impl MoveService {
    pub fn new(resolver: ModuleResolver, files: FileService) -> Self {
        Self { resolver, files }
    }

    /// Build a service from loaded configuration
    pub fn from_config(
        project_root: &Path,
        config: &AppConfig,
        resolution: ResolutionConfig,
    ) -> Self {
        let resolver = ModuleResolver::new(project_root, resolution)
            .with_source_extension(&config.source_extension)
            .with_path_case(config.path_case);
        Self::new(resolver, FileService::from_config(config))
    }

    pub fn project_root(&self) -> &Path {
        self.resolver.project_root()
    }

    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    /// Validate a move request and settle its final destination.
    ///
    /// Relative arguments are taken against `cwd`. An existing directory as
    /// destination receives the source under its own name.
    pub fn prepare(
        &self,
        source: &Path,
        destination: &Path,
        cwd: &Path,
    ) -> JsmvResult<MoveOperation> {
        let source = to_absolute(source, cwd);
        let mut destination = to_absolute(destination, cwd);

        let metadata = std::fs::metadata(&source).map_err(|_| {
            JsmvError::not_found(format!("Source does not exist: {}", source.display()))
        })?;

        if destination.is_dir() {
            let name = source.file_name().ok_or_else(|| {
                JsmvError::invalid_request(format!(
                    "Source has no file name: {}",
                    source.display()
                ))
            })?;
            destination = destination.join(name);
            debug!(destination = %destination.display(), "Destination is a directory, nesting source");
        }

        if destination.exists() {
            return Err(JsmvError::already_exists(format!(
                "Destination already exists: {}",
                destination.display()
            )));
        }

        let op = MoveOperation::new(source, destination, metadata.is_dir());

        if op.is_directory && is_super_directory(&op.source, &op.destination) {
            return Err(JsmvError::invalid_request(format!(
                "Cannot move directory into itself: {} -> {}",
                op.source.display(),
                op.destination.display()
            )));
        }

        if !is_super_directory(self.project_root(), &op.source) {
            warn!(
                source = %op.source.display(),
                project_root = %self.project_root().display(),
                "Source is outside the project root, only its own references can be updated"
            );
        }

        Ok(op)
    }

    /// Compute every rewrite the move needs. Reads only.
    pub fn plan(&self, op: &MoveOperation) -> JsmvResult<MovePlan> {
        if op.is_directory {
            planner::plan_directory_move(op, &self.resolver, &self.files)
        } else {
            planner::plan_file_move(op, &self.resolver, &self.files)
        }
    }

    /// Apply a plan: write each rewritten file once, then rename the source.
    pub fn execute(&self, plan: &MovePlan) -> JsmvResult<MoveReport> {
        for rewrite in &plan.rewrites {
            for record in &rewrite.records {
                info!(
                    file = %rewrite.final_path.display(),
                    original = %record.original,
                    replacement = %record.replacement,
                    "Updating reference"
                );
            }
            self.files.write(&rewrite.path, &rewrite.content)?;
        }

        self.files
            .rename_entry(&plan.operation.source, &plan.operation.destination)?;

        info!(
            source = %plan.operation.source.display(),
            destination = %plan.operation.destination.display(),
            files_updated = plan.files_to_modify(),
            "Move complete"
        );
        Ok(MoveReport::from_plan(plan, false))
    }

    /// Prepare, plan and (unless `dry_run`) execute a move
    pub fn move_path(
        &self,
        source: &Path,
        destination: &Path,
        cwd: &Path,
        dry_run: bool,
    ) -> JsmvResult<MoveReport> {
        let op = self.prepare(source, destination, cwd)?;
        let plan = self.plan(&op)?;

        if dry_run {
            info!(files_to_modify = plan.files_to_modify(), "Dry run, nothing written");
            return Ok(MoveReport::from_plan(&plan, true));
        }
        self.execute(&plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsmv_test_support::TestWorkspace;
    use pretty_assertions::assert_eq;

    fn service(workspace: &TestWorkspace) -> MoveService {
        MoveService::from_config(
            workspace.path(),
            &AppConfig::default(),
            ResolutionConfig::default(),
        )
    }

    #[test]
    fn test_prepare_missing_source() {
        let workspace = TestWorkspace::new();
        let err = service(&workspace)
            .prepare(Path::new("src/nope.js"), Path::new("src/b.js"), workspace.path())
            .unwrap_err();
        assert!(matches!(err, JsmvError::NotFound { .. }));
    }

    #[test]
    fn test_prepare_nests_into_existing_directory() {
        let workspace = TestWorkspace::new();
        workspace.create_file("src/utils.js", "");
        workspace.create_directory("src/helpers");

        let op = service(&workspace)
            .prepare(Path::new("src/utils.js"), Path::new("src/helpers"), workspace.path())
            .unwrap();

        assert_eq!(op.destination, workspace.absolute_path("src/helpers/utils.js"));
        assert!(!op.is_directory);
    }

    #[test]
    fn test_prepare_rejects_existing_destination() {
        let workspace = TestWorkspace::new();
        workspace.create_file("src/a.js", "");
        workspace.create_file("src/b.js", "");

        let err = service(&workspace)
            .prepare(Path::new("src/a.js"), Path::new("src/b.js"), workspace.path())
            .unwrap_err();
        assert!(matches!(err, JsmvError::AlreadyExists { .. }));

        // Nesting would collide with an existing entry of the same name
        workspace.create_file("lib/a.js", "");
        let err = service(&workspace)
            .prepare(Path::new("src/a.js"), Path::new("lib"), workspace.path())
            .unwrap_err();
        assert!(matches!(err, JsmvError::AlreadyExists { .. }));
    }

    #[test]
    fn test_prepare_rejects_directory_into_itself() {
        let workspace = TestWorkspace::new();
        workspace.create_file("src/widgets/button.js", "");

        let err = service(&workspace)
            .prepare(
                Path::new("src/widgets"),
                Path::new("src/widgets/inner"),
                workspace.path(),
            )
            .unwrap_err();
        assert!(matches!(err, JsmvError::InvalidRequest { .. }));
        assert!(err.is_precondition());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let workspace = TestWorkspace::new();
        workspace.create_file("src/utils.js", "export const x = 1;\n");
        workspace.create_file("src/app.js", "import { x } from './utils';\n");

        let report = service(&workspace)
            .move_path(
                Path::new("src/utils.js"),
                Path::new("src/helpers/utils.js"),
                workspace.path(),
                true,
            )
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.rewrites.len(), 1);
        assert_eq!(report.rewrites[0].replacement, "./helpers/utils");
        assert!(workspace.file_exists("src/utils.js"));
        assert_eq!(workspace.read_file("src/app.js"), "import { x } from './utils';\n");
    }
}

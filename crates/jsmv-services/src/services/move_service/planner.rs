//! Planning logic for file and directory moves
//!
//! Every decision is made against the tree as it is before the move. The
//! planner reads files and computes their new text; it never writes.

use crate::services::file_service::{ExcludeMatcher, FileService};
use jsmv_foundation::paths::{is_same_file_with, is_super_directory, relative_reference};
use jsmv_foundation::{FileRewrite, JsmvError, JsmvResult, MoveOperation, MovePlan};
use jsmv_lang_javascript::{rewrite_source, ModuleResolver, ResolvedModule};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Plan a single-file move
///
/// Pass A rewrites the moved file's own relative references for its new
/// directory. Pass B rewrites references to the moved file everywhere else.
pub(super) fn plan_file_move(
    op: &MoveOperation,
    resolver: &ModuleResolver,
    files: &FileService,
) -> JsmvResult<MovePlan> {
    info!(
        old_path = %op.source.display(),
        new_path = %op.destination.display(),
        "Planning file move"
    );

    let mut plan = MovePlan::new(op.clone());

    if resolver.is_source_file(&op.source) {
        plan.push(rewrite_moved_file(op, resolver, files)?);
    }

    for file in files.find_source_files(resolver.project_root(), &[])? {
        if is_same_file_with(&file, &op.source, resolver.path_case()) {
            continue;
        }
        plan.push(rewrite_referrer(&file, op, resolver, files)?);
    }

    info!(
        files_to_modify = plan.files_to_modify(),
        "File move plan generated"
    );
    Ok(plan)
}

/// Plan a directory move
///
/// Pass 1 covers files inside the moved subtree, Pass 2 every other source
/// file in the project.
pub(super) fn plan_directory_move(
    op: &MoveOperation,
    resolver: &ModuleResolver,
    files: &FileService,
) -> JsmvResult<MovePlan> {
    info!(
        old_path = %op.source.display(),
        new_path = %op.destination.display(),
        "Planning directory move"
    );

    let mut plan = MovePlan::new(op.clone());

    debug!("Processing files inside the moved directory");
    for file in files.find_source_files(&op.source, &[])? {
        plan.push(rewrite_inner_file(&file, op, resolver, files)?);
    }

    debug!("Processing files outside the moved directory");
    let source = op.source.clone();
    let excludes: Vec<ExcludeMatcher> =
        vec![Box::new(move |dir: &Path| is_super_directory(&source, dir))];
    for file in files.find_source_files(resolver.project_root(), &excludes)? {
        plan.push(rewrite_outer_file(&file, op, resolver, files)?);
    }

    info!(
        files_to_modify = plan.files_to_modify(),
        "Directory move plan generated"
    );
    Ok(plan)
}

fn rewrite_moved_file(
    op: &MoveOperation,
    resolver: &ModuleResolver,
    files: &FileService,
) -> JsmvResult<FileRewrite> {
    let text = files.read(&op.source)?;
    let old_dir = op.source_parent();
    let new_dir = op.destination_parent();
    let same_dir = is_same_file_with(old_dir, new_dir, resolver.path_case());

    let outcome = rewrite_source(&op.source, &text, |reference| {
        let Some(resolved) = resolver.resolve(old_dir, &reference.raw) else {
            return Ok(None);
        };

        // A module importing itself follows itself to the destination
        if resolver.is_same_module(&resolved.path, &op.source) {
            let target = resolver.reference_path_for(&reference.raw, &op.destination);
            return render(resolver, &resolved, new_dir, &target).map(Some);
        }

        if !resolved.is_relative() || same_dir {
            return Ok(None);
        }
        Ok(Some(relative_reference(new_dir, &resolved.request)))
    })?;

    Ok(FileRewrite {
        path: op.source.clone(),
        final_path: op.destination.clone(),
        content: outcome.content,
        records: outcome.records,
    })
}

fn rewrite_referrer(
    file: &Path,
    op: &MoveOperation,
    resolver: &ModuleResolver,
    files: &FileService,
) -> JsmvResult<FileRewrite> {
    let text = files.read(file)?;
    let dir = parent_dir(file);

    let outcome = rewrite_source(file, &text, |reference| {
        let Some(resolved) = resolver.resolve(dir, &reference.raw) else {
            return Ok(None);
        };
        if !resolver.is_same_module(&resolved.path, &op.source) {
            return Ok(None);
        }

        let target = resolver.reference_path_for(&reference.raw, &op.destination);
        let replacement = render(resolver, &resolved, dir, &target)?;
        debug!(
            file = %file.display(),
            original = %reference.raw,
            replacement = %replacement,
            "Rewriting reference to moved file"
        );
        Ok(Some(replacement))
    })?;

    Ok(FileRewrite {
        path: file.to_path_buf(),
        final_path: file.to_path_buf(),
        content: outcome.content,
        records: outcome.records,
    })
}

fn rewrite_inner_file(
    file: &Path,
    op: &MoveOperation,
    resolver: &ModuleResolver,
    files: &FileService,
) -> JsmvResult<FileRewrite> {
    let final_path = op.relocate(file).ok_or_else(|| {
        JsmvError::invariant(format!(
            "{} was listed under {} but does not relocate",
            file.display(),
            op.source.display()
        ))
    })?;
    let text = files.read(file)?;
    let old_dir = parent_dir(file);
    let new_dir = parent_dir(&final_path);

    let outcome = rewrite_source(file, &text, |reference| {
        let Some(resolved) = resolver.resolve(old_dir, &reference.raw) else {
            return Ok(None);
        };
        let inner = is_super_directory(&op.source, &resolved.path);

        match (resolved.is_relative(), inner) {
            // Both ends move together
            (true, true) => Ok(None),
            (true, false) => Ok(Some(relative_reference(new_dir, &resolved.request))),
            (false, true) => {
                let target = relocated_request(op, resolver, &reference.raw, &resolved)?;
                resolver.to_prefixed_reference(&target).map(Some)
            }
            (false, false) => Ok(None),
        }
    })?;

    Ok(FileRewrite {
        path: file.to_path_buf(),
        final_path,
        content: outcome.content,
        records: outcome.records,
    })
}

fn rewrite_outer_file(
    file: &Path,
    op: &MoveOperation,
    resolver: &ModuleResolver,
    files: &FileService,
) -> JsmvResult<FileRewrite> {
    let text = files.read(file)?;
    let dir = parent_dir(file);

    let outcome = rewrite_source(file, &text, |reference| {
        let Some(resolved) = resolver.resolve(dir, &reference.raw) else {
            return Ok(None);
        };
        if !is_super_directory(&op.source, &resolved.path) {
            return Ok(None);
        }

        let target = relocated_request(op, resolver, &reference.raw, &resolved)?;
        render(resolver, &resolved, dir, &target).map(Some)
    })?;

    Ok(FileRewrite {
        path: file.to_path_buf(),
        final_path: file.to_path_buf(),
        content: outcome.content,
        records: outcome.records,
    })
}

/// Express `target` in the style `resolved` was written in
fn render(
    resolver: &ModuleResolver,
    resolved: &ResolvedModule,
    from_dir: &Path,
    target: &Path,
) -> JsmvResult<String> {
    if resolved.is_relative() {
        Ok(relative_reference(from_dir, target))
    } else {
        resolver.to_prefixed_reference(target)
    }
}

/// Where a reference into the moved subtree should point after the move.
///
/// The written request is rebased when it lies under the source itself; a
/// request that only resolves into the subtree (e.g. through a file that
/// shares the directory's name) is rebuilt from the resolved file.
fn relocated_request(
    op: &MoveOperation,
    resolver: &ModuleResolver,
    raw: &str,
    resolved: &ResolvedModule,
) -> JsmvResult<PathBuf> {
    if let Some(request) = op.relocate(&resolved.request) {
        return Ok(request);
    }
    let target = op.relocate(&resolved.path).ok_or_else(|| {
        JsmvError::invariant(format!(
            "{} resolved into {} but does not relocate",
            raw,
            op.source.display()
        ))
    })?;
    Ok(resolver.reference_path_for(raw, &target))
}

fn parent_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(file)
}

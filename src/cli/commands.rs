//! Command dispatch

use std::path::Path;

use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output::{self, ToDisplayTree};
use crate::domain::{CaptureMode, MissingTargetPolicy};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Diff {
            from,
            to,
            full_capture,
        }) => _diff(container, from, to, *full_capture),
        Some(Commands::Apply {
            from,
            to,
            target,
            output,
            skip_missing,
            full_capture,
        }) => _apply(
            container,
            from,
            to,
            target.as_deref().unwrap_or(to),
            output,
            *skip_missing,
            *full_capture,
        ),
        Some(Commands::Show { path }) => _show(container, path),
        Some(Commands::Validate { path }) => _validate(container, path),
        // Completion is handled in main before dispatch
        Some(Commands::Completion { .. }) | None => Ok(()),
    }
}

fn capture_mode(container: &ServiceContainer, full_capture: bool) -> CaptureMode {
    if full_capture {
        CaptureMode::FullPayload
    } else {
        container.settings.capture
    }
}

#[instrument(skip(container))]
fn _diff(container: &ServiceContainer, from: &Path, to: &Path, full_capture: bool) -> CliResult<()> {
    let service = container.reconcile(
        capture_mode(container, full_capture),
        container.settings.on_missing_target,
    );
    let diff = service.diff_files(from, to)?;

    if !diff.iter().any(|node| node.changes_anything()) {
        output::info("no changes");
        return Ok(());
    }
    for node in &diff {
        print!("{}", node.to_display_tree());
    }
    Ok(())
}

#[instrument(skip(container))]
#[allow(clippy::too_many_arguments)]
fn _apply(
    container: &ServiceContainer,
    from: &Path,
    to: &Path,
    target: &Path,
    out: &Path,
    skip_missing: bool,
    full_capture: bool,
) -> CliResult<()> {
    let policy = if skip_missing {
        MissingTargetPolicy::Skip
    } else {
        container.settings.on_missing_target
    };
    let service = container.reconcile(capture_mode(container, full_capture), policy);
    let merged = service.apply_files(from, to, target, out)?;
    output::success(&format!(
        "merged '{}' ({} categories) written to {}",
        merged.name,
        merged.categories.len(),
        out.display()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, path: &Path) -> CliResult<()> {
    let tree = container.store().load(path)?;
    debug!("show: '{}' with {} categories", tree.name, tree.categories.len());
    output::header(&tree.name);
    for category in &tree.categories {
        print!("{}", category.to_display_tree());
    }
    Ok(())
}

#[instrument(skip(container))]
fn _validate(container: &ServiceContainer, path: &Path) -> CliResult<()> {
    let tree = container.store().load(path)?;
    tree.validate()?;
    output::success(&format!("{}: identities are unambiguous", path.display()));
    Ok(())
}

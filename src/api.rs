use crate::{
    blueprint::{self, Blueprint},
    preview, scaffold,
};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum HinagataError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Blueprint(#[from] blueprint::BlueprintError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scaffold(#[from] scaffold::ScaffoldError),
}

/// Options of a single generator run.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// External blueprint file; the embedded one is used when `None`.
    pub blueprint: Option<PathBuf>,
    /// Only preview the plan.
    pub dry_run: bool,
}

/// Loads the blueprint selected by `options`.
///
/// # Errors
///
/// Returns a [`HinagataError`] if the blueprint cannot be read or parsed.
pub fn load_blueprint(options: &RunOptions) -> Result<Blueprint, HinagataError> {
    let blueprint = match &options.blueprint {
        Some(path) => {
            log::debug!("loading blueprint from: {}", path.display());
            Blueprint::from_file(path)?
        }
        None => Blueprint::embedded()?,
    };

    for discrepancy in blueprint.discrepancies() {
        log::warn!("{}", discrepancy);
    }

    Ok(blueprint)
}

/// Scaffolds the project described by the selected blueprint into its base directory and prints
/// the completion line.
///
/// # Errors
///
/// Returns a [`HinagataError`] if:
///
/// - The blueprint could not be read or parsed.
/// - A stub or entry point template fails to render.
/// - A directory or file cannot be created or written to.
pub fn generate(options: &RunOptions) -> Result<(), HinagataError> {
    let blueprint = load_blueprint(options)?;
    let base = blueprint.base_dir.clone();

    let plan = scaffold::build_plan(&blueprint)?;

    if options.dry_run {
        preview::preview_as_tree(&plan, &base);
        return Ok(());
    }

    let report = scaffold::apply_plan(&plan, &base)?;

    log::debug!(
        "{} directories ensured, {} files created, {} kept, {} overwritten",
        report.directories,
        report.created,
        report.kept,
        report.overwritten
    );

    println!(
        "{} folder structure created successfully in '{}'",
        blueprint.label,
        base.display()
    );

    Ok(())
}

use crate::{
    blueprint::{Blueprint, FixtureSpec},
    errors::{FileOperation, IoError},
    plan::{EntryKind, Plan, PlannedEntry, WritePolicy},
    utils::normalize_path,
};
use miette::Diagnostic;
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::Path,
};
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error("I/O error within scaffold domain")]
    #[diagnostic(code(hinagata::scaffold::io))]
    Io(#[from] IoError),

    #[error("Error occurred attempting to render the {artifact} template")]
    #[diagnostic(
        code(hinagata::scaffold::render),
        help("Check the template syntax in the blueprint")
    )]
    Render {
        artifact: String,
        #[source]
        source: tera::Error,
    },
}

/// What happened to a single planned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Kept,
    Overwritten,
}

/// Tally of one applied [`Plan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub directories: usize,
    pub created: usize,
    pub kept: usize,
    pub overwritten: usize,
}
impl Report {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::Kept => self.kept += 1,
            Outcome::Overwritten => self.overwritten += 1,
        }
    }
}

/// Logical type name of a stub: the file name without its extension.
pub fn type_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string())
}

fn render(
    tera: &mut Tera,
    artifact: &str,
    template: &str,
    ctx: &Context,
) -> Result<String, ScaffoldError> {
    tera.render_str(template, ctx)
        .map_err(|error| ScaffoldError::Render {
            artifact: artifact.to_string(),
            source: error,
        })
}

/// Renders the stub body for `file_name` living in `package`.
pub fn render_stub(
    tera: &mut Tera,
    blueprint: &Blueprint,
    package: &str,
    file_name: &str,
) -> Result<String, ScaffoldError> {
    let mut ctx = Context::new();
    ctx.insert("namespace", &blueprint.layout.stub_namespace_for(package));
    ctx.insert("type_name", &type_name(file_name));
    ctx.insert("package", package);

    render(tera, "stub", &blueprint.stub_template, &ctx)
}

/// Renders the full entry point body.
pub fn render_entry_point(tera: &mut Tera, blueprint: &Blueprint) -> Result<String, ScaffoldError> {
    let mut ctx = Context::new();
    ctx.insert("namespace", &blueprint.entry_point.namespace);
    ctx.insert("class_name", &blueprint.entry_point.class_name);

    render(tera, "entry point", &blueprint.entry_point.template, &ctx)
}

fn plan_stubs(plan: &mut Plan, blueprint: &Blueprint, tera: &mut Tera) -> Result<(), ScaffoldError> {
    for (package, files) in &blueprint.packages.0 {
        let directory = blueprint.layout.package_path(package);

        plan.push(PlannedEntry::directory(directory.clone()));

        for file_name in files {
            let content = render_stub(tera, blueprint, package, file_name)?;

            plan.push(PlannedEntry::file(
                directory.join(normalize_path(file_name)),
                content,
                WritePolicy::KeepExisting,
            ));
        }
    }

    Ok(())
}

fn plan_fixtures(plan: &mut Plan, fixtures: &FixtureSpec) {
    for directory in &fixtures.directories {
        plan.push(PlannedEntry::directory(normalize_path(directory)));
    }

    for file in &fixtures.files {
        plan.push(PlannedEntry::file(
            normalize_path(file),
            String::new(),
            WritePolicy::Touch,
        ));
    }
}

fn plan_entry_point(
    plan: &mut Plan,
    blueprint: &Blueprint,
    tera: &mut Tera,
) -> Result<(), ScaffoldError> {
    let content = render_entry_point(tera, blueprint)?;

    plan.push(PlannedEntry::file(
        normalize_path(&blueprint.entry_point.path),
        content,
        WritePolicy::Overwrite,
    ));

    Ok(())
}

/// Builds the ordered [`Plan`] for a blueprint: stubs per package, then fixtures, then the
/// entry point. Nothing touches the filesystem.
///
/// # Errors
///
/// Returns [`ScaffoldError::Render`] if a stub or entry point template fails to render.
pub fn build_plan(blueprint: &Blueprint) -> Result<Plan, ScaffoldError> {
    let mut tera = Tera::default();
    let mut plan = Plan::new();

    plan_stubs(&mut plan, blueprint, &mut tera)?;
    plan_fixtures(&mut plan, &blueprint.fixtures);
    plan_entry_point(&mut plan, blueprint, &mut tera)?;

    log::debug!(
        "planned {} entries ({} files)",
        plan.entries.len(),
        plan.files().count()
    );

    Ok(plan)
}

/// Applies a [`Plan`] below `base` in order, stopping at the first I/O failure.
///
/// Work already done is left in place when an error occurs.
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] naming the failing path and operation.
pub fn apply_plan(plan: &Plan, base: &Path) -> Result<Report, ScaffoldError> {
    let mut report = Report::default();

    for entry in &plan.entries {
        let final_path = base.join(&entry.destination);

        match &entry.kind {
            EntryKind::Directory => {
                create_directory(&final_path)?;
                report.directories += 1;
            }
            EntryKind::File { content, policy } => {
                if let Some(parent) = final_path.parent() {
                    create_directory(parent)?;
                }

                report.record(write_file(&final_path, content, *policy)?);
            }
        }
    }

    Ok(report)
}

/// Plans and applies `blueprint` below `base`.
///
/// # Errors
///
/// See [`build_plan`] and [`apply_plan`].
pub fn scaffold(blueprint: &Blueprint, base: &Path) -> Result<Report, ScaffoldError> {
    let plan = build_plan(blueprint)?;

    apply_plan(&plan, base)
}

/// Creates all directories in the specified path if they do not exist.
fn create_directory(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

    Ok(())
}

/// Writes `contents` to `path` according to `policy`.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] if the file cannot be opened, created or written.
fn write_file(path: &Path, contents: &str, policy: WritePolicy) -> Result<Outcome, ScaffoldError> {
    let outcome = match policy {
        WritePolicy::KeepExisting => {
            match OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(mut file) => {
                    file.write_all(contents.as_bytes())
                        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;
                    Outcome::Created
                }
                Err(error) if error.kind() == ErrorKind::AlreadyExists => Outcome::Kept,
                Err(error) => Err(IoError::new(FileOperation::Create, path.into(), error))?,
            }
        }
        WritePolicy::Touch => {
            let existed = path.exists();

            OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|error| IoError::new(FileOperation::Touch, path.into(), error))?;

            if existed {
                Outcome::Kept
            } else {
                Outcome::Created
            }
        }
        WritePolicy::Overwrite => {
            let existed = path.exists();

            fs::write(path, contents)
                .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

            if existed {
                Outcome::Overwritten
            } else {
                Outcome::Created
            }
        }
    };

    match outcome {
        Outcome::Created => log::info!("create {}", path.display()),
        Outcome::Kept => log::debug!("keep {}", path.display()),
        Outcome::Overwritten => log::info!("overwrite {}", path.display()),
    }

    Ok(outcome)
}

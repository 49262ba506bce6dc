use crate::errors::{FileOperation, IoError};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

const EMBEDDED_BLUEPRINT: &str = include_str!("../blueprint.toml");
const EMBEDDED_BLUEPRINT_NAME: &str = "<embedded blueprint.toml>";

#[derive(Error, Debug, Diagnostic)]
pub enum BlueprintError {
    #[error("I/O error within blueprint domain")]
    #[diagnostic(code(hinagata::blueprint::io))]
    Io(#[from] IoError),

    #[error("Unable to parse blueprint at '{path}': {source}")]
    #[diagnostic(
        code(hinagata::blueprint::parse_toml),
        help("Review the blueprint toml file")
    )]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Logical package path (`controller/auth`) to the file names generated inside it.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PackageMap(pub IndexMap<String, Vec<String>>); // order of the toml table is kept

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directory under `src/main` and `src/test`, e.g. `java`.
    pub source_root: String,
    /// `/`-separated organization segments placed between the source root and every package.
    pub organization: String,
    /// Dotted prefix written into the namespace line of stub files.
    pub stub_namespace: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FixtureSpec {
    #[serde(default)]
    pub directories: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EntryPointSpec {
    /// Path relative to the base directory.
    pub path: String,
    pub namespace: String,
    pub class_name: String,
    pub template: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub base_dir: PathBuf,
    /// Human readable project kind used in the completion message.
    pub label: String,
    pub stub_template: String,
    pub layout: Layout,
    #[serde(default)]
    pub packages: PackageMap,
    #[serde(default)]
    pub fixtures: FixtureSpec,
    pub entry_point: EntryPointSpec,
}
impl Blueprint {
    /// The blueprint compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::ParseToml`] if the embedded file is not a valid blueprint.
    pub fn embedded() -> Result<Self, BlueprintError> {
        Self::from_toml_str(EMBEDDED_BLUEPRINT, Path::new(EMBEDDED_BLUEPRINT_NAME))
    }

    /// Reads and parses a blueprint from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`BlueprintError`] if the file cannot be read or is not a valid blueprint.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BlueprintError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::from_toml_str(&content, path)
    }

    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, BlueprintError> {
        toml::from_str(content).map_err(|err| BlueprintError::ParseToml {
            path: origin.to_path_buf(),
            source: err,
        })
    }

    /// Inspects the blueprint for inconsistencies that are worth flagging but never corrected.
    pub fn discrepancies(&self) -> Vec<Discrepancy> {
        let mut found = Vec::new();

        let organization_namespace = self
            .layout
            .organization
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(".");

        if organization_namespace != self.layout.stub_namespace {
            found.push(Discrepancy::NamespaceMismatch {
                organization: organization_namespace,
                stub: self.layout.stub_namespace.clone(),
            });
        }

        if self.entry_point.namespace != self.layout.stub_namespace {
            found.push(Discrepancy::EntryPointNamespaceMismatch {
                entry_point: self.entry_point.namespace.clone(),
                stub: self.layout.stub_namespace.clone(),
            });
        }

        let file_stem = Path::new(&self.entry_point.path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        if file_stem != self.entry_point.class_name {
            found.push(Discrepancy::ClassNameMismatch {
                file_stem,
                class_name: self.entry_point.class_name.clone(),
            });
        }

        found
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    NamespaceMismatch { organization: String, stub: String },
    EntryPointNamespaceMismatch { entry_point: String, stub: String },
    ClassNameMismatch { file_stem: String, class_name: String },
}
impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamespaceMismatch { organization, stub } => write!(
                f,
                "stub namespace '{}' does not match organization path namespace '{}'",
                stub, organization
            ),
            Self::EntryPointNamespaceMismatch { entry_point, stub } => write!(
                f,
                "entry point namespace '{}' differs from stub namespace '{}'",
                entry_point, stub
            ),
            Self::ClassNameMismatch {
                file_stem,
                class_name,
            } => write!(
                f,
                "entry point class '{}' does not match its file name '{}'",
                class_name, file_stem
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
base_dir = "Shop"
label = "Shop backend"
stub_template = "package {{ namespace }};"

[layout]
source_root = "java"
organization = "com/example/shop"
stub_namespace = "com.example.shop"

[packages]
"service" = []
"controller/auth" = ["AuthController.java"]
"config" = ["SecurityConfig.java"]

[entry_point]
path = "src/main/java/com/example/shop/ShopApplication.java"
namespace = "com.example.shop"
class_name = "ShopApplication"
template = "package {{ namespace }};"
"#;

    #[test]
    fn embedded_blueprint_parses() {
        let blueprint = Blueprint::embedded().unwrap();

        assert_eq!(blueprint.base_dir, PathBuf::from("ECoPro"));
        assert_eq!(blueprint.layout.source_root, "java");
        assert_eq!(blueprint.packages.0.len(), 37);
        assert_eq!(blueprint.fixtures.directories.len(), 5);
        assert_eq!(blueprint.fixtures.files.len(), 7);
        assert_eq!(
            blueprint.packages.0.get("controller/auth").unwrap(),
            &vec![
                "AuthController.java".to_string(),
                "SessionController.java".to_string(),
                "AuthProviderController.java".to_string(),
            ]
        );
    }

    #[test]
    fn package_order_follows_document_order() {
        let blueprint = Blueprint::from_toml_str(MINIMAL, Path::new("minimal.toml")).unwrap();

        let keys: Vec<&str> = blueprint.packages.0.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["service", "controller/auth", "config"]);
        assert!(blueprint.packages.0["service"].is_empty());
        assert!(blueprint.fixtures.files.is_empty());
    }

    #[test]
    fn parse_error_names_origin() {
        let error = Blueprint::from_toml_str("base_dir = ", Path::new("broken.toml")).unwrap_err();

        match error {
            BlueprintError::ParseToml { path, .. } => assert_eq!(path, PathBuf::from("broken.toml")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let error = Blueprint::from_file(&missing).unwrap_err();

        match error {
            BlueprintError::Io(io) => {
                assert_eq!(io.operation, FileOperation::Read);
                assert_eq!(io.path, missing);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn consistent_blueprint_has_no_discrepancies() {
        let blueprint = Blueprint::from_toml_str(MINIMAL, Path::new("minimal.toml")).unwrap();

        assert!(blueprint.discrepancies().is_empty());
    }

    #[test]
    fn embedded_blueprint_flags_original_inconsistencies() {
        let blueprint = Blueprint::embedded().unwrap();

        let found = blueprint.discrepancies();

        assert!(found.contains(&Discrepancy::NamespaceMismatch {
            organization: "com.litemax.ECoPro".to_string(),
            stub: "com.example.ecommerce".to_string(),
        }));
        assert!(found.contains(&Discrepancy::EntryPointNamespaceMismatch {
            entry_point: "com.litemax.ECoPro".to_string(),
            stub: "com.example.ecommerce".to_string(),
        }));
        assert!(found.contains(&Discrepancy::ClassNameMismatch {
            file_stem: "ECoProApplication".to_string(),
            class_name: "EcommerceApplication".to_string(),
        }));
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn class_name_mismatch_is_flagged() {
        let mut blueprint = Blueprint::from_toml_str(MINIMAL, Path::new("minimal.toml")).unwrap();
        blueprint.entry_point.class_name = "EcommerceApplication".to_string();

        assert_eq!(
            blueprint.discrepancies(),
            vec![Discrepancy::ClassNameMismatch {
                file_stem: "ShopApplication".to_string(),
                class_name: "EcommerceApplication".to_string(),
            }]
        );
    }
}

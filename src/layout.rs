use crate::{blueprint::Layout, utils::normalize_path};
use std::path::{Path, PathBuf};

/// Segments of a `/`-separated logical path, normalized the same way as fixture paths so a
/// package never climbs out of the organization root.
fn segments(logical: &str) -> Vec<String> {
    normalize_path(logical)
        .components()
        .map(|component| component.as_os_str().to_string_lossy().to_string())
        .collect()
}

impl Layout {
    /// Directory of a logical package relative to the base directory:
    /// `src/main/<source_root>/<organization...>/<package...>`.
    pub fn package_path(&self, package: &str) -> PathBuf {
        let mut path = PathBuf::from("src").join("main").join(&self.source_root);

        for segment in segments(&self.organization)
            .into_iter()
            .chain(segments(package))
        {
            path.push(segment);
        }

        path
    }

    /// Absolute-within-run directory for `package` under `base`.
    pub fn resolve(&self, base: &Path, package: &str) -> PathBuf {
        base.join(self.package_path(package))
    }

    /// Dotted namespace written into stubs of `package`.
    pub fn stub_namespace_for(&self, package: &str) -> String {
        std::iter::once(self.stub_namespace.clone())
            .filter(|prefix| !prefix.is_empty())
            .chain(segments(package))
            .collect::<Vec<_>>()
            .join(".")
    }
}

use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a blueprint-relative path so it always stays below the base directory.
pub fn normalize_path<P: AsRef<Path>>(source: P) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.as_ref().components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component if possible
            Component::ParentDir => {
                new_path.pop();
            }

            // Absolute markers would escape the base directory
            Component::RootDir | Component::Prefix(_) => {}

            Component::Normal(segment) => new_path.push(segment),
        }
    }

    new_path
}

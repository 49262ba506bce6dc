use std::path::PathBuf;

/// How an existing file at a planned path is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Create with content only when absent; an existing file is never touched.
    KeepExisting,
    /// Create empty when absent; an existing file is never truncated.
    Touch,
    /// Replace whatever is there.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File {
        content: String,
        policy: WritePolicy,
    },
}

/// A directory or file staged for creation, relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub destination: PathBuf,
    pub kind: EntryKind,
}
impl PlannedEntry {
    pub fn directory(destination: PathBuf) -> Self {
        Self {
            destination,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(destination: PathBuf, content: String, policy: WritePolicy) -> Self {
        Self {
            destination,
            kind: EntryKind::File { content, policy },
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }
}

/// Ordered list of entries; applying it in order reproduces the scaffolding phases.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub entries: Vec<PlannedEntry>,
}
impl Plan {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: PlannedEntry) {
        self.entries.push(entry);
    }

    pub fn files(&self) -> impl Iterator<Item = &PlannedEntry> {
        self.entries.iter().filter(|e| e.is_file())
    }
}

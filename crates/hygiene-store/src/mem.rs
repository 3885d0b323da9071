use std::collections::BTreeMap;
use std::io;

use time::OffsetDateTime;

use crate::ProjectStore;

#[derive(Debug, Clone)]
struct MemFile {
    content: String,
    modified: OffsetDateTime,
    readable: bool,
}

/// In-memory [`ProjectStore`] with caller-controlled modification times.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    files: BTreeMap<String, MemFile>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, name: &str, content: &str, modified: OffsetDateTime) -> &mut Self {
        self.files.insert(
            name.to_string(),
            MemFile {
                content: content.to_string(),
                modified,
                readable: true,
            },
        );
        self
    }

    /// Add a file that exists but fails every read (permission denied).
    pub fn insert_unreadable(&mut self, name: &str) -> &mut Self {
        self.files.insert(
            name.to_string(),
            MemFile {
                content: String::new(),
                modified: OffsetDateTime::UNIX_EPOCH,
                readable: false,
            },
        );
        self
    }

    fn get(&self, name: &str) -> io::Result<&MemFile> {
        let file = self
            .files
            .get(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))?;
        if !file.readable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                name.to_string(),
            ));
        }
        Ok(file)
    }
}

impl ProjectStore for MemStore {
    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn read_text(&self, name: &str) -> io::Result<String> {
        self.get(name).map(|f| f.content.clone())
    }

    fn last_modified(&self, name: &str) -> io::Result<OffsetDateTime> {
        self.get(name).map(|f| f.modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn insert_then_read() {
        let t = datetime!(2024-05-01 12:00 UTC);
        let mut store = MemStore::new();
        store.insert("CLAUDE.md", "rules", t);
        assert!(store.exists("CLAUDE.md"));
        assert_eq!(store.read_text("CLAUDE.md").unwrap(), "rules");
        assert_eq!(store.last_modified("CLAUDE.md").unwrap(), t);
    }

    #[test]
    fn unreadable_exists_but_fails() {
        let mut store = MemStore::new();
        store.insert_unreadable("DECISIONS.md");
        assert!(store.exists("DECISIONS.md"));
        let err = store.read_text("DECISIONS.md").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(store.last_modified("DECISIONS.md").is_err());
    }

    #[test]
    fn missing_is_not_found() {
        let store = MemStore::new();
        assert!(!store.exists("SESSION_STATE.md"));
        let err = store.read_text("SESSION_STATE.md").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

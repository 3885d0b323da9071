//! Project-root file access for the hygiene hooks.
//!
//! The hooks never own state: everything they know is re-derived from a handful of
//! files under the project root on every invocation. [`ProjectStore`] is that view,
//! keyed by file name, so the bootstrap and reminder logic can run against the real
//! filesystem ([`FsStore`]) or an in-memory fake ([`MemStore`]).

mod mem;

pub use mem::MemStore;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

/// Env var the host sets to the project root.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Read-only view of the files under a project root, keyed by relative file name.
pub trait ProjectStore {
    /// Whether `name` exists under the root.
    fn exists(&self, name: &str) -> bool;

    /// Full UTF-8 contents of `name`.
    fn read_text(&self, name: &str) -> io::Result<String>;

    /// Last modification time of `name`.
    fn last_modified(&self, name: &str) -> io::Result<OffsetDateTime>;
}

/// [`ProjectStore`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at `root`. Fails if `root` is not a readable directory.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let meta = fs::metadata(&root)?;
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", root.display()),
            ));
        }
        // Surface permission problems up front instead of per file.
        fs::read_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ProjectStore for FsStore {
    fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    fn read_text(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.path(name))
    }

    fn last_modified(&self, name: &str) -> io::Result<OffsetDateTime> {
        let modified = fs::metadata(self.path(name))?.modified()?;
        Ok(OffsetDateTime::from(modified))
    }
}

/// Resolve the project root: `CLAUDE_PROJECT_DIR` if set and non-empty, else the cwd.
pub fn project_root() -> io::Result<PathBuf> {
    match std::env::var_os(PROJECT_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => std::env::current_dir(),
    }
}

/// Replace `path` with `data` through a staged `.hygiene-*` temp file in the same
/// directory, renamed into place once synced.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut staged = tempfile::Builder::new()
        .prefix(".hygiene-")
        .tempfile_in(dir)?;
    staged.as_file_mut().write_all(data)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn open_rejects_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(FsStore::open(tmp.path().join("nope")).is_err());
    }

    #[test]
    fn open_rejects_file_root() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(FsStore::open(&file).is_err());
    }

    #[test]
    fn fs_store_reads_text_and_mtime() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("SESSION_STATE.md");
        fs::write(&path, "working on parser").unwrap();
        let an_hour_ago = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(an_hour_ago)
            .unwrap();

        let store = FsStore::open(tmp.path()).unwrap();
        assert!(store.exists("SESSION_STATE.md"));
        assert!(!store.exists("DECISIONS.md"));
        assert_eq!(store.read_text("SESSION_STATE.md").unwrap(), "working on parser");
        let modified = store.last_modified("SESSION_STATE.md").unwrap();
        let drift = modified - OffsetDateTime::from(an_hour_ago);
        assert!(drift.abs() < time::Duration::seconds(1));
    }

    #[test]
    fn directories_do_not_count_as_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("CLAUDE.md")).unwrap();
        let store = FsStore::open(tmp.path()).unwrap();
        assert!(!store.exists("CLAUDE.md"));
    }

    #[test]
    fn missing_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::open(tmp.path()).unwrap();
        assert!(store.read_text("DECISIONS.md").is_err());
        assert!(store.last_modified("DECISIONS.md").is_err());
    }

    #[test]
    fn project_root_prefers_env_then_cwd() {
        std::env::set_var(PROJECT_DIR_ENV, "/tmp/some-project");
        assert_eq!(project_root().unwrap(), PathBuf::from("/tmp/some-project"));

        std::env::set_var(PROJECT_DIR_ENV, "");
        assert_eq!(project_root().unwrap(), std::env::current_dir().unwrap());

        std::env::remove_var(PROJECT_DIR_ENV);
        assert_eq!(project_root().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn write_atomic_creates_parent_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".claude").join("settings.local.json");
        write_atomic(&path, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn write_atomic_replaces_without_leftovers() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.local.json");
        fs::write(&path, "old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");

        let names: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["settings.local.json".to_string()]);
    }
}

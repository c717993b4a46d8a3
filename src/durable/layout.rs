//! Store Layout
//!
//! Maps keys to file locations under the store root. Each key's record lives
//! at `root/<blake3 hex of key>`; in-flight writes live under `root/.staging`.

use std::path::{Path, PathBuf};

use crate::kv::Key;

/// Name of the staging directory under the store root.
pub const STAGING_DIR: &str = ".staging";

const STAGED_EXTENSION: &str = "tmp";

// == Store Layout ==
#[derive(Debug, Clone)]
pub struct StoreLayout {
    root: PathBuf,
    staging: PathBuf,
}

impl StoreLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let staging = root.join(STAGING_DIR);
        Self { root, staging }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// File name for `key`: the full 256-bit BLAKE3 digest, hex encoded.
    ///
    /// Distinct keys colliding would need a BLAKE3 collision, which is treated
    /// as impossible.
    pub fn file_name(key: &Key) -> String {
        blake3::hash(key.as_bytes()).to_hex().to_string()
    }

    /// Committed location of `key`'s record.
    pub fn record_path(&self, key: &Key) -> PathBuf {
        self.root.join(Self::file_name(key))
    }

    /// Staged location for one write attempt of `key`.
    ///
    /// `seq` must be unique per attempt within the process so concurrent
    /// writers never share a staged file.
    pub fn staged_path(&self, key: &Key, seq: u64) -> PathBuf {
        self.staging.join(format!(
            "{}.{}.{}.{}",
            Self::file_name(key),
            std::process::id(),
            seq,
            STAGED_EXTENSION
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_deterministic_hex() {
        let name = StoreLayout::file_name(&Key::from("a key"));

        assert_eq!(name, StoreLayout::file_name(&Key::from("a key")));
        assert_eq!(name.len(), 64);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_distinct_keys_map_to_distinct_files() {
        let keys = ["a", "b", "a key", "a key ", "A KEY", "../etc/passwd", ".staging"];
        let names: std::collections::HashSet<String> = keys
            .iter()
            .map(|k| StoreLayout::file_name(&Key::from(*k)))
            .collect();

        assert_eq!(names.len(), keys.len());
    }

    #[test]
    fn test_paths_stay_under_root() {
        let layout = StoreLayout::new("/data/kv");
        let key = Key::from("../../escape");

        let record = layout.record_path(&key);
        let staged = layout.staged_path(&key, 7);

        assert_eq!(record.parent(), Some(Path::new("/data/kv")));
        assert_eq!(staged.parent(), Some(Path::new("/data/kv/.staging")));
        assert_ne!(layout.staged_path(&key, 8), staged);
    }
}

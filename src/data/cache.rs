//! Memoized table loading.
//!
//! A loaded table is reused as long as its source keeps the same identity:
//! the path plus the file's length and modification time, hashed together.
//! Any change produces a new key and a fresh load.

use super::loader::load_table;
use super::table::RespondentTable;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Identity of a source file at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey(String);

impl SourceKey {
    /// `None` when the file cannot be inspected (for example, it is missing).
    pub fn for_path(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        let mut hasher = Sha256::new();
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update(metadata.len().to_le_bytes());
        Self::hash_mtime(&mut hasher, &metadata);
        Some(Self(format!("{:x}", hasher.finalize())))
    }

    fn hash_mtime(hasher: &mut Sha256, metadata: &std::fs::Metadata) {
        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok());

        if let Some(d) = mtime {
            hasher.update(d.as_secs().to_le_bytes());
            hasher.update(d.subsec_nanos().to_le_bytes());
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// Table cache for one process.
pub struct TableCache {
    delimiter: u8,
    entries: HashMap<PathBuf, (SourceKey, Arc<RespondentTable>)>,
    stats: CacheStats,
}

impl TableCache {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Return the cached table for `path`, loading it when the source changed.
    ///
    /// Sources that cannot be inspected are loaded (yielding an empty table)
    /// but never cached, so a file that appears later is picked up.
    pub fn get_or_load(&mut self, path: &Path) -> Arc<RespondentTable> {
        let Some(key) = SourceKey::for_path(path) else {
            self.stats.misses += 1;
            return Arc::new(load_table(path, self.delimiter));
        };

        if let Some((cached_key, table)) = self.entries.get(path) {
            if *cached_key == key {
                self.stats.hits += 1;
                debug!(path = %path.display(), "Survey table cache hit");
                return Arc::clone(table);
            }
        }

        self.stats.misses += 1;
        let table = Arc::new(load_table(path, self.delimiter));
        self.entries
            .insert(path.to_path_buf(), (key, Arc::clone(&table)));
        table
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

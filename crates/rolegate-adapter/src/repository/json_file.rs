//! JSON File Store
//!
//! Same tables as the in-memory store, snapshotted to a JSON file after
//! every mutation. A write is applied to a copy of the tables, the copy is
//! written to a temporary sibling file and renamed over the data file, and
//! only then published to readers. If any step fails the store is left
//! exactly as it was and the caller sees `Unavailable`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rolegate_domain::RepositoryError;

use super::tables::{impl_repositories, Tables};

/// File-backed store for permissions, roles, users and their associations
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    tables: Arc<RwLock<Tables>>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let tables = if path.exists() {
            let bytes = fs::read(&path).map_err(|e| {
                RepositoryError::unavailable(format!("read {}: {}", path.display(), e))
            })?;
            serde_json::from_slice(&bytes).map_err(|e| {
                RepositoryError::unavailable(format!("parse {}: {}", path.display(), e))
            })?
        } else {
            Tables::default()
        };

        tracing::debug!(path = %path.display(), "opened json file store");

        Ok(Self {
            path,
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(
        &self,
        op: impl FnOnce(&Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::unavailable("Failed to acquire read lock"))?;
        op(&tables)
    }

    fn write<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::unavailable("Failed to acquire write lock"))?;

        let mut next = tables.clone();
        let out = op(&mut next)?;
        self.persist(&next)?;
        *tables = next;
        Ok(out)
    }

    fn persist(&self, tables: &Tables) -> Result<(), RepositoryError> {
        let unavailable =
            |e: std::io::Error| RepositoryError::unavailable(format!("write {}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }

        let json = serde_json::to_vec_pretty(tables)
            .map_err(|e| RepositoryError::unavailable(format!("encode snapshot: {}", e)))?;

        let tmp = self.tmp_path();
        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(&json)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %tmp.display(),
                        error = %cleanup,
                        "failed to remove temp file"
                    );
                }
            }
            return Err(unavailable(e));
        }

        tracing::trace!(path = %self.path.display(), bytes = json.len(), "snapshot written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl_repositories!(JsonFileStore);

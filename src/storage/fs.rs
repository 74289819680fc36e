//! Flat-file order store
//!
//! Artifacts live side by side in one directory as `order_<id>.json` and
//! `order_<id>.html`. Commits stage every artifact in a uniquely named hidden
//! temp file next to its target and then persist them into place.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{Artifact, ArtifactKind, OrderStore};
use crate::Result;
use crate::order::OrderId;

/// Staged files are named `.order_<random>.tmp`, never a listed artifact
const STAGING_PREFIX: &str = ".order_";
const STAGING_SUFFIX: &str = ".tmp";

/// Order store backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsOrderStore {
    dir: PathBuf,
}

impl FsOrderStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the artifacts
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final location of an artifact
    #[must_use]
    pub fn path_for(&self, id: &OrderId, kind: ArtifactKind) -> PathBuf {
        self.dir.join(kind.file_name(id))
    }

    fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Write bytes to a fresh temp file in the store directory and sync it
    ///
    /// The file is removed on drop unless persisted.
    fn stage(&self, bytes: &[u8]) -> io::Result<NamedTempFile> {
        let mut temp = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(&self.dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        Ok(temp)
    }
}

impl OrderStore for FsOrderStore {
    fn write(&self, id: &OrderId, kind: ArtifactKind, bytes: &[u8]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.path_for(id, kind);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    fn commit(&self, id: &OrderId, artifacts: &[Artifact<'_>]) -> Result<Vec<PathBuf>> {
        self.ensure_dir()?;

        // Unpersisted temp files delete themselves when `staged` drops
        let mut staged = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let temp = self.stage(artifact.bytes).inspect_err(|e| {
                tracing::warn!(order_id = %id, kind = ?artifact.kind, error = %e, "staging failed");
            })?;
            staged.push((temp, self.path_for(id, artifact.kind)));
        }

        let mut committed = Vec::with_capacity(staged.len());
        for (temp, target) in staged {
            temp.persist(&target).map_err(|e| {
                tracing::warn!(order_id = %id, path = %target.display(), error = %e.error, "commit failed");
                e.error
            })?;
            committed.push(target);
        }

        Ok(committed)
    }

    fn read(&self, id: &OrderId, kind: ArtifactKind) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(id, kind)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn ids(&self, kind: ArtifactKind) -> Result<Vec<OrderId>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(kind.extension()) {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(OrderId::from_file_stem)
            {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn receipt_and_record<'a>(receipt: &'a [u8], record: &'a [u8]) -> [Artifact<'a>; 2] {
        [
            Artifact::new(ArtifactKind::Receipt, receipt),
            Artifact::new(ArtifactKind::Record, record),
        ]
    }

    fn staged_leftovers(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(STAGING_SUFFIX))
            .collect()
    }

    #[test]
    fn write_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path().join("orders"));
        let id = OrderId::new("1");

        let path = store.write(&id, ArtifactKind::Record, b"{}").unwrap();

        assert_eq!(path, tmp.path().join("orders").join("order_1.json"));
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }

    #[test]
    fn write_replaces_existing_artifact() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path());
        let id = OrderId::new("1");

        store.write(&id, ArtifactKind::Receipt, b"first").unwrap();
        store.write(&id, ArtifactKind::Receipt, b"second").unwrap();

        assert_eq!(
            store.read(&id, ArtifactKind::Receipt).unwrap().as_deref(),
            Some(b"second".as_slice())
        );
    }

    #[test]
    fn commit_lands_all_artifacts() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path().join("orders"));
        let id = OrderId::new("7");

        let paths = store
            .commit(&id, &receipt_and_record(b"<html></html>", b"{}"))
            .unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(staged_leftovers(store.dir()).is_empty());
    }

    #[test]
    fn failed_persist_keeps_earlier_artifacts_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path());
        let id = OrderId::new("7");

        // A non-empty directory where the record belongs cannot be replaced
        let record = store.path_for(&id, ArtifactKind::Record);
        std::fs::create_dir(&record).unwrap();
        std::fs::write(record.join("keep"), b"").unwrap();

        let result = store.commit(&id, &receipt_and_record(b"<html></html>", b"{}"));

        assert!(matches!(result, Err(crate::Error::Io(_))));
        // Receipt lands first, the record target is untouched
        assert_eq!(
            std::fs::read(store.path_for(&id, ArtifactKind::Receipt)).unwrap(),
            b"<html></html>"
        );
        assert!(record.is_dir());
        assert!(record.join("keep").exists());
        assert!(staged_leftovers(tmp.path()).is_empty());
    }

    #[test]
    fn concurrent_commits_of_one_id_all_succeed() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path().join("orders"));
        let id = OrderId::new("42");

        std::thread::scope(|scope| {
            for worker in 0..4_u8 {
                let (store, id) = (&store, &id);
                scope.spawn(move || {
                    for _ in 0..100 {
                        let receipt = [b'<', worker, b'>'];
                        let record = [b'{', worker, b'}'];
                        store.commit(id, &receipt_and_record(&receipt, &record)).unwrap();
                    }
                });
            }
        });

        // Last writer wins: one complete pair and no staging debris
        let receipt = store.read(&id, ArtifactKind::Receipt).unwrap().unwrap();
        let record = store.read(&id, ArtifactKind::Record).unwrap().unwrap();
        assert_eq!((receipt.len(), record.len()), (3, 3));
        assert_eq!(store.ids(ArtifactKind::Record).unwrap(), vec![id.clone()]);
        assert_eq!(store.ids(ArtifactKind::Receipt).unwrap(), vec![id]);
        assert!(staged_leftovers(store.dir()).is_empty());
    }

    #[test]
    fn read_missing_artifact_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path());
        assert!(store.read(&OrderId::new("404"), ArtifactKind::Record).unwrap().is_none());
    }

    #[test]
    fn ids_lists_matching_artifacts_only() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path());

        store.write(&OrderId::new("20"), ArtifactKind::Record, b"{}").unwrap();
        store.write(&OrderId::new("10"), ArtifactKind::Record, b"{}").unwrap();
        store.write(&OrderId::new("30"), ArtifactKind::Receipt, b"").unwrap();
        std::fs::write(tmp.path().join("notes.json"), b"{}").unwrap();
        std::fs::write(tmp.path().join(".order_x7Qp2a.tmp"), b"{}").unwrap();

        let ids = store.ids(ArtifactKind::Record).unwrap();
        assert_eq!(ids, vec![OrderId::new("10"), OrderId::new("20")]);
    }

    #[test]
    fn ids_follow_issue_order() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path());

        for id in ["42-10", "1000", "42-2", "999", "42"] {
            store.write(&OrderId::new(id), ArtifactKind::Record, b"{}").unwrap();
        }

        let ids: Vec<String> = store
            .ids(ArtifactKind::Record)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["42", "42-2", "42-10", "999", "1000"]);
    }

    #[test]
    fn ids_of_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FsOrderStore::new(tmp.path().join("never-created"));
        assert!(store.ids(ArtifactKind::Record).unwrap().is_empty());
    }
}

//! In-memory order store

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Artifact, ArtifactKind, OrderStore};
use crate::Result;
use crate::order::OrderId;

type Artifacts = BTreeMap<(OrderId, ArtifactKind), Vec<u8>>;

/// Order store kept entirely in memory
///
/// Commits happen under one lock, so readers never see half an order.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    artifacts: Mutex<Artifacts>,
}

impl MemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts across all orders
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Artifacts> {
        // Map updates are single inserts, a poisoned map is still consistent
        self.artifacts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OrderStore for MemoryOrderStore {
    fn write(&self, id: &OrderId, kind: ArtifactKind, bytes: &[u8]) -> Result<PathBuf> {
        self.lock().insert((id.clone(), kind), bytes.to_vec());
        Ok(PathBuf::from(kind.file_name(id)))
    }

    fn commit(&self, id: &OrderId, artifacts: &[Artifact<'_>]) -> Result<Vec<PathBuf>> {
        let mut map = self.lock();
        Ok(artifacts
            .iter()
            .map(|artifact| {
                map.insert((id.clone(), artifact.kind), artifact.bytes.to_vec());
                PathBuf::from(artifact.kind.file_name(id))
            })
            .collect())
    }

    fn read(&self, id: &OrderId, kind: ArtifactKind) -> Result<Option<Vec<u8>>> {
        Ok(self.lock().get(&(id.clone(), kind)).cloned())
    }

    fn ids(&self, kind: ArtifactKind) -> Result<Vec<OrderId>> {
        Ok(self
            .lock()
            .keys()
            .filter(|(_, k)| *k == kind)
            .map(|(id, _)| id.clone())
            .collect())
    }
}

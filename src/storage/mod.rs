//! Artifact storage for recorded orders
//!
//! Each order produces two artifacts keyed by the same [`OrderId`]: the JSON
//! record and the HTML receipt. Stores expose single-artifact writes plus a
//! [`OrderStore::commit`] that lands a full set together.

mod fs;
mod memory;

use std::path::PathBuf;

use crate::Result;
use crate::order::OrderId;

pub use fs::FsOrderStore;
pub use memory::MemoryOrderStore;

/// Kind of artifact written for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Canonical JSON record
    Record,
    /// Rendered HTML receipt
    Receipt,
}

impl ArtifactKind {
    /// File extension used on disk
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Record => "json",
            Self::Receipt => "html",
        }
    }

    /// Full artifact filename for an order, e.g. `order_1700000000.json`
    #[must_use]
    pub fn file_name(self, id: &OrderId) -> String {
        format!("{}.{}", id.file_stem(), self.extension())
    }
}

/// One artifact staged for commit
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    pub kind: ArtifactKind,
    pub bytes: &'a [u8],
}

impl<'a> Artifact<'a> {
    #[must_use]
    pub const fn new(kind: ArtifactKind, bytes: &'a [u8]) -> Self {
        Self { kind, bytes }
    }
}

/// Storage backend for order artifacts
pub trait OrderStore: Send + Sync {
    /// Write one artifact, replacing any existing one with the same id and kind
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot persist the bytes
    fn write(&self, id: &OrderId, kind: ArtifactKind, bytes: &[u8]) -> Result<PathBuf>;

    /// Persist a set of artifacts for one order
    ///
    /// Artifacts become visible in the given order. The default writes them
    /// one after another; backends that can stage should override it so a
    /// failure leaves none of them behind.
    ///
    /// # Errors
    ///
    /// Returns the first write error
    fn commit(&self, id: &OrderId, artifacts: &[Artifact<'_>]) -> Result<Vec<PathBuf>> {
        artifacts
            .iter()
            .map(|artifact| self.write(id, artifact.kind, artifact.bytes))
            .collect()
    }

    /// Read an artifact back, `None` if it was never written
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails while reading
    fn read(&self, id: &OrderId, kind: ArtifactKind) -> Result<Option<Vec<u8>>>;

    /// Identifiers that have an artifact of `kind`, in [`OrderId`] order
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be listed
    fn ids(&self, kind: ArtifactKind) -> Result<Vec<OrderId>>;
}

//! Order recording
//!
//! [`OrderRecorder::record`] validates an order, assigns it an identifier,
//! renders its receipt and commits the receipt and the JSON record to the
//! store in one step. The receipt is committed before the record, so a
//! visible record always has its receipt next to it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::OrdersConfig;
use crate::order::{IdGenerator, Order, OrderId, ValidationPolicy};
use crate::receipt::ReceiptRenderer;
use crate::storage::{Artifact, ArtifactKind, FsOrderStore, OrderStore};
use crate::{Error, Result};

/// Message returned to the caller once an order is saved
pub const ORDER_SAVED: &str = "Order saved successfully.";

/// Outcome of a successful [`OrderRecorder::record`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Identifier shared by both artifacts
    pub id: OrderId,
    /// Location of the JSON record
    pub record: PathBuf,
    /// Location of the HTML receipt
    pub receipt: PathBuf,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ORDER_SAVED)
    }
}

/// Persists completed orders and their receipts
#[derive(Clone)]
pub struct OrderRecorder {
    store: Arc<dyn OrderStore>,
    ids: Arc<dyn IdGenerator>,
    renderer: ReceiptRenderer,
    validation: ValidationPolicy,
}

impl fmt::Debug for OrderRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderRecorder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl OrderRecorder {
    /// Create a recorder over a store and an id source
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            renderer: ReceiptRenderer::new(),
            validation: ValidationPolicy::default(),
        }
    }

    /// Recorder writing flat files as described by `config`
    #[must_use]
    pub fn from_config(config: &OrdersConfig) -> Self {
        Self::new(
            Arc::new(FsOrderStore::new(&config.dir)),
            config.id_strategy.generator(),
        )
        .with_validation(config.validation)
    }

    /// Set the policy applied to empty fields
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Record a completed order
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] when the strict policy rejects the
    /// order, or the store's error if either artifact cannot be persisted
    pub fn record(&self, order: Order) -> Result<Confirmation> {
        let validated = self.validation.validate(order)?;
        let id = self.ids.next_id();

        tracing::info!(
            order_id = %id,
            drink = validated.order().drink_type(),
            size = validated.order().size(),
            customer = validated.order().name(),
            "saving order"
        );

        let record = serde_json::to_vec_pretty(validated.order())?;
        let receipt = self.renderer.render_html(&validated);

        let paths = self.store.commit(
            &id,
            &[
                Artifact::new(ArtifactKind::Receipt, receipt.as_bytes()),
                Artifact::new(ArtifactKind::Record, &record),
            ],
        )?;

        let [receipt, record]: [PathBuf; 2] = paths.try_into().map_err(|paths: Vec<PathBuf>| {
            Error::Storage(format!("expected 2 committed artifacts, store reported {}", paths.len()))
        })?;

        tracing::info!(
            order_id = %id,
            record = %record.display(),
            receipt = %receipt.display(),
            "order saved"
        );

        Ok(Confirmation {
            id,
            record,
            receipt,
        })
    }

    /// Read a recorded order back
    ///
    /// # Errors
    ///
    /// Returns error if the record cannot be read or is not a valid order
    pub fn load(&self, id: &OrderId) -> Result<Option<Order>> {
        self.store
            .read(id, ArtifactKind::Record)?
            .map(|bytes| serde_json::from_slice(&bytes).map_err(Error::from))
            .transpose()
    }

    /// Identifiers of all recorded orders, sorted
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be listed
    pub fn list(&self) -> Result<Vec<OrderId>> {
        self.store.ids(ArtifactKind::Record)
    }
}

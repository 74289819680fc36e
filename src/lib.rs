//! Barista Gateway - order-taking core for a voice barista
//!
//! A conversational pipeline (speech-to-text, language model, text-to-speech)
//! collects a drink order through dialogue and then calls the
//! `submit_order` tool. This library is what sits behind that tool:
//! - Order model with resolved cup size and decoration
//! - Recording of the canonical JSON record
//! - HTML receipt rendering
//! - Pluggable artifact storage and identifier strategies
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        Conversational pipeline (external)     │
//! │      STT  │  LLM  │  TTS  │  turn detection   │
//! └──────────────────────┬───────────────────────┘
//!                        │ submit_order
//! ┌──────────────────────▼───────────────────────┐
//! │  OrderTools ──▶ OrderRecorder ──▶ OrderStore  │
//! │                      │                        │
//! │                      ▼                        │
//! │               ReceiptRenderer                 │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod order;
pub mod prompt;
pub mod receipt;
pub mod recorder;
pub mod storage;
pub mod tools;

pub use config::{Config, OrdersConfig};
pub use error::{Error, Result};
pub use order::{
    CupDimensions, CupSize, Decoration, IdGenerator, IdStrategy, Order, OrderId, ValidatedOrder,
    ValidationPolicy,
};
pub use receipt::ReceiptRenderer;
pub use recorder::{Confirmation, OrderRecorder};
pub use storage::{ArtifactKind, FsOrderStore, MemoryOrderStore, OrderStore};
pub use tools::{FunctionDefinition, OrderTools, ToolDefinition};

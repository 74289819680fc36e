//! Configuration management for the barista gateway
//!
//! Values resolve as env > TOML file > default.

pub mod file;

use std::path::PathBuf;

use crate::Result;
use crate::order::{IdStrategy, ValidationPolicy};

/// Default directory for order artifacts, relative to the working directory
pub const DEFAULT_ORDERS_DIR: &str = "orders";

/// Barista gateway configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Order persistence configuration
    pub orders: OrdersConfig,
}

/// Where and how orders are persisted
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Directory receiving `order_<id>.json` / `order_<id>.html`
    pub dir: PathBuf,

    /// Identifier strategy
    pub id_strategy: IdStrategy,

    /// Empty-field policy
    pub validation: ValidationPolicy,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_ORDERS_DIR),
            id_strategy: IdStrategy::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if an environment override holds an invalid value
    pub fn load() -> Result<Self> {
        Self::resolve(file::load_config_file(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with environment overrides
    ///
    /// `env` looks up a variable by name.
    ///
    /// # Errors
    ///
    /// Returns error if an environment override holds an invalid value
    pub fn resolve(
        fc: file::BaristaConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let defaults = OrdersConfig::default();

        let dir = env("BARISTA_ORDERS_DIR")
            .map(PathBuf::from)
            .or(fc.orders.dir)
            .unwrap_or(defaults.dir);

        let id_strategy = match env("BARISTA_ORDER_IDS") {
            Some(value) => value.parse()?,
            None => fc.orders.id_strategy.unwrap_or(defaults.id_strategy),
        };

        let validation = match env("BARISTA_ORDER_VALIDATION") {
            Some(value) => value.parse()?,
            None => fc.orders.validation.unwrap_or(defaults.validation),
        };

        tracing::debug!(
            dir = %dir.display(),
            %id_strategy,
            %validation,
            "resolved order configuration"
        );

        Ok(Self {
            orders: OrdersConfig {
                dir,
                id_strategy,
                validation,
            },
        })
    }
}

//! Order model and presentation tags
//!
//! An [`Order`] is the raw payload collected by the conversational agent.
//! Before it is persisted it is turned into a [`ValidatedOrder`], which
//! resolves the free-text size into a [`CupSize`] and the extras into a
//! [`Decoration`] once, so the receipt never has to inspect raw strings.

pub mod id;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use id::{IdGenerator, IdStrategy, OrderId, RandomIds, SequencedTimestamps, UnixTimestamps};

/// A completed drink order
///
/// Field order is the canonical JSON key order of persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "drinkType")]
    drink_type: String,
    size: String,
    milk: String,
    #[serde(default)]
    extras: Vec<String>,
    name: String,
}

impl Order {
    /// Create an order from the five collected fields
    #[must_use]
    pub fn new(
        drink_type: impl Into<String>,
        size: impl Into<String>,
        milk: impl Into<String>,
        extras: Vec<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            drink_type: drink_type.into(),
            size: size.into(),
            milk: milk.into(),
            extras,
            name: name.into(),
        }
    }

    /// Drink type as spoken by the customer (e.g. "Latte")
    #[must_use]
    pub fn drink_type(&self) -> &str {
        &self.drink_type
    }

    /// Raw size label
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Milk choice
    #[must_use]
    pub fn milk(&self) -> &str {
        &self.milk
    }

    /// Extras in the order they were requested
    #[must_use]
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Customer name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the required text fields that are empty or whitespace
    ///
    /// `extras` is never reported; an empty list is a valid answer.
    #[must_use]
    pub fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("drinkType", &self.drink_type),
            ("size", &self.size),
            ("milk", &self.milk),
            ("name", &self.name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Cup size bucket used for the receipt drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CupSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Cup dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CupDimensions {
    pub height: u32,
    pub width: u32,
}

impl CupSize {
    /// Resolve a spoken size label
    ///
    /// Only "small" and "large" are recognised (case-insensitive); anything
    /// else, including an empty label, is a medium cup.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("small") {
            Self::Small
        } else if label.eq_ignore_ascii_case("large") {
            Self::Large
        } else {
            Self::Medium
        }
    }

    /// Fixed drawing dimensions for this bucket
    #[must_use]
    pub const fn dimensions(self) -> CupDimensions {
        match self {
            Self::Small => CupDimensions {
                height: 150,
                width: 100,
            },
            Self::Medium => CupDimensions {
                height: 200,
                width: 120,
            },
            Self::Large => CupDimensions {
                height: 250,
                width: 140,
            },
        }
    }
}

/// Decorative topping drawn above the cup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoration {
    #[default]
    Plain,
    WhippedCream,
}

impl Decoration {
    /// Pick the decoration for a list of extras
    ///
    /// Any extra mentioning "whipped" or "cream" earns whipped cream.
    #[must_use]
    pub fn for_extras(extras: &[String]) -> Self {
        let topped = extras.iter().any(|extra| {
            let extra = extra.to_lowercase();
            extra.contains("whipped") || extra.contains("cream")
        });

        if topped {
            Self::WhippedCream
        } else {
            Self::Plain
        }
    }
}

/// An order with its presentation tags resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    order: Order,
    cup: CupSize,
    decoration: Decoration,
}

impl ValidatedOrder {
    #[must_use]
    pub const fn order(&self) -> &Order {
        &self.order
    }

    #[must_use]
    pub const fn cup(&self) -> CupSize {
        self.cup
    }

    #[must_use]
    pub const fn decoration(&self) -> Decoration {
        self.decoration
    }

    #[must_use]
    pub fn into_order(self) -> Order {
        self.order
    }
}

impl From<Order> for ValidatedOrder {
    fn from(order: Order) -> Self {
        let cup = CupSize::from_label(&order.size);
        let decoration = Decoration::for_extras(&order.extras);
        Self {
            order,
            cup,
            decoration,
        }
    }
}

/// How empty fields are treated before an order is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Persist empty fields as given, with a warning
    #[default]
    Permissive,
    /// Reject orders with any empty required field
    Strict,
}

impl ValidationPolicy {
    /// Validate an order and resolve its presentation tags
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] under the strict policy when any
    /// required field is empty
    pub fn validate(self, order: Order) -> Result<ValidatedOrder> {
        let missing = order.empty_fields();
        if !missing.is_empty() {
            match self {
                Self::Strict => return Err(Error::MissingFields(missing)),
                Self::Permissive => {
                    tracing::warn!(fields = ?missing, "order has empty fields, persisting as given");
                }
            }
        }

        Ok(ValidatedOrder::from(order))
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for ValidationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(Error::Config(format!("unknown validation policy: {other}"))),
        }
    }
}

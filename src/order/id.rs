//! Order identifiers
//!
//! Every order gets one identifier shared by its JSON record and its HTML
//! receipt. The default strategy is the unix timestamp in seconds, which
//! collides when two orders land in the same second; the later pair then
//! replaces the earlier one. [`SequencedTimestamps`] and [`RandomIds`] avoid
//! that within a single process.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Filename prefix shared by all order artifacts
const FILE_PREFIX: &str = "order_";

/// Identifier shared by an order's artifacts
///
/// Timestamp ids (`<secs>` and `<secs>-<n>`) order by issue time; any other
/// id sorts after them, lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Artifact filename stem, e.g. `order_1700000000`
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!("{FILE_PREFIX}{}", self.0)
    }

    /// Recover an identifier from an artifact filename stem
    #[must_use]
    pub fn from_file_stem(stem: &str) -> Option<Self> {
        stem.strip_prefix(FILE_PREFIX)
            .filter(|id| !id.is_empty())
            .map(Self::new)
    }

    /// `(seconds, sequence)` for ids issued by the timestamp generators
    fn issue_key(&self) -> Option<(i64, u32)> {
        let (secs, seq) = match self.0.split_once('-') {
            Some((secs, seq)) => (secs, seq.parse().ok()?),
            None => (self.0.as_str(), 0),
        };
        if !secs.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((secs.parse().ok()?, seq))
    }
}

impl Ord for OrderId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.issue_key(), other.issue_key()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for OrderId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh order identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce the identifier for the next order
    fn next_id(&self) -> OrderId;
}

/// Clock returning unix seconds
type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

fn system_clock() -> Clock {
    Arc::new(|| chrono::Utc::now().timestamp())
}

/// Unix timestamp in seconds at call time
#[derive(Clone)]
pub struct UnixTimestamps {
    clock: Clock,
}

impl UnixTimestamps {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: system_clock(),
        }
    }

    /// Use a custom clock (tests pin it to a fixed second)
    #[must_use]
    pub fn with_clock(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }
}

impl Default for UnixTimestamps {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UnixTimestamps {
    fn next_id(&self) -> OrderId {
        OrderId((self.clock)().to_string())
    }
}

/// Unix timestamp with a `-<n>` suffix when a second repeats
///
/// The first order in a second keeps the plain timestamp, so artifact names
/// match [`UnixTimestamps`] until a collision would happen.
pub struct SequencedTimestamps {
    clock: Clock,
    last: Mutex<(i64, u32)>,
}

impl SequencedTimestamps {
    #[must_use]
    pub fn new() -> Self {
        Self::from_clock(system_clock())
    }

    #[must_use]
    pub fn with_clock(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        Self::from_clock(Arc::new(clock))
    }

    fn from_clock(clock: Clock) -> Self {
        Self {
            clock,
            last: Mutex::new((i64::MIN, 0)),
        }
    }
}

impl Default for SequencedTimestamps {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequencedTimestamps {
    fn next_id(&self) -> OrderId {
        let now = (self.clock)();
        // The guarded pair is always consistent, so a poisoned lock is still usable
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);

        if last.0 == now {
            last.1 += 1;
            OrderId(format!("{now}-{}", last.1))
        } else {
            *last = (now, 0);
            OrderId(now.to_string())
        }
    }
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> OrderId {
        OrderId(uuid::Uuid::new_v4().to_string())
    }
}

/// Configurable identifier strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Unix seconds; same-second orders overwrite each other
    #[default]
    Timestamp,
    /// Unix seconds with a per-process collision suffix
    Sequenced,
    /// Random UUID
    Uuid,
}

impl IdStrategy {
    /// Build the generator for this strategy
    #[must_use]
    pub fn generator(self) -> Arc<dyn IdGenerator> {
        match self {
            Self::Timestamp => Arc::new(UnixTimestamps::new()),
            Self::Sequenced => Arc::new(SequencedTimestamps::new()),
            Self::Uuid => Arc::new(RandomIds),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp => write!(f, "timestamp"),
            Self::Sequenced => write!(f, "sequenced"),
            Self::Uuid => write!(f, "uuid"),
        }
    }
}

impl std::str::FromStr for IdStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "timestamp" => Ok(Self::Timestamp),
            "sequenced" => Ok(Self::Sequenced),
            "uuid" => Ok(Self::Uuid),
            other => Err(Error::Config(format!("unknown order id strategy: {other}"))),
        }
    }
}

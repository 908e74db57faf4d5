//! Epoch counter for identity-set generations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation number of the trusted identity snapshot.
///
/// Starts at [`Epoch::GENESIS`] and only ever moves forward by one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Epoch(u64);

impl Epoch {
    pub const GENESIS: Self = Self(0);

    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The epoch that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Epoch {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

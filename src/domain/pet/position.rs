use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, DomainResult};

// ============================================================================
// Position - 1-based slot of a pet inside its volunteer's ordering
// ============================================================================

/// Strictly positive, immutable. Arithmetic yields new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Position(u32);

impl Position {
    pub const FIRST: Position = Position(1);

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < 1 {
            return Err(DomainError::invalid("position"));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::invalid("position"))
    }

    /// Position of the `count`-th element, i.e. `count` itself
    pub fn from_count(count: usize) -> DomainResult<Self> {
        let value = i64::try_from(count).map_err(|_| DomainError::invalid("position"))?;
        Self::new(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn forward(&self) -> DomainResult<Self> {
        Self::new(i64::from(self.0) + 1)
    }

    pub fn back(&self) -> DomainResult<Self> {
        Self::new(i64::from(self.0) - 1)
    }
}

impl TryFrom<i64> for Position {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Position> for u32 {
    fn from(position: Position) -> u32 {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

//! IDs for referring to objects in the application database.

use std::fmt::Display;

/// The ID of a sale record in the application database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SaleID(i64);

impl SaleID {
    /// Create a new sale ID.
    ///
    /// Callers are responsible for ensuring that the ID refers to a sale that
    /// exists in the database.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the ID as an integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for SaleID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

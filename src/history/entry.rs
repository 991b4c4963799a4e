//! A single completed calculation.

use serde::{Deserialize, Serialize};

/// Record of one `=` press, as shown in the history view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier for this entry.
    pub id: String,
    /// Human-readable `"a op b ="` text.
    pub expression: String,
    /// The result as it appeared on the display.
    pub result: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Create an entry stamped with a fresh id and the current time.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            expression: expression.into(),
            result: result.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl From<crate::calculator::Calculation> for HistoryEntry {
    fn from(calc: crate::calculator::Calculation) -> Self {
        Self::new(calc.expression, calc.result)
    }
}

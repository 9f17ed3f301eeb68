use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// fixed gap between installments, in days (not a calendar month)
pub const INSTALLMENT_INTERVAL_DAYS: u32 = 30;

/// window ahead of a due date in which an installment counts as due soon
pub const DUE_SOON_WINDOW_DAYS: u32 = 7;

/// ledger configuration
///
/// The cadence is fixed by design at 30 days; the config exists so the
/// interval and warning window are named values rather than magic numbers,
/// and so tests can shrink them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub installment_interval_days: u32,
    pub due_soon_window_days: u32,
}

impl LedgerConfig {
    /// standard configuration: 30-day installments, 7-day due-soon window
    pub fn standard() -> Self {
        Self {
            installment_interval_days: INSTALLMENT_INTERVAL_DAYS,
            due_soon_window_days: DUE_SOON_WINDOW_DAYS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.installment_interval_days == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "installment interval must be at least 1 day".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

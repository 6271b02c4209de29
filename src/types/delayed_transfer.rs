//! Delayed transfer records

use crate::types::address::Address;
use crate::types::coin::Coins;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An escrowed transfer waiting for its maturity time
///
/// `amount` already sits in the module custody account; the record is the
/// only evidence of the outstanding obligation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedTransfer {
    pub from: Address,
    pub to: Address,
    pub amount: Coins,
    /// Unix seconds at or after which the transfer is released
    pub matured_time: i64,
    /// Unique identity, assigned once at creation
    pub sequence: i64,
}

impl DelayedTransfer {
    pub fn new(from: Address, to: Address, amount: Coins, matured_time: i64, sequence: i64) -> Self {
        Self {
            from,
            to,
            amount,
            matured_time,
            sequence,
        }
    }

    /// Whether the transfer is due at block time `now` (unix seconds)
    pub fn is_matured(&self, now: i64) -> bool {
        self.matured_time <= now
    }

    pub fn matured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.matured_time, 0)
    }
}

impl fmt::Display for DelayedTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matured = self
            .matured_at()
            .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            .unwrap_or_else(|| self.matured_time.to_string());

        writeln!(f, "DelayedTransfer:")?;
        writeln!(f, "  From:        {}", self.from)?;
        writeln!(f, "  To:          {}", self.to)?;
        writeln!(f, "  Amount:      {}", self.amount)?;
        writeln!(f, "  Matured:     {}", matured)?;
        write!(f, "  Sequence:    {}", self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity() {
        let transfer = DelayedTransfer::new(
            Address::derive(b"from"),
            Address::derive(b"to"),
            Coins::single("btc", 100),
            1_700_003_600,
            0,
        );

        assert!(!transfer.is_matured(1_700_003_599));
        assert!(transfer.is_matured(1_700_003_600));
        assert!(transfer.is_matured(1_700_003_601));
        assert!(transfer.to_string().contains("2023-11-14T23:13:20.000Z"));
    }
}

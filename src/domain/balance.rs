//! Account balance snapshot returned by a connector.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total balance per asset at the time of the fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSnapshot {
    pub totals: BTreeMap<String, Decimal>,
}

impl BalanceSnapshot {
    pub fn new(totals: BTreeMap<String, Decimal>) -> Self {
        Self { totals }
    }

    /// Assets holding a non-zero balance.
    #[must_use]
    pub fn non_zero(&self) -> Self {
        Self {
            totals: self
                .totals
                .iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(asset, amount)| (asset.clone(), *amount))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

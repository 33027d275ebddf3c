use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockpilot_core::AggregateId;

/// Currency identifier (reference to the external currency register).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyId(pub AggregateId);

impl CurrencyId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Exchange-rate lookup capability.
///
/// The caller satisfies this from whatever rate source it owns (database,
/// remote feed, a snapshot captured for a historical report). Rates are
/// directed: `rate(a, b)` and `rate(b, a)` are independent entries.
pub trait RateLookup {
    fn rate(&self, from: CurrencyId, to: CurrencyId) -> Option<Decimal>;
}

/// In-memory rate table keyed by directed currency pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: HashMap<(CurrencyId, CurrencyId), Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: CurrencyId, to: CurrencyId, rate: Decimal) -> Self {
        self.insert(from, to, rate);
        self
    }

    pub fn insert(&mut self, from: CurrencyId, to: CurrencyId, rate: Decimal) {
        self.rates.insert((from, to), rate);
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateLookup for RateTable {
    fn rate(&self, from: CurrencyId, to: CurrencyId) -> Option<Decimal> {
        self.rates.get(&(from, to)).copied()
    }
}

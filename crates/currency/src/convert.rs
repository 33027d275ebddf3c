use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

use stockpilot_core::ValueObject;

use crate::rates::{CurrencyId, RateLookup};

/// An amount in a specific currency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: CurrencyId,
}

impl Money {
    pub fn new(amount: Decimal, currency: CurrencyId) -> Self {
        Self { amount, currency }
    }

    /// Re-express this amount in `to`, using the supplied rate lookup.
    pub fn normalized_to(self, to: CurrencyId, rates: &impl RateLookup) -> Money {
        Money {
            amount: convert(self.amount, self.currency, to, rates),
            currency: to,
        }
    }
}

impl ValueObject for Money {}

/// Convert `amount` from one currency to another.
///
/// - Identity conversion (`from == to`) returns `amount` unchanged, whether or
///   not the table holds a self-rate.
/// - A missing directed rate degrades to a factor of 1 so reporting keeps
///   working instead of blocking; the totals are then approximate, which is
///   why the degradation is logged.
///
/// No side effects, no rounding: full precision is kept until display time.
pub fn convert(
    amount: Decimal,
    from: CurrencyId,
    to: CurrencyId,
    rates: &impl RateLookup,
) -> Decimal {
    if from == to {
        return amount;
    }

    match rates.rate(from, to) {
        Some(rate) => amount * rate,
        None => {
            warn!(%from, %to, "no exchange rate for pair, defaulting to 1");
            amount
        }
    }
}

/// Round a monetary amount for display/export.
///
/// Two decimal places, midpoint away from zero. Aggregation always runs on
/// unrounded values; this is strictly a presentation step.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use stockpilot_core::AggregateId;

    fn currency() -> CurrencyId {
        CurrencyId::new(AggregateId::new())
    }

    #[test]
    fn directed_rate_is_applied() {
        let a = currency();
        let b = currency();
        let table = RateTable::new().with_rate(a, b, dec!(2.5));

        assert_eq!(convert(dec!(100), a, b, &table), dec!(250.0));
    }

    #[test]
    fn identity_conversion_ignores_table_contents() {
        let a = currency();
        // A bogus self-rate must not be consulted.
        let table = RateTable::new().with_rate(a, a, dec!(42));

        assert_eq!(convert(dec!(17.35), a, a, &table), dec!(17.35));
    }

    #[test]
    fn missing_rate_defaults_to_one() {
        let a = currency();
        let b = currency();

        assert_eq!(convert(dec!(99.99), a, b, &RateTable::new()), dec!(99.99));
    }

    #[test]
    fn money_normalizes_into_target_currency() {
        let a = currency();
        let b = currency();
        let table = RateTable::new().with_rate(a, b, dec!(0.5));

        let normalized = Money::new(dec!(80), a).normalized_to(b, &table);
        assert_eq!(normalized, Money::new(dec!(40.0), b));
    }

    #[test]
    fn display_rounding_is_two_decimals_midpoint_away_from_zero() {
        assert_eq!(round_for_display(dec!(1.005)), dec!(1.01));
        assert_eq!(round_for_display(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_for_display(dec!(2.4)), dec!(2.40));
    }

    proptest! {
        /// Identity law: converting within the same currency is a no-op for
        /// any amount and any rate table.
        #[test]
        fn identity_conversion_law(units in -1_000_000i64..1_000_000i64, cents in 0u32..100) {
            let amount = Decimal::new(units, 0) + Decimal::new(cents as i64, 2);
            let c = currency();
            let other = currency();
            let table = RateTable::new().with_rate(c, other, dec!(3.7));

            prop_assert_eq!(convert(amount, c, c, &table), amount);
        }
    }
}

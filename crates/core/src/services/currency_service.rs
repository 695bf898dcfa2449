use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::currency::{CurrencyCode, ExchangeRateTable, Money};

/// Converts amounts between currencies using a caller-supplied rate table.
///
/// The table is a read-only snapshot passed in on every call; this service
/// keeps no rates of its own. Every path goes through the table's base currency:
/// - Base → X: `amount × rate[X]`
/// - X → Base: `amount / rate[X]`
/// - X → Y: `(amount / rate[X]) × rate[Y]`
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `amount` from `from` to `to`.
    /// E.g., convert(100, "USD", "CZK", table with CZK = 25) → 2500
    pub fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
        table: &ExchangeRateTable,
    ) -> Result<Decimal, CoreError> {
        log::debug!("Converting {amount} {from} -> {to} (base {})", table.base());

        table.convert(amount, from, to).map_err(|e| {
            log::warn!("Currency conversion {from} -> {to} failed: {e}");
            e
        })
    }

    /// Same as [`CurrencyService::convert`], taking raw currency codes from the edge.
    pub fn convert_codes(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        table: &ExchangeRateTable,
    ) -> Result<Decimal, CoreError> {
        let from = CurrencyCode::new(from)?;
        let to = CurrencyCode::new(to)?;
        self.convert(amount, &from, &to, table)
    }

    /// Convert a tagged amount into `target`.
    pub fn convert_money(
        &self,
        money: &Money,
        target: &CurrencyCode,
        table: &ExchangeRateTable,
    ) -> Result<Money, CoreError> {
        let amount = self.convert(money.amount, &money.currency, target, table)?;
        Ok(Money::new(amount, target.clone()))
    }

    /// Sum amounts in mixed currencies into a single `target` amount.
    /// Fails on the first amount whose currency the table does not know.
    pub fn sum_in(
        &self,
        amounts: &[Money],
        target: &CurrencyCode,
        table: &ExchangeRateTable,
    ) -> Result<Money, CoreError> {
        let mut total = Decimal::ZERO;
        for money in amounts {
            let converted = self.convert(money.amount, &money.currency, target, table)?;
            total = total.checked_add(converted).ok_or_else(|| {
                CoreError::CalculationOverflow(format!("summing amounts in {target}"))
            })?;
        }
        Ok(Money::new(total, target.clone()))
    }

    /// Effective rate from `from` to `to`: the value of 1 unit of `from` in `to`.
    pub fn cross_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        table: &ExchangeRateTable,
    ) -> Result<Decimal, CoreError> {
        self.convert(Decimal::ONE, from, to, table)
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}

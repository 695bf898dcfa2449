use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

/// ISO-like three-letter currency tag, always upper-cased (e.g., "USD", "EUR", "PLN").
///
/// Construction validates the code, so every `CurrencyCode` in circulation
/// is well-formed. Deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(pub(crate) String);

impl CurrencyCode {
    /// Parse a currency code. Surrounding whitespace is ignored and the
    /// code is upper-cased; anything other than 3 ASCII letters is rejected.
    pub fn new(code: &str) -> Result<Self, CoreError> {
        let trimmed = code.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A signed decimal amount tagged with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Immutable snapshot of exchange rates relative to a single base currency.
///
/// Each entry maps a currency to "units of that currency per 1 unit of base".
/// The base currency always resolves to exactly 1. A refresh replaces the
/// whole table; there is no way to mutate a table after construction.
/// Deserialization re-runs the same checks as [`ExchangeRateTable::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateTableData")]
pub struct ExchangeRateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, Decimal>,
    /// Date the rates were published, if the supplier reported one.
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct RateTableData {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, Decimal>,
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

impl TryFrom<RateTableData> for ExchangeRateTable {
    type Error = CoreError;

    fn try_from(data: RateTableData) -> Result<Self, Self::Error> {
        let table = Self::new(data.base, data.rates)?;
        Ok(Self {
            as_of: data.as_of,
            ..table
        })
    }
}

impl ExchangeRateTable {
    /// Build a table from a base currency and `(currency, rate)` pairs.
    ///
    /// Every rate must be strictly positive. An explicit entry for the base
    /// currency is accepted only if it equals 1.
    pub fn new(
        base: CurrencyCode,
        rates: impl IntoIterator<Item = (CurrencyCode, Decimal)>,
    ) -> Result<Self, CoreError> {
        let mut table = HashMap::new();
        for (code, rate) in rates {
            if rate <= Decimal::ZERO || (code == base && rate != Decimal::ONE) {
                return Err(CoreError::InvalidRate {
                    currency: code.to_string(),
                    rate,
                });
            }
            table.insert(code, rate);
        }
        table.insert(base.clone(), Decimal::ONE);

        Ok(Self {
            base,
            rates: table,
            as_of: None,
        })
    }

    /// Same as [`ExchangeRateTable::new`], taking plain string codes.
    pub fn from_pairs(base: &str, rates: &[(&str, Decimal)]) -> Result<Self, CoreError> {
        let base = CurrencyCode::new(base)?;
        let parsed = rates
            .iter()
            .map(|(code, rate)| Ok((CurrencyCode::new(code)?, *rate)))
            .collect::<Result<Vec<_>, CoreError>>()?;
        Self::new(base, parsed)
    }

    /// Attach the publication date of the rates.
    #[must_use]
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Rate for `code` expressed as units of `code` per 1 base unit.
    pub fn rate_for(&self, code: &CurrencyCode) -> Result<Decimal, CoreError> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| CoreError::UnknownCurrency(code.to_string()))
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }

    /// All currencies in the table (base included), sorted by code.
    pub fn currencies(&self) -> Vec<&CurrencyCode> {
        let mut codes: Vec<&CurrencyCode> = self.rates.keys().collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Convert `amount` from one currency to another through the base currency.
    ///
    /// Identity conversions return `amount` untouched. Non-base pairs are
    /// always routed `from -> base -> to`; no cross rates are stored.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, CoreError> {
        if from == to {
            return Ok(amount);
        }

        let overflow = || {
            CoreError::CalculationOverflow(format!("converting {amount} {from} to {to}"))
        };

        if *from == self.base {
            let rate = self.rate_for(to)?;
            return amount.checked_mul(rate).ok_or_else(overflow);
        }

        if *to == self.base {
            let rate = self.rate_for(from)?;
            return amount.checked_div(rate).ok_or_else(overflow);
        }

        // Look up both rates first so a missing target is reported even
        // when the first leg would have succeeded.
        let from_rate = self.rate_for(from)?;
        let to_rate = self.rate_for(to)?;
        let in_base = amount.checked_div(from_rate).ok_or_else(overflow)?;
        in_base.checked_mul(to_rate).ok_or_else(overflow)
    }
}

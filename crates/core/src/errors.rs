use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the entire finance-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── Currency ────────────────────────────────────────────────────
    #[error("Invalid currency code '{0}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)")]
    InvalidCurrencyCode(String),

    #[error("Unknown currency: {0} is not in the exchange rate table")]
    UnknownCurrency(String),

    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate { currency: String, rate: Decimal },

    // ── Interest zones ──────────────────────────────────────────────
    #[error("No interest zone matches balance {balance}")]
    NoMatchingZone { balance: Decimal },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("Invalid zone range: upper bound {to} must be greater than lower bound {from}")]
    InvalidRange { from: Decimal, to: Decimal },

    #[error("Only one zone may be unbounded")]
    MultipleUnboundedZones,

    #[error("Zone overlaps existing zone {}", format_zone_range(.from, .to))]
    ZoneOverlap { from: Decimal, to: Option<Decimal> },

    #[error("Zone index {index} out of range (zone set has {len} zones)")]
    ZoneIndexOutOfRange { index: usize, len: usize },

    // ── Amortization ────────────────────────────────────────────────
    #[error("Schedule of {requested} periods exceeds maximum of {max} periods")]
    PeriodLimitExceeded { requested: u32, max: u32 },

    #[error("Calculation overflow: {0}")]
    CalculationOverflow(String),

    // ── General ─────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

fn format_zone_range(from: &Decimal, to: &Option<Decimal>) -> String {
    match to {
        Some(to) => format!("[{from}, {to})"),
        None => format!("[{from}, ∞)"),
    }
}

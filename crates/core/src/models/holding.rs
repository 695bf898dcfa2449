use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;

/// The category of a held position. Used only for grouping allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Savings and current accounts, deposits
    Cash,
    /// Stocks / equities, ETFs
    Stock,
    /// Government and corporate bonds
    Bond,
    /// Cryptocurrencies
    Crypto,
    /// Precious metals
    Metal,
    /// Property
    RealEstate,
    /// Loans granted to others
    Loan,
    Other,
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Cash => write!(f, "Cash"),
            AssetClass::Stock => write!(f, "Stock"),
            AssetClass::Bond => write!(f, "Bond"),
            AssetClass::Crypto => write!(f, "Crypto"),
            AssetClass::Metal => write!(f, "Metal"),
            AssetClass::RealEstate => write!(f, "RealEstate"),
            AssetClass::Loan => write!(f, "Loan"),
            AssetClass::Other => write!(f, "Other"),
        }
    }
}

/// A position in one instrument: how much is held, what it cost, what it is worth.
///
/// Holdings are plain computation inputs. Cost and price are both expressed
/// in `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Display label, uppercased (e.g., "BTC", "AAPL", "PL0000500021")
    pub symbol: String,

    pub asset_class: AssetClass,

    /// Units held (never negative)
    pub quantity: Decimal,

    /// Average acquisition cost per unit
    pub average_cost: Decimal,

    /// Latest known market price per unit
    pub current_price: Decimal,

    pub currency: CurrencyCode,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        asset_class: AssetClass,
        quantity: Decimal,
        average_cost: Decimal,
        current_price: Decimal,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            asset_class,
            quantity,
            average_cost,
            current_price,
            currency,
        }
    }
}

/// Derived figures for a single holding. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoldingMetrics {
    /// quantity × average_cost
    pub total_cost: Decimal,

    /// quantity × current_price
    pub market_value: Decimal,

    /// market_value − total_cost
    pub gain_loss: Decimal,

    /// gain_loss / total_cost × 100, or 0 when total_cost is 0
    pub gain_loss_percent: Decimal,
}

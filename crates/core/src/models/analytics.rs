use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use super::holding::{AssetClass, Holding, HoldingMetrics};

/// Aggregate figures over a set of holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of all market values
    pub total_value: Decimal,

    /// Sum of all costs
    pub total_cost: Decimal,

    /// total_value − total_cost
    pub overall_gain_loss: Decimal,

    /// overall_gain_loss / total_cost × 100, or 0 when total_cost is 0
    pub overall_gain_loss_percent: Decimal,
}

/// Share of the portfolio held in one position or one asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Holding symbol, or the asset class name when grouped by class
    pub label: String,

    pub asset_class: AssetClass,

    pub market_value: Decimal,

    /// market_value / total portfolio value × 100
    pub allocation_pct: Decimal,
}

/// A holding together with its derived metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingSummary {
    pub holding: Holding,
    pub metrics: HoldingMetrics,
}

/// Everything the portfolio screen shows, in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Currency used for all monetary values
    pub currency: CurrencyCode,

    pub totals: PortfolioTotals,

    /// Holding with the best gain/loss percentage, if any
    pub top_performer: Option<HoldingSummary>,

    /// Holding with the highest market value, if any
    pub largest_holding: Option<HoldingSummary>,

    /// Per-holding allocation, in input order
    pub allocation: Vec<AllocationSlice>,

    /// Per-asset-class allocation, in order of first appearance
    pub allocation_by_class: Vec<AllocationSlice>,
}

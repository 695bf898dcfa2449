use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::analytics::{AllocationSlice, HoldingSummary, PortfolioSummary, PortfolioTotals};
use crate::models::currency::{CurrencyCode, ExchangeRateTable};
use crate::models::holding::{AssetClass, Holding, HoldingMetrics};
use crate::services::currency_service::CurrencyService;

/// Computes holding and portfolio analytics: cost, value, gain/loss, allocation.
///
/// The plain aggregation functions assume all holdings are already in one
/// currency. Use [`AnalyticsService::normalize_holdings`] or
/// [`AnalyticsService::portfolio_summary`] for mixed-currency input.
///
/// Every entry point rejects negative quantities and reports arithmetic
/// overflow as `CalculationOverflow`.
pub struct AnalyticsService {
    currency_service: CurrencyService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// Cost, value and gain/loss for a single holding.
    pub fn compute_holding_metrics(&self, holding: &Holding) -> Result<HoldingMetrics, CoreError> {
        Self::check_quantity(holding)?;
        let overflow = || CoreError::CalculationOverflow(format!("metrics of {}", holding.symbol));

        let total_cost = holding
            .quantity
            .checked_mul(holding.average_cost)
            .ok_or_else(overflow)?;
        let market_value = holding
            .quantity
            .checked_mul(holding.current_price)
            .ok_or_else(overflow)?;
        let gain_loss = market_value.checked_sub(total_cost).ok_or_else(overflow)?;

        Ok(HoldingMetrics {
            total_cost,
            market_value,
            gain_loss,
            gain_loss_percent: Self::percent_of(gain_loss, total_cost)?,
        })
    }

    /// Portfolio-wide totals.
    ///
    /// Costs and values are summed first and the gain/loss derived from the
    /// sums, so the percentage is weighted by cost. An empty slice gives zeros.
    pub fn compute_portfolio_totals(&self, holdings: &[Holding]) -> Result<PortfolioTotals, CoreError> {
        let mut total_value = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        for holding in holdings {
            let m = self.compute_holding_metrics(holding)?;
            total_value = Self::add(total_value, m.market_value, "total value")?;
            total_cost = Self::add(total_cost, m.total_cost, "total cost")?;
        }
        let overall_gain_loss = total_value
            .checked_sub(total_cost)
            .ok_or_else(|| CoreError::CalculationOverflow("overall gain/loss".into()))?;

        Ok(PortfolioTotals {
            total_value,
            total_cost,
            overall_gain_loss,
            overall_gain_loss_percent: Self::percent_of(overall_gain_loss, total_cost)?,
        })
    }

    /// Holding with the highest gain/loss percentage. Ties go to the earliest one.
    pub fn find_top_performer<'a>(
        &self,
        holdings: &'a [Holding],
    ) -> Result<Option<&'a Holding>, CoreError> {
        self.first_max_by(holdings, |m| m.gain_loss_percent)
    }

    /// Holding with the highest market value. Ties go to the earliest one.
    pub fn find_largest_holding<'a>(
        &self,
        holdings: &'a [Holding],
    ) -> Result<Option<&'a Holding>, CoreError> {
        self.first_max_by(holdings, |m| m.market_value)
    }

    /// Share of total market value held in each position, in input order.
    pub fn allocation(&self, holdings: &[Holding]) -> Result<Vec<AllocationSlice>, CoreError> {
        let values = holdings
            .iter()
            .map(|h| Ok(self.compute_holding_metrics(h)?.market_value))
            .collect::<Result<Vec<Decimal>, CoreError>>()?;
        let total = Self::sum(&values)?;

        holdings
            .iter()
            .zip(values)
            .map(|(h, value)| {
                Ok(AllocationSlice {
                    label: h.symbol.clone(),
                    asset_class: h.asset_class,
                    market_value: value,
                    allocation_pct: Self::percent_of(value, total)?,
                })
            })
            .collect()
    }

    /// Share of total market value per asset class, in order of first appearance.
    pub fn allocation_by_class(&self, holdings: &[Holding]) -> Result<Vec<AllocationSlice>, CoreError> {
        let mut groups: Vec<(AssetClass, Decimal)> = Vec::new();
        for holding in holdings {
            let value = self.compute_holding_metrics(holding)?.market_value;
            match groups.iter_mut().find(|(class, _)| *class == holding.asset_class) {
                Some((_, sum)) => *sum = Self::add(*sum, value, "class value")?,
                None => groups.push((holding.asset_class, value)),
            }
        }
        let values: Vec<Decimal> = groups.iter().map(|(_, v)| *v).collect();
        let total = Self::sum(&values)?;

        groups
            .into_iter()
            .map(|(class, value)| {
                Ok(AllocationSlice {
                    label: class.to_string(),
                    asset_class: class,
                    market_value: value,
                    allocation_pct: Self::percent_of(value, total)?,
                })
            })
            .collect()
    }

    /// Re-express every holding's cost and price in `target`.
    /// Fails if any holding's currency is missing from the table.
    pub fn normalize_holdings(
        &self,
        holdings: &[Holding],
        target: &CurrencyCode,
        table: &ExchangeRateTable,
    ) -> Result<Vec<Holding>, CoreError> {
        holdings
            .iter()
            .map(|h| {
                Self::check_quantity(h)?;
                Ok(Holding {
                    average_cost: self.currency_service.convert(
                        h.average_cost,
                        &h.currency,
                        target,
                        table,
                    )?,
                    current_price: self.currency_service.convert(
                        h.current_price,
                        &h.currency,
                        target,
                        table,
                    )?,
                    currency: target.clone(),
                    ..h.clone()
                })
            })
            .collect()
    }

    /// Totals, top performer, largest holding and allocation, all in `target`.
    pub fn portfolio_summary(
        &self,
        holdings: &[Holding],
        target: &CurrencyCode,
        table: &ExchangeRateTable,
    ) -> Result<PortfolioSummary, CoreError> {
        log::debug!("Summarizing {} holdings in {target}", holdings.len());

        let normalized = self.normalize_holdings(holdings, target, table)?;
        let summarize = |h: &Holding| -> Result<HoldingSummary, CoreError> {
            Ok(HoldingSummary {
                holding: h.clone(),
                metrics: self.compute_holding_metrics(h)?,
            })
        };

        Ok(PortfolioSummary {
            currency: target.clone(),
            totals: self.compute_portfolio_totals(&normalized)?,
            top_performer: self.find_top_performer(&normalized)?.map(summarize).transpose()?,
            largest_holding: self.find_largest_holding(&normalized)?.map(summarize).transpose()?,
            allocation: self.allocation(&normalized)?,
            allocation_by_class: self.allocation_by_class(&normalized)?,
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    /// `part / whole × 100`, or 0 when `whole` is not positive.
    fn percent_of(part: Decimal, whole: Decimal) -> Result<Decimal, CoreError> {
        if whole <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        part.checked_div(whole)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| CoreError::CalculationOverflow(format!("percentage {part} of {whole}")))
    }

    fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, CoreError> {
        a.checked_add(b)
            .ok_or_else(|| CoreError::CalculationOverflow(what.to_string()))
    }

    fn sum(values: &[Decimal]) -> Result<Decimal, CoreError> {
        values
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| Self::add(acc, *v, "portfolio value"))
    }

    fn first_max_by<'a>(
        &self,
        holdings: &'a [Holding],
        key: impl Fn(&HoldingMetrics) -> Decimal,
    ) -> Result<Option<&'a Holding>, CoreError> {
        let mut best: Option<(&Holding, Decimal)> = None;
        for holding in holdings {
            let value = key(&self.compute_holding_metrics(holding)?);
            // Strictly greater: the first of equal values stays.
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((holding, value));
            }
        }
        Ok(best.map(|(h, _)| h))
    }

    fn check_quantity(holding: &Holding) -> Result<(), CoreError> {
        if holding.quantity < Decimal::ZERO {
            return Err(CoreError::NegativeAmount {
                field: "quantity",
                value: holding.quantity,
            });
        }
        Ok(())
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

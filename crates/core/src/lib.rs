pub mod errors;
pub mod models;
pub mod services;

use models::{
    analytics::{AllocationSlice, PortfolioSummary, PortfolioTotals},
    currency::{CurrencyCode, ExchangeRateTable, Money},
    holding::{Holding, HoldingMetrics},
    loan::{AmortizationSchedule, LoanTerms},
    settings::Settings,
    zone::{InterestZone, ZoneDraft},
};
use rust_decimal::Decimal;
use services::{
    amortization_service::AmortizationService, analytics_service::AnalyticsService,
    currency_service::CurrencyService, zone_service::ZoneService,
};

use errors::CoreError;

/// Main entry point for the finance computation core.
///
/// Holds the settings and the four stateless services. Every method is a
/// pure function of its arguments and the settings; rate tables, zone lists
/// and holdings are passed in on each call and never retained.
#[must_use]
pub struct FinanceCore {
    settings: Settings,
    currency_service: CurrencyService,
    zone_service: ZoneService,
    amortization_service: AmortizationService,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for FinanceCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceCore")
            .field("settings", &self.settings)
            .finish()
    }
}

impl FinanceCore {
    /// Create a core with default settings (USD base, 1200-period schedule cap).
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let amortization_service = AmortizationService::with_max_periods(settings.max_schedule_periods);
        Self {
            settings,
            currency_service: CurrencyService::new(),
            zone_service: ZoneService::new(),
            amortization_service,
            analytics_service: AnalyticsService::new(),
        }
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the base (home) currency (e.g., "PLN", "USD", "EUR").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_base_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        self.settings.base_currency = CurrencyCode::new(currency)?;
        Ok(())
    }

    /// Replace the cap on schedule length.
    pub fn set_max_schedule_periods(&mut self, max_periods: u32) {
        self.settings.max_schedule_periods = max_periods;
        self.amortization_service = AmortizationService::with_max_periods(max_periods);
    }

    // ── Currency ────────────────────────────────────────────────────

    /// Build a rate table around the configured base currency.
    /// Each rate is "units of that currency per 1 base unit".
    pub fn rate_table(&self, rates: &[(&str, Decimal)]) -> Result<ExchangeRateTable, CoreError> {
        let parsed = rates
            .iter()
            .map(|(code, rate)| Ok((CurrencyCode::new(code)?, *rate)))
            .collect::<Result<Vec<_>, CoreError>>()?;
        ExchangeRateTable::new(self.settings.base_currency.clone(), parsed)
    }

    /// Convert an amount between two currencies of the table.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        table: &ExchangeRateTable,
    ) -> Result<Decimal, CoreError> {
        self.currency_service.convert_codes(amount, from, to, table)
    }

    /// Re-express a money value in `target`.
    pub fn convert_money(
        &self,
        money: &Money,
        target: &str,
        table: &ExchangeRateTable,
    ) -> Result<Money, CoreError> {
        let target = CurrencyCode::new(target)?;
        self.currency_service.convert_money(money, &target, table)
    }

    /// Sum money values of mixed currencies, expressed in `target`.
    pub fn sum_in(
        &self,
        amounts: &[Money],
        target: &str,
        table: &ExchangeRateTable,
    ) -> Result<Money, CoreError> {
        let target = CurrencyCode::new(target)?;
        self.currency_service.sum_in(amounts, &target, table)
    }

    /// Units of `to` per one unit of `from`.
    pub fn cross_rate(
        &self,
        from: &str,
        to: &str,
        table: &ExchangeRateTable,
    ) -> Result<Decimal, CoreError> {
        let from = CurrencyCode::new(from)?;
        let to = CurrencyCode::new(to)?;
        self.currency_service.cross_rate(&from, &to, table)
    }

    // ── Interest Zones ──────────────────────────────────────────────

    /// The rate of the zone that contains `balance`.
    pub fn resolve_effective_rate(
        &self,
        balance: Decimal,
        zones: &[InterestZone],
    ) -> Result<Decimal, CoreError> {
        self.zone_service.resolve_effective_rate(balance, zones)
    }

    /// The zone rate for `balance`, or the account's flat rate when no zone applies.
    #[must_use]
    pub fn effective_rate_or(
        &self,
        balance: Decimal,
        zones: &[InterestZone],
        flat_rate: Decimal,
    ) -> Decimal {
        self.zone_service.effective_rate_or(balance, zones, flat_rate)
    }

    /// One year of interest on `balance` at its effective zone rate.
    pub fn annual_interest(
        &self,
        balance: Decimal,
        zones: &[InterestZone],
    ) -> Result<Decimal, CoreError> {
        self.zone_service.annual_interest(balance, zones)
    }

    /// Validate a zone about to be added (`editing_index = None`) or edited.
    pub fn validate_zone(
        &self,
        existing: &[InterestZone],
        candidate: &ZoneDraft,
        editing_index: Option<usize>,
    ) -> Result<InterestZone, CoreError> {
        self.zone_service.validate_zone(existing, candidate, editing_index)
    }

    /// Validate a complete stored zone set.
    pub fn validate_zone_set(&self, zones: &[InterestZone]) -> Result<(), CoreError> {
        self.zone_service.validate_zone_set(zones)
    }

    // ── Loans ───────────────────────────────────────────────────────

    /// Fixed installment of an annuity loan.
    pub fn compute_payment(&self, terms: &LoanTerms) -> Result<Decimal, CoreError> {
        self.amortization_service.compute_payment(terms)
    }

    /// Full amortization schedule of an annuity loan.
    pub fn generate_schedule(&self, terms: &LoanTerms) -> Result<AmortizationSchedule, CoreError> {
        self.amortization_service.generate_schedule(terms)
    }

    /// Export a schedule as a JSON string.
    ///
    /// Monetary fields are written as decimal strings (`"83.333333333333333333333333333"`)
    /// so no precision is lost to a float. Period, year and month stay numbers;
    /// `due_date` is an ISO date or `null`.
    pub fn export_schedule_to_json(
        &self,
        schedule: &AmortizationSchedule,
    ) -> Result<String, CoreError> {
        let rows: Vec<serde_json::Value> = schedule
            .rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "period_number": row.period_number,
                    "year": row.year,
                    "month": row.month,
                    "due_date": row.due_date.map(|d| d.to_string()),
                    "payment": row.payment.to_string(),
                    "principal_payment": row.principal_payment.to_string(),
                    "interest_payment": row.interest_payment.to_string(),
                    "remaining_balance": row.remaining_balance.to_string(),
                })
            })
            .collect();
        let document = serde_json::json!({
            "payment": schedule.payment.to_string(),
            "total_payments": schedule.total_payments.to_string(),
            "total_interest": schedule.total_interest.to_string(),
            "rows": rows,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Export schedule rows as a CSV string.
    /// Columns: period, year, month, due_date, payment, principal, interest, remaining_balance
    #[must_use]
    pub fn export_schedule_to_csv(&self, schedule: &AmortizationSchedule) -> String {
        let mut csv =
            String::from("period,year,month,due_date,payment,principal,interest,remaining_balance\n");
        for row in &schedule.rows {
            let due_date = row.due_date.map(|d| d.to_string()).unwrap_or_default();
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                row.period_number,
                row.year,
                row.month,
                due_date,
                row.payment,
                row.principal_payment,
                row.interest_payment,
                row.remaining_balance,
            ));
        }
        csv
    }

    // ── Holdings & Portfolio ────────────────────────────────────────

    pub fn holding_metrics(&self, holding: &Holding) -> Result<HoldingMetrics, CoreError> {
        self.analytics_service.compute_holding_metrics(holding)
    }

    /// Totals over holdings already expressed in a single currency.
    pub fn portfolio_totals(&self, holdings: &[Holding]) -> Result<PortfolioTotals, CoreError> {
        self.analytics_service.compute_portfolio_totals(holdings)
    }

    pub fn top_performer<'a>(
        &self,
        holdings: &'a [Holding],
    ) -> Result<Option<&'a Holding>, CoreError> {
        self.analytics_service.find_top_performer(holdings)
    }

    pub fn largest_holding<'a>(
        &self,
        holdings: &'a [Holding],
    ) -> Result<Option<&'a Holding>, CoreError> {
        self.analytics_service.find_largest_holding(holdings)
    }

    pub fn allocation(&self, holdings: &[Holding]) -> Result<Vec<AllocationSlice>, CoreError> {
        self.analytics_service.allocation(holdings)
    }

    pub fn allocation_by_class(
        &self,
        holdings: &[Holding],
    ) -> Result<Vec<AllocationSlice>, CoreError> {
        self.analytics_service.allocation_by_class(holdings)
    }

    /// Holdings with cost and price re-expressed in `currency`.
    pub fn normalize_holdings(
        &self,
        holdings: &[Holding],
        currency: &str,
        table: &ExchangeRateTable,
    ) -> Result<Vec<Holding>, CoreError> {
        let target = CurrencyCode::new(currency)?;
        self.analytics_service.normalize_holdings(holdings, &target, table)
    }

    /// Full portfolio summary in the base currency, converting mixed-currency holdings.
    pub fn portfolio_summary(
        &self,
        holdings: &[Holding],
        table: &ExchangeRateTable,
    ) -> Result<PortfolioSummary, CoreError> {
        self.analytics_service
            .portfolio_summary(holdings, &self.settings.base_currency, table)
    }

    /// Full portfolio summary in an arbitrary currency of the table.
    pub fn portfolio_summary_in(
        &self,
        holdings: &[Holding],
        currency: &str,
        table: &ExchangeRateTable,
    ) -> Result<PortfolioSummary, CoreError> {
        let target = CurrencyCode::new(currency)?;
        self.analytics_service.portfolio_summary(holdings, &target, table)
    }
}

impl Default for FinanceCore {
    fn default() -> Self {
        Self::new()
    }
}

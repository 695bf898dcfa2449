use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};

use crate::errors::CoreError;
use crate::models::loan::{AmortizationRow, AmortizationSchedule, LoanTerms};
use crate::models::settings::DEFAULT_MAX_SCHEDULE_PERIODS;

/// Computes fixed annuity payments and full repayment schedules.
///
/// Every call is a pure function of the loan terms. Schedules are built
/// eagerly and capped at `max_periods` installments.
pub struct AmortizationService {
    max_periods: u32,
}

impl AmortizationService {
    pub fn new() -> Self {
        Self::with_max_periods(DEFAULT_MAX_SCHEDULE_PERIODS)
    }

    pub fn with_max_periods(max_periods: u32) -> Self {
        Self { max_periods }
    }

    pub fn max_periods(&self) -> u32 {
        self.max_periods
    }

    /// Fixed installment for the given terms.
    ///
    /// - Degenerate terms (no principal or no periods): 0, before any other check
    /// - Zero rate: `principal / n`
    /// - Otherwise: `P × r(1+r)^n / ((1+r)^n − 1)`
    pub fn compute_payment(&self, terms: &LoanTerms) -> Result<Decimal, CoreError> {
        if terms.is_degenerate() {
            return Ok(Decimal::ZERO);
        }
        self.check_terms(terms)?;

        let n = Decimal::from(terms.total_periods);
        let rate = terms.periodic_rate();
        if rate.is_zero() {
            return Ok(terms.principal / n);
        }

        let overflow = || {
            CoreError::CalculationOverflow(format!(
                "annuity factor for {} periods at {}%",
                terms.total_periods, terms.annual_rate_percent
            ))
        };

        let factor = (Decimal::ONE + rate)
            .checked_powu(u64::from(terms.total_periods))
            .ok_or_else(overflow)?;
        let numerator = terms
            .principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(factor))
            .ok_or_else(overflow)?;
        numerator
            .checked_div(factor - Decimal::ONE)
            .ok_or_else(overflow)
    }

    /// Full period-by-period repayment plan.
    pub fn generate_schedule(&self, terms: &LoanTerms) -> Result<AmortizationSchedule, CoreError> {
        log::debug!(
            "Generating schedule: principal {}, rate {}%, {} {} periods",
            terms.principal,
            terms.annual_rate_percent,
            terms.total_periods,
            terms.frequency
        );

        if terms.is_degenerate() {
            return Ok(AmortizationSchedule::empty());
        }
        let payment = self.compute_payment(terms)?;

        let rate = terms.periodic_rate();
        let months_per_period = terms.frequency.months_per_period();
        let mut remaining = terms.principal;
        let mut total_interest = Decimal::ZERO;
        let mut rows = Vec::with_capacity(terms.total_periods as usize);

        for period in 1..=terms.total_periods {
            let interest_payment = remaining * rate;
            let principal_payment = payment - interest_payment;
            remaining = (remaining - principal_payment).max(Decimal::ZERO);
            total_interest += interest_payment;

            let elapsed_months = period * months_per_period;
            rows.push(AmortizationRow {
                period_number: period,
                year: elapsed_months.div_ceil(12),
                month: (elapsed_months - 1) % 12 + 1,
                due_date: terms
                    .start_date
                    .and_then(|start| Self::due_date(start, elapsed_months)),
                payment,
                principal_payment,
                interest_payment,
                remaining_balance: remaining,
            });
        }

        let total_payments = payment
            .checked_mul(Decimal::from(terms.total_periods))
            .ok_or_else(|| CoreError::CalculationOverflow("total payments".into()))?;

        Ok(AmortizationSchedule {
            payment,
            total_payments,
            total_interest,
            rows,
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    fn check_terms(&self, terms: &LoanTerms) -> Result<(), CoreError> {
        if terms.annual_rate_percent < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "annual rate must not be negative (got {}%)",
                terms.annual_rate_percent
            )));
        }
        if terms.total_periods > self.max_periods {
            return Err(CoreError::PeriodLimitExceeded {
                requested: terms.total_periods,
                max: self.max_periods,
            });
        }
        Ok(())
    }

    fn due_date(start: NaiveDate, elapsed_months: u32) -> Option<NaiveDate> {
        start.checked_add_months(Months::new(elapsed_months))
    }
}

impl Default for AmortizationService {
    fn default() -> Self {
        Self::new()
    }
}

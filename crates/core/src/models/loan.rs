use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a loan installment falls due.
/// Only divisors of 12 are offered so every period spans whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Monthly,
    BiMonthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiMonthly => 6,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Annual => 1,
        }
    }

    pub fn months_per_period(self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl std::fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentFrequency::Monthly => write!(f, "Monthly"),
            PaymentFrequency::BiMonthly => write!(f, "BiMonthly"),
            PaymentFrequency::Quarterly => write!(f, "Quarterly"),
            PaymentFrequency::SemiAnnual => write!(f, "SemiAnnual"),
            PaymentFrequency::Annual => write!(f, "Annual"),
        }
    }
}

/// Raw parameters of a fixed-rate annuity loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Decimal,

    /// Nominal annual rate in percent (e.g., 6.5 for 6.5%)
    pub annual_rate_percent: Decimal,

    /// Number of installments over the life of the loan
    pub total_periods: u32,

    pub frequency: PaymentFrequency,

    /// Date the loan starts; the first installment is due one period later.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl LoanTerms {
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        total_periods: u32,
        frequency: PaymentFrequency,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            total_periods,
            frequency,
            start_date: None,
        }
    }

    /// Convenience constructor for a monthly loan over `years` years.
    pub fn monthly(principal: Decimal, annual_rate_percent: Decimal, years: u32) -> Self {
        Self::new(
            principal,
            annual_rate_percent,
            years.saturating_mul(12),
            PaymentFrequency::Monthly,
        )
    }

    #[must_use]
    pub fn starting_on(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Interest rate applied per period, as a fraction (not percent).
    pub fn periodic_rate(&self) -> Decimal {
        self.annual_rate_percent
            / Decimal::ONE_HUNDRED
            / Decimal::from(self.frequency.periods_per_year())
    }

    /// `principal <= 0` or no periods: there is nothing to repay.
    pub fn is_degenerate(&self) -> bool {
        self.principal <= Decimal::ZERO || self.total_periods == 0
    }
}

/// One installment in an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based installment number
    pub period_number: u32,

    /// 1-based loan year the installment falls in
    pub year: u32,

    /// Month within the loan year (1..=12)
    pub month: u32,

    /// Calendar due date, present when the loan has a start date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    pub payment: Decimal,
    pub principal_payment: Decimal,
    pub interest_payment: Decimal,

    /// Balance still owed after this installment (never negative)
    pub remaining_balance: Decimal,
}

/// Full repayment plan for a loan. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Fixed installment amount
    pub payment: Decimal,

    /// `payment × total_periods`
    pub total_payments: Decimal,

    /// Sum of interest over all rows
    pub total_interest: Decimal,

    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// The "no loan" schedule: zero payment, no rows.
    pub fn empty() -> Self {
        Self {
            payment: Decimal::ZERO,
            total_payments: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Balance owed after installment `period` has been paid.
    /// Returns `None` for period 0 or a period past the end of the schedule.
    pub fn balance_after(&self, period: u32) -> Option<Decimal> {
        let idx = usize::try_from(period).ok()?.checked_sub(1)?;
        self.rows.get(idx).map(|r| r.remaining_balance)
    }

    /// Interest paid in installments `1..=period` (capped at the schedule length).
    pub fn interest_paid_through(&self, period: u32) -> Decimal {
        self.rows
            .iter()
            .take_while(|r| r.period_number <= period)
            .map(|r| r.interest_payment)
            .sum()
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tiered interest-rate band on the balance axis.
///
/// Covers the half-open interval `[from_amount, to_amount)`. A zone with no
/// `to_amount` is unbounded and covers every balance `>= from_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestZone {
    pub from_amount: Decimal,
    pub to_amount: Option<Decimal>,
    /// Annual interest rate in percent (e.g., 2.5 for 2.5%)
    pub interest_rate: Decimal,
}

impl InterestZone {
    pub fn bounded(from_amount: Decimal, to_amount: Decimal, interest_rate: Decimal) -> Self {
        Self {
            from_amount,
            to_amount: Some(to_amount),
            interest_rate,
        }
    }

    pub fn unbounded(from_amount: Decimal, interest_rate: Decimal) -> Self {
        Self {
            from_amount,
            to_amount: None,
            interest_rate,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.to_amount.is_none()
    }

    /// Inclusive lower bound, exclusive upper bound.
    pub fn contains(&self, balance: Decimal) -> bool {
        balance >= self.from_amount && self.to_amount.map_or(true, |to| balance < to)
    }

    /// Whether the two zones share any balance.
    pub fn overlaps(&self, other: &InterestZone) -> bool {
        match (self.to_amount, other.to_amount) {
            (None, None) => true,
            (None, Some(other_to)) => self.from_amount < other_to,
            (Some(to), None) => to > other.from_amount,
            (Some(to), Some(other_to)) => self.from_amount < other_to && to > other.from_amount,
        }
    }
}

impl std::fmt::Display for InterestZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_amount {
            Some(to) => write!(f, "[{}, {}) @ {}%", self.from_amount, to, self.interest_rate),
            None => write!(f, "[{}, ∞) @ {}%", self.from_amount, self.interest_rate),
        }
    }
}

/// A zone as entered by the user, before validation.
///
/// Every field is optional because it comes straight from a form.
/// `ZoneService::validate_zone` turns it into an [`InterestZone`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDraft {
    #[serde(default)]
    pub from_amount: Option<Decimal>,
    #[serde(default)]
    pub to_amount: Option<Decimal>,
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
}

impl ZoneDraft {
    pub fn new(
        from_amount: Option<Decimal>,
        to_amount: Option<Decimal>,
        interest_rate: Option<Decimal>,
    ) -> Self {
        Self {
            from_amount,
            to_amount,
            interest_rate,
        }
    }
}

impl From<&InterestZone> for ZoneDraft {
    fn from(zone: &InterestZone) -> Self {
        Self {
            from_amount: Some(zone.from_amount),
            to_amount: zone.to_amount,
            interest_rate: Some(zone.interest_rate),
        }
    }
}

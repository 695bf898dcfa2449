use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::zone::{InterestZone, ZoneDraft};

/// Resolves tiered interest zones and judges whether a zone set is valid.
///
/// Pure business logic, no state between calls. Adding, editing and deleting
/// zones is the caller's job; this service only answers "is this allowed?"
/// and "which rate applies?".
pub struct ZoneService;

impl ZoneService {
    pub fn new() -> Self {
        Self
    }

    /// Find the rate of the zone whose `[from, to)` interval contains `balance`.
    ///
    /// Zones may arrive in any order; they are evaluated by ascending
    /// `from_amount`. Fails with `NoMatchingZone` when nothing covers the balance.
    pub fn resolve_effective_rate(
        &self,
        balance: Decimal,
        zones: &[InterestZone],
    ) -> Result<Decimal, CoreError> {
        log::debug!("Resolving effective rate for balance {balance} over {} zones", zones.len());

        Self::sorted(zones)
            .into_iter()
            .find(|z| z.contains(balance))
            .map(|z| z.interest_rate)
            .ok_or_else(|| {
                log::warn!("No interest zone matches balance {balance}");
                CoreError::NoMatchingZone { balance }
            })
    }

    /// Effective rate, or `flat_rate` when no zone covers the balance.
    pub fn effective_rate_or(
        &self,
        balance: Decimal,
        zones: &[InterestZone],
        flat_rate: Decimal,
    ) -> Decimal {
        match self.resolve_effective_rate(balance, zones) {
            Ok(rate) => rate,
            Err(_) => flat_rate,
        }
    }

    /// Interest earned over one year on `balance` at its effective rate.
    pub fn annual_interest(
        &self,
        balance: Decimal,
        zones: &[InterestZone],
    ) -> Result<Decimal, CoreError> {
        let rate = self.resolve_effective_rate(balance, zones)?;
        balance
            .checked_mul(rate)
            .map(|v| v / Decimal::ONE_HUNDRED)
            .ok_or_else(|| CoreError::CalculationOverflow(format!("interest on {balance}")))
    }

    /// Validate a candidate zone against an existing set.
    ///
    /// `editing_index` names the zone being replaced, which is left out of
    /// the comparison. Returns the validated zone on success. Nothing is ever
    /// adjusted: the first rule the candidate breaks is reported as is.
    pub fn validate_zone(
        &self,
        existing: &[InterestZone],
        candidate: &ZoneDraft,
        editing_index: Option<usize>,
    ) -> Result<InterestZone, CoreError> {
        let zone = Self::zone_from_draft(candidate)?;

        if let Some(index) = editing_index {
            if index >= existing.len() {
                return Err(CoreError::ZoneIndexOutOfRange {
                    index,
                    len: existing.len(),
                });
            }
        }

        let others: Vec<&InterestZone> = existing
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != editing_index)
            .map(|(_, z)| z)
            .collect();

        let unbounded = others.iter().filter(|z| z.is_unbounded()).count()
            + usize::from(zone.is_unbounded());
        if unbounded > 1 {
            log::warn!("Rejected zone {zone}: a second unbounded zone");
            return Err(CoreError::MultipleUnboundedZones);
        }

        if let Some(conflict) = others.iter().find(|other| zone.overlaps(other)) {
            log::warn!("Rejected zone {zone}: overlaps {conflict}");
            return Err(CoreError::ZoneOverlap {
                from: conflict.from_amount,
                to: conflict.to_amount,
            });
        }

        Ok(zone)
    }

    /// Check every zone of a stored set against all the others.
    pub fn validate_zone_set(&self, zones: &[InterestZone]) -> Result<(), CoreError> {
        for (i, zone) in zones.iter().enumerate() {
            self.validate_zone(zones, &ZoneDraft::from(zone), Some(i))?;
        }
        Ok(())
    }

    /// Copy of `zones` ordered by ascending `from_amount`.
    pub fn sorted(zones: &[InterestZone]) -> Vec<&InterestZone> {
        let mut sorted: Vec<&InterestZone> = zones.iter().collect();
        sorted.sort_by_key(|z| z.from_amount);
        sorted
    }

    // ── Internal ────────────────────────────────────────────────────

    fn zone_from_draft(draft: &ZoneDraft) -> Result<InterestZone, CoreError> {
        let from_amount = draft.from_amount.ok_or(CoreError::MissingField("from_amount"))?;
        let interest_rate = draft
            .interest_rate
            .ok_or(CoreError::MissingField("interest_rate"))?;

        if from_amount < Decimal::ZERO {
            return Err(CoreError::NegativeAmount {
                field: "from_amount",
                value: from_amount,
            });
        }

        if let Some(to) = draft.to_amount {
            if to <= from_amount {
                return Err(CoreError::InvalidRange {
                    from: from_amount,
                    to,
                });
            }
        }

        Ok(InterestZone {
            from_amount,
            to_amount: draft.to_amount,
            interest_rate,
        })
    }
}

impl Default for ZoneService {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_core::errors::CoreError;
use rust_decimal_macros::dec;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_currency_code() {
        let err = CoreError::InvalidCurrencyCode("US".into());
        assert_eq!(
            err.to_string(),
            "Invalid currency code 'US': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
        );
    }

    #[test]
    fn unknown_currency() {
        let err = CoreError::UnknownCurrency("JPY".into());
        assert_eq!(
            err.to_string(),
            "Unknown currency: JPY is not in the exchange rate table"
        );
    }

    #[test]
    fn invalid_rate() {
        let err = CoreError::InvalidRate {
            currency: "EUR".into(),
            rate: dec!(-1.5),
        };
        assert_eq!(err.to_string(), "Invalid exchange rate for EUR: -1.5");
    }

    #[test]
    fn no_matching_zone() {
        let err = CoreError::NoMatchingZone { balance: dec!(500) };
        assert_eq!(err.to_string(), "No interest zone matches balance 500");
    }

    #[test]
    fn missing_field() {
        let err = CoreError::MissingField("interest_rate");
        assert_eq!(err.to_string(), "Missing required field: interest_rate");
    }

    #[test]
    fn negative_amount() {
        let err = CoreError::NegativeAmount {
            field: "from_amount",
            value: dec!(-10),
        };
        assert_eq!(err.to_string(), "from_amount must not be negative (got -10)");
    }

    #[test]
    fn invalid_range() {
        let err = CoreError::InvalidRange {
            from: dec!(1000),
            to: dec!(500),
        };
        assert_eq!(
            err.to_string(),
            "Invalid zone range: upper bound 500 must be greater than lower bound 1000"
        );
    }

    #[test]
    fn multiple_unbounded_zones() {
        assert_eq!(
            CoreError::MultipleUnboundedZones.to_string(),
            "Only one zone may be unbounded"
        );
    }

    #[test]
    fn zone_overlap_bounded() {
        let err = CoreError::ZoneOverlap {
            from: dec!(0),
            to: Some(dec!(10000)),
        };
        assert_eq!(err.to_string(), "Zone overlaps existing zone [0, 10000)");
    }

    #[test]
    fn zone_overlap_unbounded() {
        let err = CoreError::ZoneOverlap {
            from: dec!(50000),
            to: None,
        };
        assert_eq!(err.to_string(), "Zone overlaps existing zone [50000, ∞)");
    }

    #[test]
    fn zone_index_out_of_range() {
        let err = CoreError::ZoneIndexOutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "Zone index 3 out of range (zone set has 2 zones)"
        );
    }

    #[test]
    fn period_limit_exceeded() {
        let err = CoreError::PeriodLimitExceeded {
            requested: 5000,
            max: 1200,
        };
        assert_eq!(
            err.to_string(),
            "Schedule of 5000 periods exceeds maximum of 1200 periods"
        );
    }

    #[test]
    fn calculation_overflow() {
        let err = CoreError::CalculationOverflow("total payments".into());
        assert_eq!(err.to_string(), "Calculation overflow: total payments");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("annual rate must not be negative".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: annual rate must not be negative"
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[test]
    fn question_mark_propagates_json_error() {
        fn parse(input: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(input)?)
        }
        assert!(matches!(parse("["), Err(CoreError::Serialization(_))));
        assert!(parse("[]").is_ok());
    }
}

// ── Trait behavior ──────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::MultipleUnboundedZones);
        assert_eq!(err.to_string(), "Only one zone may be unbounded");
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            CoreError::UnknownCurrency("EUR".into()),
            CoreError::UnknownCurrency("EUR".into())
        );
        assert_ne!(
            CoreError::UnknownCurrency("EUR".into()),
            CoreError::UnknownCurrency("GBP".into())
        );
    }

    #[test]
    fn clone_preserves_variant() {
        let err = CoreError::ZoneOverlap {
            from: dec!(0),
            to: Some(dec!(10000)),
        };
        assert_eq!(err.clone(), err);
    }
}

use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;

/// Default cap on schedule length: 100 years of monthly installments.
pub const DEFAULT_MAX_SCHEDULE_PERIODS: u32 = 1200;

/// User-configurable settings for the computation core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The home currency that rate tables are built around and summaries are reported in.
    pub base_currency: CurrencyCode,

    /// Upper bound on `total_periods` accepted by the amortization engine.
    #[serde(default = "default_max_schedule_periods")]
    pub max_schedule_periods: u32,
}

fn default_max_schedule_periods() -> u32 {
    DEFAULT_MAX_SCHEDULE_PERIODS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: CurrencyCode("USD".to_string()),
            max_schedule_periods: DEFAULT_MAX_SCHEDULE_PERIODS,
        }
    }
}

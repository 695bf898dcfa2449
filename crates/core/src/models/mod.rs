pub mod analytics;
pub mod currency;
pub mod holding;
pub mod loan;
pub mod settings;
pub mod zone;

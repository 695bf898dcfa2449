pub mod amortization_service;
pub mod analytics_service;
pub mod currency_service;
pub mod zone_service;

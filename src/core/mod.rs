//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use convert::{convert_amount, parse_amount};
pub use currency::{ConversionResult, Currency, CurrencyApi, ExchangeRate};
pub use error::ConverterError;

//! Currency types and the remote rate API abstraction

use super::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: String,
    pub currency_name: String,
    #[serde(default)]
    pub currency_symbol: Option<String>,
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.id,
            self.currency_name,
            self.currency_symbol.as_deref().unwrap_or("")
        )
    }
}

/// Orders currencies by their code, ascending.
pub fn sort_by_code(currencies: &mut [Currency]) {
    currencies.sort_by(|a, b| a.id.cmp(&b.id));
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} = {}",
            self.from,
            self.to,
            format_number(self.rate)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub converted_amount: f64,
}

impl ConversionResult {
    pub fn new(from: &str, to: &str, amount: f64, rate: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            rate,
            converted_amount: amount * rate,
        }
    }

    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate {
            from: self.from.clone(),
            to: self.to.clone(),
            rate: self.rate,
        }
    }
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} is equal to {} {}",
            format_number(self.amount),
            self.from,
            format_number(self.converted_amount),
            self.to
        )
    }
}

/// Shortest round-trip representation, keeping `.0` on integral values
/// (`100.0`, `0.9`). Very small or large values use a signed, two-digit
/// exponent (`1e-05`, `1.5e+16`).
pub fn format_number(value: f64) -> String {
    let repr = format!("{value:?}");
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[async_trait]
pub trait CurrencyApi: Send + Sync {
    /// All currencies known to the API, sorted by code.
    async fn fetch_currencies(&self) -> Result<Vec<Currency>>;

    /// Units of `to` for one unit of `from`.
    async fn fetch_exchange_rate(&self, from: &str, to: &str) -> Result<f64>;
}


#[cfg(test)]
mod tests {
    use super::testing::currency;
    use super::*;

    #[test]
    fn test_currency_display() {
        let usd = currency("USD", "United States Dollar", Some("$"));
        assert_eq!(usd.to_string(), "USD - United States Dollar - $");

        let lek = currency("ALL", "Albanian Lek", None);
        assert_eq!(lek.to_string(), "ALL - Albanian Lek - ");
    }

    #[test]
    fn test_currency_deserialization() {
        let json = r#"{"currencyName": "Euro", "currencySymbol": "€", "id": "EUR"}"#;
        let eur: Currency = serde_json::from_str(json).unwrap();
        assert_eq!(eur, currency("EUR", "Euro", Some("€")));

        let json = r#"{"currencyName": "Albanian Lek", "id": "ALL"}"#;
        let lek: Currency = serde_json::from_str(json).unwrap();
        assert!(lek.currency_symbol.is_none());
    }

    #[test]
    fn test_sort_by_code_is_idempotent() {
        let mut currencies = vec![
            currency("USD", "United States Dollar", Some("$")),
            currency("AUD", "Australian Dollar", Some("$")),
            currency("EUR", "Euro", Some("€")),
        ];
        sort_by_code(&mut currencies);
        let once: Vec<_> = currencies.iter().map(|c| c.id.clone()).collect();
        assert_eq!(once, vec!["AUD", "EUR", "USD"]);

        sort_by_code(&mut currencies);
        let twice: Vec<_> = currencies.iter().map(|c| c.id.clone()).collect();
        assert_eq!(once, twice);
    }

    proptest::proptest! {
        #[test]
        fn prop_sort_by_code_orders_and_is_idempotent(
            codes in proptest::collection::vec("[A-Z]{3}", 0..40),
        ) {
            let mut currencies: Vec<Currency> = codes
                .iter()
                .map(|code| currency(code, "Name", None))
                .collect();

            sort_by_code(&mut currencies);
            proptest::prop_assert!(currencies.windows(2).all(|w| w[0].id <= w[1].id));

            let once = currencies.clone();
            sort_by_code(&mut currencies);
            proptest::prop_assert_eq!(once, currencies);
        }

        #[test]
        fn prop_format_number_round_trips(value in proptest::num::f64::NORMAL) {
            let printed = format_number(value);
            proptest::prop_assert_eq!(printed.parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_rate_and_conversion_display() {
        let result = ConversionResult::new("USD", "EUR", 100.0, 0.9);
        assert_eq!(result.converted_amount, 90.0);
        assert_eq!(result.to_string(), "100.0 USD is equal to 90.0 EUR");
        assert_eq!(result.exchange_rate().to_string(), "USD -> EUR = 0.9");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100.0");
        assert_eq!(format_number(0.9), "0.9");
        assert_eq!(format_number(1.2345), "1.2345");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(4.2e-8), "4.2e-08");
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(-2.5e-7), "-2.5e-07");
    }
}

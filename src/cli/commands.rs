//! Printing front-ends for the converter operations.

use super::ui;
use crate::core::{ConversionResult, Currency, CurrencyApi, ExchangeRate, convert_amount};
use anyhow::Result;
use std::io::Write;

/// Prints every currency as `ID - Name - Symbol`, sorted by code.
pub async fn list<A, W>(api: &A, out: &mut W, progress: bool) -> Result<Vec<Currency>>
where
    A: CurrencyApi + ?Sized,
    W: Write,
{
    let spinner = ui::new_spinner("Fetching currencies...", progress);
    let currencies = api.fetch_currencies().await;
    spinner.finish_and_clear();

    let currencies = currencies?;
    for currency in &currencies {
        writeln!(out, "{currency}")?;
    }
    Ok(currencies)
}

/// Prints `FROM -> TO = rate`.
pub async fn rate<A, W>(
    api: &A,
    out: &mut W,
    from: &str,
    to: &str,
    progress: bool,
) -> Result<ExchangeRate>
where
    A: CurrencyApi + ?Sized,
    W: Write,
{
    let spinner = ui::new_spinner(&format!("Fetching {from} -> {to} rate..."), progress);
    let rate = api.fetch_exchange_rate(from, to).await;
    spinner.finish_and_clear();

    let rate = ExchangeRate {
        from: from.to_string(),
        to: to.to_string(),
        rate: rate?,
    };
    writeln!(out, "{rate}")?;
    Ok(rate)
}

/// Prints the rate line followed by `AMOUNT FROM is equal to CONVERTED TO`.
pub async fn convert<A, W>(
    api: &A,
    out: &mut W,
    from: &str,
    to: &str,
    amount: &str,
    progress: bool,
) -> Result<ConversionResult>
where
    A: CurrencyApi + ?Sized,
    W: Write,
{
    let spinner = ui::new_spinner(&format!("Converting {from} to {to}..."), progress);
    let result = convert_amount(api, from, to, amount).await;
    spinner.finish_and_clear();

    let result = result?;
    writeln!(out, "{}", result.exchange_rate())?;
    writeln!(out, "{result}")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConverterError;
    use crate::core::currency::testing::StaticApi;

    #[tokio::test]
    async fn test_list_prints_sorted_currencies() {
        let api = StaticApi::with_rate(1.0);
        let mut out = Vec::new();

        let currencies = list(&api, &mut out, false).await.unwrap();
        assert_eq!(currencies.len(), 3);

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed,
            "ALL - Albanian Lek - \nEUR - Euro - €\nUSD - United States Dollar - $\n"
        );
    }

    #[tokio::test]
    async fn test_rate_prints_pair() {
        let api = StaticApi::with_rate(0.9);
        let mut out = Vec::new();

        let fetched = rate(&api, &mut out, "USD", "EUR", false).await.unwrap();
        assert_eq!(fetched.rate, 0.9);
        assert_eq!(String::from_utf8(out).unwrap(), "USD -> EUR = 0.9\n");
    }

    #[tokio::test]
    async fn test_convert_prints_rate_and_result() {
        let api = StaticApi::with_rate(0.9);
        let mut out = Vec::new();

        let result = convert(&api, &mut out, "USD", "EUR", "100", false)
            .await
            .unwrap();
        assert_eq!(result.converted_amount, 90.0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "USD -> EUR = 0.9\n100.0 USD is equal to 90.0 EUR\n"
        );
    }

    #[tokio::test]
    async fn test_convert_invalid_amount_prints_nothing() {
        let api = StaticApi::with_rate(0.9);
        let mut out = Vec::new();

        let err = convert(&api, &mut out, "USD", "EUR", "abc", false)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConverterError>(),
            Some(ConverterError::InvalidInput { .. })
        ));
        assert!(out.is_empty());
        assert_eq!(api.rate_calls(), 0);
    }
}

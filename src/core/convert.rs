//! Amount conversion on top of a [`CurrencyApi`]

use super::currency::{ConversionResult, CurrencyApi};
use super::error::{ConverterError, Result};
use tracing::debug;

/// Parses a user-entered amount. Surrounding whitespace is ignored; thousands
/// separators, non-finite values and empty input are rejected.
pub fn parse_amount(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ConverterError::InvalidInput {
            input: text.to_string(),
        })
}

/// Converts `amount_text` units of `from` into `to`.
///
/// The amount is validated before the rate is requested, so bad input never
/// reaches the network.
pub async fn convert_amount<A>(
    api: &A,
    from: &str,
    to: &str,
    amount_text: &str,
) -> Result<ConversionResult>
where
    A: CurrencyApi + ?Sized,
{
    let amount = parse_amount(amount_text)?;
    let rate = api.fetch_exchange_rate(from, to).await?;
    let result = ConversionResult::new(from, to, amount, rate);
    debug!(?result, "Converted amount");
    Ok(result)
}

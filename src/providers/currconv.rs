use crate::core::currency::{Currency, CurrencyApi, sort_by_code};
use crate::core::error::{ConverterError, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

const CURRENCIES_ENDPOINT: &str = "api/v7/currencies";
const CONVERT_ENDPOINT: &str = "api/v7/convert";

/// Client for the free.currconv.com v7 API.
pub struct CurrConvClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for CurrConvClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrConvClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CurrConvClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url).map_err(|e| {
            ConverterError::Config(format!("invalid base URL '{base_url}': {e}"))
        })?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("currconv/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(ConverterError::transport)?;

        Ok(CurrConvClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// Sends a GET to `endpoint` with `params` plus the API key and decodes
    /// the body. Only `200 OK` counts as success.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        debug!(endpoint, ?params, "Requesting data from currency API");

        let mut query = params.to_vec();
        query.push(("apiKey", self.api_key.as_str()));
        let url = Url::parse_with_params(&format!("{}/{}", self.base_url, endpoint), &query)
            .map_err(|e| ConverterError::Config(format!("invalid request URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ConverterError::transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, endpoint, "Currency API returned an error status");
            return Err(ConverterError::Remote { status });
        }

        let text = response.text().await.map_err(ConverterError::transport)?;
        serde_json::from_str(&text)
            .map_err(|e| ConverterError::Decode(format!("failed to parse {endpoint} response: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct CurrenciesResponse {
    results: HashMap<String, Currency>,
}

/// `compact=ultra` body: pair key (`USD_EUR`) to rate.
type CompactRates = HashMap<String, f64>;

/// Picks the rate for `from`/`to` out of a compact response. The pair key is
/// preferred; a lone entry under another key is accepted as well.
fn extract_rate(rates: CompactRates, from: &str, to: &str) -> Result<f64> {
    let pair = format!("{from}_{to}");
    let found = rates.get(&pair).copied();
    let rate = match found {
        Some(rate) => rate,
        None if rates.len() == 1 => rates.into_values().next().unwrap_or(f64::NAN),
        None => {
            return Err(ConverterError::Decode(format!(
                "no rate for {pair} in response with {} entries",
                rates.len()
            )));
        }
    };

    if !rate.is_finite() || rate <= 0.0 {
        return Err(ConverterError::Decode(format!(
            "invalid rate {rate} for {pair}"
        )));
    }
    Ok(rate)
}

#[async_trait]
impl CurrencyApi for CurrConvClient {
    #[instrument(name = "CurrConvCurrencies", skip(self))]
    async fn fetch_currencies(&self) -> Result<Vec<Currency>> {
        let data: CurrenciesResponse = self.get_json(CURRENCIES_ENDPOINT, &[]).await?;

        let mut currencies: Vec<Currency> = data.results.into_values().collect();
        sort_by_code(&mut currencies);
        debug!(count = currencies.len(), "Fetched currencies");
        Ok(currencies)
    }

    #[instrument(name = "CurrConvRate", skip(self))]
    async fn fetch_exchange_rate(&self, from: &str, to: &str) -> Result<f64> {
        let pair = format!("{from}_{to}");
        let rates: CompactRates = self
            .get_json(CONVERT_ENDPOINT, &[("q", pair.as_str()), ("compact", "ultra")])
            .await?;

        let rate = extract_rate(rates, from, to)?;
        debug!(rate, "Fetched exchange rate");
        Ok(rate)
    }
}

//! Exchange-rate stage: one pair-rate lookup per configured source
//! currency against the target currency. Sequential, since the list of
//! currencies is short.

use std::collections::HashMap;

use tracing::info;

use airline_api::AirlineApi;

use crate::errors::RatesError;

/// Build the rate table mapping each source currency to its multiplier
/// into the target currency.
///
/// The first fetch or parse error aborts the stage, so the price stage
/// never runs against a partial table.
pub async fn fetch_exchange_rates(
    api: &dyn AirlineApi,
    target_currency: &str,
    source_currencies: &[String],
) -> Result<HashMap<String, f64>, RatesError> {
    let mut rates = HashMap::with_capacity(source_currencies.len());

    for source in source_currencies {
        let pair = format!("{source}{target_currency}");
        let raw = api.exchange_rate(&pair).await?;
        let rate = raw.parse::<f64>().map_err(|e| RatesError::ParseRate {
            pair: pair.clone(),
            value: raw.clone(),
            source: e,
        })?;

        info!(pair = %pair, rate, "fetched exchange rate");
        rates.insert(source.clone(), rate);
    }

    Ok(rates)
}

use async_trait::async_trait;
use chrono::Duration;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::{
    cache::{Cache, DEFAULT_TTL_HOURS},
    data::earnings::{EarningsData, SearchResult},
    ds::EarningsProvider,
    error::FvResult,
    financial::earnings::{normalize_earnings, normalize_search},
    utils::net::{http_get, join_url},
};

pub static FMP_API_DEFAULT: &str = "https://financialmodelingprep.com";

/// Bump when the cached [`EarningsData`] layout changes.
pub static EARNINGS_SCHEMA_VERSION: &str = "v5";

pub static ANNUAL_LIMIT_DEFAULT: u32 = 30;
pub static QUARTERLY_LIMIT_DEFAULT: u32 = 120;

#[derive(Clone, Debug)]
pub struct FmpOptions {
    pub base_url: String,
    pub annual_limit: u32,
    pub quarterly_limit: u32,
    pub cache_ttl: Duration,
}

pub struct FmpClient {
    api_key: String,
    options: FmpOptions,
    cache: Cache,
    http: Client,
}

impl Default for FmpOptions {
    fn default() -> Self {
        Self {
            base_url: FMP_API_DEFAULT.to_string(),
            annual_limit: ANNUAL_LIMIT_DEFAULT,
            quarterly_limit: QUARTERLY_LIMIT_DEFAULT,
            cache_ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }
}

impl FmpClient {
    pub fn new(api_key: &str, options: FmpOptions, cache: Cache) -> Self {
        Self {
            api_key: api_key.to_string(),
            options,
            cache,
            http: Client::new(),
        }
    }

    pub async fn search_symbol(&self, query: &str) -> FvResult<Vec<SearchResult>> {
        let url = self.endpoint("/stable/search-symbol", &[("query", query)])?;
        let json = self.fetch_json(&url).await?;

        Ok(normalize_search(&json))
    }

    /// Served from cache when possible; a fresh result is cached only after it
    /// has been normalized successfully.
    pub async fn fetch_earnings(&self, symbol: &str) -> FvResult<EarningsData> {
        let cache_key = earnings_cache_key(symbol);
        if let Some(data) = self.cache.get::<EarningsData>(&cache_key).await? {
            return Ok(data);
        }

        let annual_limit = self.options.annual_limit.to_string();
        let quarterly_limit = self.options.quarterly_limit.to_string();

        let annual_url = self.endpoint(
            "/stable/income-statement",
            &[
                ("symbol", symbol),
                ("period", "annual"),
                ("limit", &annual_limit),
            ],
        )?;
        let quarterly_url = self.endpoint(
            "/stable/income-statement",
            &[
                ("symbol", symbol),
                ("period", "quarter"),
                ("limit", &quarterly_limit),
            ],
        )?;
        let profile_url = self.endpoint("/stable/profile", &[("symbol", symbol)])?;

        let (annual_json, quarterly_json, profile_json) = futures::try_join!(
            self.fetch_json(&annual_url),
            self.fetch_json(&quarterly_url),
            self.fetch_json(&profile_url),
        )?;

        let data = normalize_earnings(symbol, &annual_json, &quarterly_json, &profile_json)?;
        debug!(
            "[FMP] {symbol}: {} annual, {} quarterly records",
            data.annual_eps.len(),
            data.quarterly_eps.len()
        );

        self.cache
            .set(&cache_key, &data, self.options.cache_ttl)
            .await?;

        Ok(data)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> FvResult<Url> {
        let mut url = join_url(&self.options.base_url, path)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter())
            .append_pair("apikey", &self.api_key);

        Ok(url)
    }

    async fn fetch_json(&self, url: &Url) -> FvResult<Value> {
        let bytes = http_get(&self.http, url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl EarningsProvider for FmpClient {
    async fn earnings(&self, symbol: &str) -> FvResult<EarningsData> {
        self.fetch_earnings(symbol).await
    }
}

pub fn earnings_cache_key(symbol: &str) -> String {
    format!("fmp_earnings_{EARNINGS_SCHEMA_VERSION}_{symbol}")
}

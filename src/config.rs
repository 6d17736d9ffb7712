use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    cache::DEFAULT_TTL_HOURS,
    ds::fmp::{ANNUAL_LIMIT_DEFAULT, FMP_API_DEFAULT, FmpOptions, QUARTERLY_LIMIT_DEFAULT},
    error::{FvError, FvResult},
    report::YearWindow,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FvConfig {
    pub fmp_api: String,
    pub cache_ttl_hours: i64,
    pub annual_limit: u32,
    pub quarterly_limit: u32,

    #[serde(
        deserialize_with = "deserialize_year_window",
        serialize_with = "serialize_year_window"
    )]
    pub default_years: YearWindow,
}

impl Default for FvConfig {
    fn default() -> Self {
        Self {
            fmp_api: FMP_API_DEFAULT.to_string(),
            cache_ttl_hours: DEFAULT_TTL_HOURS,
            annual_limit: ANNUAL_LIMIT_DEFAULT,
            quarterly_limit: QUARTERLY_LIMIT_DEFAULT,
            default_years: YearWindow::default(),
        }
    }
}

impl FvConfig {
    pub fn load() -> FvResult<Self> {
        confy::load(env!("CARGO_PKG_NAME"), None).map_err(Into::into)
    }

    pub fn save(&self) -> FvResult<()> {
        confy::store(env!("CARGO_PKG_NAME"), None, self).map_err(Into::into)
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fmp_api", self.fmp_api.to_string()),
            ("cache_ttl_hours", self.cache_ttl_hours.to_string()),
            ("annual_limit", self.annual_limit.to_string()),
            ("quarterly_limit", self.quarterly_limit.to_string()),
            ("default_years", self.default_years.to_string()),
        ]
    }

    pub fn set(&mut self, key: &str, value: &str) -> FvResult<()> {
        let value = value.trim();

        match key.to_lowercase().as_str() {
            "fmp_api" => {
                Url::parse(value)?;
                self.fmp_api = value.to_string();
            }
            "cache_ttl_hours" => {
                let hours: i64 = parse_number(key, value)?;
                if Duration::try_hours(hours).is_none() {
                    return Err(FvError::Invalid {
                        code: "INVALID_CONFIG_VALUE",
                        message: format!("Value '{value}' for '{key}' is out of range"),
                    });
                }
                self.cache_ttl_hours = hours;
            }
            "annual_limit" => self.annual_limit = parse_number(key, value)?,
            "quarterly_limit" => self.quarterly_limit = parse_number(key, value)?,
            "default_years" => self.default_years = YearWindow::from_str(value)?,
            _ => {
                return Err(FvError::NotExists {
                    code: "CONFIG_KEY_NOT_EXISTS",
                    message: format!("Unknown config key '{key}'"),
                });
            }
        }

        Ok(())
    }

    pub fn reset(&mut self, key: &str) -> FvResult<()> {
        let default = Self::default();

        match key.to_lowercase().as_str() {
            "fmp_api" => self.fmp_api = default.fmp_api,
            "cache_ttl_hours" => self.cache_ttl_hours = default.cache_ttl_hours,
            "annual_limit" => self.annual_limit = default.annual_limit,
            "quarterly_limit" => self.quarterly_limit = default.quarterly_limit,
            "default_years" => self.default_years = default.default_years,
            _ => {
                return Err(FvError::NotExists {
                    code: "CONFIG_KEY_NOT_EXISTS",
                    message: format!("Unknown config key '{key}'"),
                });
            }
        }

        Ok(())
    }

    pub fn fmp_options(&self) -> FmpOptions {
        FmpOptions {
            base_url: self.fmp_api.to_string(),
            annual_limit: self.annual_limit,
            quarterly_limit: self.quarterly_limit,
            cache_ttl: Duration::try_hours(self.cache_ttl_hours)
                .unwrap_or_else(|| Duration::hours(DEFAULT_TTL_HOURS)),
        }
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> FvResult<T> {
    value.parse::<T>().map_err(|_| FvError::Invalid {
        code: "INVALID_CONFIG_VALUE",
        message: format!("Invalid value '{value}' for '{key}'"),
    })
}

fn deserialize_year_window<'de, D>(deserializer: D) -> Result<YearWindow, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    YearWindow::from_str(&s).map_err(serde::de::Error::custom)
}

fn serialize_year_window<S>(window: &YearWindow, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&window.to_string())
}

use serde::{Deserialize, Serialize};

/// One value of a metric for a fiscal period; `fiscal_quarter` is `None` for
/// annual figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsRecord {
    pub fiscal_year: i32,
    pub fiscal_quarter: Option<u8>,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsData {
    pub symbol: String,
    pub market_cap: Option<u64>,
    pub ipo_date: Option<String>,
    pub quarterly_eps: Vec<EarningsRecord>,
    pub annual_eps: Vec<EarningsRecord>,
    pub quarterly_revenue: Vec<EarningsRecord>,
    pub annual_revenue: Vec<EarningsRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
}

impl EarningsRecord {
    pub fn annual(fiscal_year: i32, value: f64) -> Self {
        Self {
            fiscal_year,
            fiscal_quarter: None,
            value,
        }
    }

    pub fn quarterly(fiscal_year: i32, fiscal_quarter: u8, value: f64) -> Self {
        Self {
            fiscal_year,
            fiscal_quarter: Some(fiscal_quarter),
            value,
        }
    }
}

impl EarningsData {
    pub fn is_empty(&self) -> bool {
        self.quarterly_eps.is_empty()
            && self.annual_eps.is_empty()
            && self.quarterly_revenue.is_empty()
            && self.annual_revenue.is_empty()
    }
}

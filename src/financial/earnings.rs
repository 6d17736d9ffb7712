use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{
    data::earnings::{EarningsData, EarningsRecord, SearchResult},
    error::{FvError, FvResult},
    utils::math::round_half_up,
};

// Field aliases in priority order, the provider has renamed these over time.
const EPS_FIELDS: &[&str] = &["epsdiluted", "epsDiluted", "eps"];
const REVENUE_FIELDS: &[&str] = &["revenue"];
const FISCAL_YEAR_FIELDS: &[&str] = &["fiscalYear", "fiscal_year"];
const CALENDAR_YEAR_FIELDS: &[&str] = &["calendarYear", "calendar_year"];
const MARKET_CAP_FIELDS: &[&str] = &["marketCap", "mktCap"];
const IPO_DATE_FIELDS: &[&str] = &["ipoDate"];
const EXCHANGE_FIELDS: &[&str] = &["exchangeShortName", "exchange"];
const NAME_FIELDS: &[&str] = &["name", "companyName"];

const US_EXCHANGES: &[&str] = &["NASDAQ", "NYSE", "AMEX"];
const SEARCH_RESULTS_LIMIT: usize = 10;

static QUARTER_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Q([1-4])$").expect("Invalid quarter pattern"));

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date pattern"));

#[derive(Clone, Copy, Debug, PartialEq)]
enum Period {
    FiscalYear,
    Quarter(u8),
}

/// An income-statement row after alias resolution.
#[derive(Debug, PartialEq)]
struct StatementRow {
    period: Period,
    fiscal_year: i32,
    /// `None` when the provider sent something that is not a number.
    eps: Option<f64>,
    revenue: f64,
}

impl StatementRow {
    fn from_json(json: &Value) -> Option<Self> {
        let row = json.as_object()?;

        let period = parse_period(row.get("period").and_then(Value::as_str)?)?;
        let fiscal_year = resolve_fiscal_year(row).filter(|year| *year > 0)?;

        let eps = match first_present(row, EPS_FIELDS) {
            Some(v) => to_number(v).map(|eps| round_half_up(eps, 2)),
            None => Some(0.0),
        };

        let revenue = first_present(row, REVENUE_FIELDS)
            .and_then(to_number)
            .filter(|revenue| *revenue >= 0.0)
            .map(|revenue| round_half_up(revenue, 0))
            .unwrap_or(0.0);

        Some(Self {
            period,
            fiscal_year,
            eps,
            revenue,
        })
    }
}

pub fn normalize_earnings(
    symbol: &str,
    annual_json: &Value,
    quarterly_json: &Value,
    profile_json: &Value,
) -> FvResult<EarningsData> {
    let (Some(annual_items), Some(quarterly_items)) =
        (annual_json.as_array(), quarterly_json.as_array())
    else {
        return Err(FvError::NoData {
            code: "NO_EARNINGS_DATA",
            message: format!("No earnings data found for '{symbol}'"),
        });
    };

    let annual_rows = parse_rows(annual_items);
    let quarterly_rows = parse_rows(quarterly_items);

    let mut data = EarningsData {
        symbol: symbol.to_string(),
        ..Default::default()
    };

    for row in annual_rows.iter().filter(|r| r.period == Period::FiscalYear) {
        if let Some(eps) = row.eps {
            data.annual_eps
                .push(EarningsRecord::annual(row.fiscal_year, eps));
        }
        data.annual_revenue
            .push(EarningsRecord::annual(row.fiscal_year, row.revenue));
    }

    for row in &quarterly_rows {
        if let Period::Quarter(quarter) = row.period {
            if let Some(eps) = row.eps {
                data.quarterly_eps
                    .push(EarningsRecord::quarterly(row.fiscal_year, quarter, eps));
            }
            data.quarterly_revenue.push(EarningsRecord::quarterly(
                row.fiscal_year,
                quarter,
                row.revenue,
            ));
        }
    }

    sort_latest_first(&mut data.annual_eps);
    sort_latest_first(&mut data.annual_revenue);
    sort_latest_first(&mut data.quarterly_eps);
    sort_latest_first(&mut data.quarterly_revenue);

    if let Some(profile) = profile_object(profile_json) {
        data.market_cap = first_present(profile, MARKET_CAP_FIELDS)
            .and_then(to_number)
            .filter(|cap| *cap > 0.0)
            .map(|cap| round_half_up(cap, 0) as u64);

        data.ipo_date = first_present(profile, IPO_DATE_FIELDS)
            .and_then(to_text)
            .map(|s| s.trim().to_string())
            .filter(|s| ISO_DATE.is_match(s));
    }

    Ok(data)
}

/// Keeps US-listed matches only.
pub fn normalize_search(json: &Value) -> Vec<SearchResult> {
    let Some(items) = json.as_array() else {
        return vec![];
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .filter(|item| {
            first_present(item, EXCHANGE_FIELDS)
                .and_then(to_text)
                .is_some_and(|exchange| US_EXCHANGES.contains(&exchange.as_str()))
        })
        .take(SEARCH_RESULTS_LIMIT)
        .map(|item| SearchResult {
            symbol: item.get("symbol").and_then(to_text).unwrap_or_default(),
            name: first_present(item, NAME_FIELDS)
                .and_then(to_text)
                .unwrap_or_default(),
        })
        .collect()
}

fn parse_rows(items: &[Value]) -> Vec<StatementRow> {
    let rows: Vec<StatementRow> = items.iter().filter_map(StatementRow::from_json).collect();
    if rows.len() < items.len() {
        debug!(
            "[Normalize] Rejected {} of {} statement rows",
            items.len() - rows.len(),
            items.len()
        );
    }

    rows
}

fn parse_period(period: &str) -> Option<Period> {
    if period == "FY" {
        return Some(Period::FiscalYear);
    }

    QUARTER_PERIOD
        .captures(period)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .map(Period::Quarter)
}

/// Fiscal year first, then calendar year, then the year part of `date`.
/// Empty and zero values fall through to the next source.
fn resolve_fiscal_year(row: &Map<String, Value>) -> Option<i32> {
    for fields in [FISCAL_YEAR_FIELDS, CALENDAR_YEAR_FIELDS] {
        if let Some(v) = first_present(row, fields) {
            if is_truthy(v) {
                return to_text(v).and_then(|s| parse_leading_int(&s));
            }
        }
    }

    row.get("date")
        .and_then(Value::as_str)
        .and_then(|date| date.split('-').next())
        .and_then(parse_leading_int)
}

fn profile_object(json: &Value) -> Option<&Map<String, Value>> {
    match json {
        Value::Array(items) => items.first().and_then(Value::as_object),
        Value::Object(obj) => Some(obj),
        _ => None,
    }
}

fn first_present<'a>(row: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .find_map(|field| row.get(*field).filter(|v| !v.is_null()))
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Finite numbers, including numeric strings; an empty string counts as zero.
fn to_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { 0.0 } else { s.parse::<f64>().ok()? }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };

    n.is_finite().then_some(n)
}

fn to_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    format!("{sign}{}", &digits[..end]).parse::<i32>().ok()
}

fn sort_latest_first(records: &mut [EarningsRecord]) {
    records.sort_by(|a, b| {
        (b.fiscal_year, b.fiscal_quarter).cmp(&(a.fiscal_year, a.fiscal_quarter))
    });
}

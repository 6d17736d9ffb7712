//! Fiscal-year × quarter tables annotated with year-over-year change.

use std::collections::{BTreeMap, BTreeSet};

use crate::{data::earnings::EarningsRecord, utils::math::pct_change};

/// How many of the most recent fiscal years a table shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum YearWindow {
    #[strum(to_string = "3Y", serialize = "3")]
    Three,
    #[default]
    #[strum(to_string = "5Y", serialize = "5")]
    Five,
    #[strum(to_string = "10Y", serialize = "10")]
    Ten,
    #[strum(to_string = "All")]
    All,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoyCell {
    pub value: f64,
    /// Percent change against the same period one fiscal year earlier.
    pub yoy: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct YoyRow {
    pub fiscal_year: i32,
    pub quarters: [Option<YoyCell>; 4],
    pub total: Option<YoyCell>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct YoyTable {
    /// Oldest fiscal year first.
    pub rows: Vec<YoyRow>,
}

impl YearWindow {
    pub fn years(&self) -> Option<usize> {
        match self {
            Self::Three => Some(3),
            Self::Five => Some(5),
            Self::Ten => Some(10),
            Self::All => None,
        }
    }
}

impl YoyTable {
    /// Years outside `window` are hidden but still serve as the base of the
    /// first visible year's change.
    pub fn build(
        quarterly: &[EarningsRecord],
        annual: &[EarningsRecord],
        window: YearWindow,
    ) -> Self {
        let mut quarter_values: BTreeMap<i32, BTreeMap<u8, f64>> = BTreeMap::new();
        for record in quarterly {
            if let Some(quarter) = record.fiscal_quarter.filter(|q| (1..=4).contains(q)) {
                quarter_values
                    .entry(record.fiscal_year)
                    .or_default()
                    .insert(quarter, record.value);
            }
        }

        let annual_values: BTreeMap<i32, f64> = annual
            .iter()
            .map(|record| (record.fiscal_year, record.value))
            .collect();

        let years: BTreeSet<i32> = quarter_values
            .keys()
            .chain(annual_values.keys())
            .copied()
            .collect();
        let skip = window
            .years()
            .map(|n| years.len().saturating_sub(n))
            .unwrap_or(0);

        let quarter_value = |year: i32, quarter: u8| -> Option<f64> {
            quarter_values
                .get(&year)
                .and_then(|values| values.get(&quarter))
                .copied()
        };

        let rows = years
            .iter()
            .skip(skip)
            .map(|&year| YoyRow {
                fiscal_year: year,
                quarters: std::array::from_fn(|i| {
                    let quarter = i as u8 + 1;
                    quarter_value(year, quarter).map(|value| YoyCell {
                        value,
                        yoy: quarter_value(year - 1, quarter)
                            .and_then(|previous| pct_change(value, previous)),
                    })
                }),
                total: annual_values.get(&year).map(|&value| YoyCell {
                    value,
                    yoy: annual_values
                        .get(&(year - 1))
                        .and_then(|&previous| pct_change(value, previous)),
                }),
            })
            .collect();

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn q(year: i32, quarter: u8, value: f64) -> EarningsRecord {
        EarningsRecord::quarterly(year, quarter, value)
    }

    fn fy(year: i32, value: f64) -> EarningsRecord {
        EarningsRecord::annual(year, value)
    }

    #[test]
    fn test_quarter_yoy() {
        let table = YoyTable::build(&[q(2024, 1, 1.25), q(2023, 1, 1.00)], &[], YearWindow::All);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].fiscal_year, 2023);
        assert_eq!(
            table.rows[0].quarters[0],
            Some(YoyCell {
                value: 1.0,
                yoy: None
            })
        );
        assert_eq!(table.rows[1].fiscal_year, 2024);
        assert_eq!(
            table.rows[1].quarters[0],
            Some(YoyCell {
                value: 1.25,
                yoy: Some(25.0)
            })
        );
        assert_eq!(table.rows[1].quarters[1], None);
        assert_eq!(table.rows[1].total, None);
    }

    #[test]
    fn test_yoy_absent_for_zero_or_missing_base() {
        let table = YoyTable::build(
            &[q(2022, 2, 0.0), q(2023, 2, 0.4), q(2023, 3, 0.2), q(2021, 3, 0.1)],
            &[fy(2021, 0.0), fy(2022, 1.0), fy(2023, -1.0)],
            YearWindow::All,
        );

        let row_2023 = &table.rows[2];
        assert_eq!(row_2023.fiscal_year, 2023);
        assert_eq!(row_2023.quarters[1].unwrap().yoy, None);
        assert_eq!(row_2023.quarters[2].unwrap().yoy, None);
        assert_eq!(row_2023.total.unwrap().yoy, Some(-200.0));

        let row_2022 = &table.rows[1];
        assert_eq!(row_2022.total.unwrap().yoy, None);
    }

    #[test]
    fn test_negative_base_uses_magnitude() {
        let table = YoyTable::build(&[], &[fy(2022, -2.0), fy(2023, -1.0)], YearWindow::All);

        assert_eq!(table.rows[1].total.unwrap().yoy, Some(50.0));
    }

    #[test]
    fn test_window_keeps_latest_years() {
        let annual: Vec<EarningsRecord> = (2015..=2024).map(|y| fy(y, (y - 2014) as f64)).collect();

        let table = YoyTable::build(&[q(2012, 4, 1.0)], &annual, YearWindow::Three);
        let years: Vec<i32> = table.rows.iter().map(|r| r.fiscal_year).collect();
        assert_eq!(years, vec![2022, 2023, 2024]);
        assert_eq!(table.rows[0].total.unwrap().yoy, Some((8.0 - 7.0) / 7.0 * 100.0));

        let table = YoyTable::build(&[q(2012, 4, 1.0)], &annual, YearWindow::All);
        assert_eq!(table.rows.len(), 11);
        assert_eq!(table.rows[0].fiscal_year, 2012);
        assert_eq!(table.rows[0].total, None);

        let table = YoyTable::build(&[], &annual[..2], YearWindow::Ten);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(YoyTable::build(&[], &[], YearWindow::Five).is_empty());
    }

    #[test]
    fn test_year_window_parse() {
        assert_eq!(YearWindow::from_str("3").unwrap(), YearWindow::Three);
        assert_eq!(YearWindow::from_str("10y").unwrap(), YearWindow::Ten);
        assert_eq!(YearWindow::from_str("ALL").unwrap(), YearWindow::All);
        assert!(YearWindow::from_str("7").is_err());
        assert_eq!(YearWindow::Five.to_string(), "5Y");
        assert_eq!(YearWindow::default(), YearWindow::Five);
    }
}

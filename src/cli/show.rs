use colored::Colorize;
use fundaview::{
    api,
    data::earnings::EarningsData,
    report::{YearWindow, YoyTable},
    utils::format::{Tone, eps_tone, format_eps, format_usd, format_yoy, revenue_tone},
};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::settings::{
    Alignment, Color,
    object::{Columns, Object, Rows},
};
use tokio::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Metric {
    #[default]
    All,
    Eps,
    Revenue,
}

#[derive(clap::Args)]
pub struct ShowCommand {
    symbol: String,

    #[arg(
        short = 'y',
        long = "years",
        help = "Fiscal years to show: 3, 5, 10 or all, the default value comes from config"
    )]
    years: Option<YearWindow>,

    #[arg(
        short = 'm',
        long = "metric",
        default_value_t = Metric::All,
        help = "Metric to show: eps, revenue or all"
    )]
    metric: Metric,
}

impl ShowCommand {
    pub async fn exec(&self) {
        let window = match self.years {
            Some(years) => years,
            None => match api::get_config().await {
                Ok(config) => config.default_years,
                Err(_) => YearWindow::default(),
            },
        };

        let spinner = ProgressBar::new_spinner();
        spinner
            .set_style(ProgressStyle::with_template("[{elapsed}] {msg} {spinner:.cyan}").unwrap());
        spinner.set_message(api::normalize_symbol(&self.symbol));
        spinner.enable_steady_tick(Duration::from_millis(100));

        match api::earnings(&self.symbol).await {
            Ok(data) => {
                spinner.finish_and_clear();

                let groups = api::bookmarked_in(&data.symbol).await.unwrap_or_default();
                let name = api::bookmarks(groups.first().map(String::as_str))
                    .await
                    .unwrap_or_default()
                    .into_iter()
                    .find(|b| b.symbol == data.symbol)
                    .map(|b| b.name);

                print_earnings(&data, name.as_deref(), &groups, self.metric, window);
            }
            Err(err) => {
                spinner.finish_with_message(format!("{} ", err.to_string().red()));
            }
        }
    }
}

pub fn print_earnings(
    data: &EarningsData,
    name: Option<&str>,
    groups: &[String],
    metric: Metric,
    window: YearWindow,
) {
    let mut table_data: Vec<Vec<String>> = vec![vec!["Symbol".to_string(), data.symbol.clone()]];
    if let Some(name) = name {
        table_data.push(vec!["Name".to_string(), name.to_string()]);
    }
    table_data.push(vec![
        "Market Cap".to_string(),
        data.market_cap
            .map(|cap| format_usd(cap as f64))
            .unwrap_or("-".to_string()),
    ]);
    table_data.push(vec![
        "IPO Date".to_string(),
        data.ipo_date.clone().unwrap_or("-".to_string()),
    ]);
    table_data.push(vec![
        "Bookmarks".to_string(),
        if groups.is_empty() {
            "☆".to_string()
        } else {
            format!("★ {}", groups.join(", "))
        },
    ]);

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Columns::first(), Color::FG_CYAN);
    println!("{table}");

    if data.is_empty() {
        println!("[!] {}", "No earnings data".yellow());
        return;
    }

    if metric != Metric::Revenue {
        print_yoy_table(
            &format!("EPS (GAAP Diluted, {window})"),
            &api::eps_table(data, window),
            format_eps,
            eps_tone,
        );
    }

    if metric != Metric::Eps {
        print_yoy_table(
            &format!("Revenue ({window})"),
            &api::revenue_table(data, window),
            format_usd,
            revenue_tone,
        );
    }
}

fn print_yoy_table(
    title: &str,
    yoy_table: &YoyTable,
    format_value: fn(f64) -> String,
    tone: fn(f64) -> Tone,
) {
    println!("\n{}", title.bold());

    if yoy_table.is_empty() {
        println!("[!] {}", "No data".yellow());
        return;
    }

    let mut table_data: Vec<Vec<String>> = vec![
        ["FY", "Q1", "Q2", "Q3", "Q4", "Total"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    ];
    let mut cell_tones: Vec<(usize, usize, Tone)> = vec![];

    for (i, row) in yoy_table.rows.iter().enumerate() {
        let mut row_data = vec![row.fiscal_year.to_string()];

        for (j, cell) in row.quarters.iter().chain([&row.total]).enumerate() {
            match cell {
                Some(cell) => match cell.yoy {
                    Some(yoy) => {
                        row_data.push(format!("{}\n{}", format_value(cell.value), format_yoy(yoy)));
                        cell_tones.push((i + 1, j + 1, tone(yoy)));
                    }
                    None => row_data.push(format_value(cell.value)),
                },
                None => row_data.push("-".to_string()),
            }
        }

        table_data.push(row_data);
    }

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
    table.modify(Columns::new(1..), Alignment::right());
    for (row, col, tone) in cell_tones {
        let color = match tone {
            Tone::Strong | Tone::Positive => Color::FG_GREEN,
            Tone::Flat => Color::FG_BRIGHT_BLACK,
            Tone::Negative => Color::FG_RED,
        };
        table.modify(
            Rows::new(row..row + 1).intersect(Columns::new(col..col + 1)),
            color,
        );
    }
    println!("{table}");
}

use colored::Colorize;
use fundaview::{api, data::earnings::SearchResult};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::settings::{Color, object::Columns};
use tokio::time::Duration;

#[derive(clap::Args)]
pub struct SearchCommand {
    #[arg(help = "Symbol or company name, e.g. AAPL or Apple")]
    query: String,
}

impl SearchCommand {
    pub async fn exec(&self) {
        let spinner = ProgressBar::new_spinner();
        spinner
            .set_style(ProgressStyle::with_template("[{elapsed}] {msg} {spinner:.cyan}").unwrap());
        spinner.set_message(self.query.trim().to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        match api::search(&self.query).await {
            Ok(results) => {
                spinner.finish_and_clear();
                print_search_results(&results);
            }
            Err(err) => {
                spinner.finish_with_message(format!("{} ", err.to_string().red()));
            }
        }
    }
}

pub fn print_search_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("[!] {}", "No matching ticker".yellow());
        return;
    }

    let table_data: Vec<Vec<String>> = results
        .iter()
        .map(|result| vec![result.symbol.to_string(), result.name.to_string()])
        .collect();

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Columns::first(), Color::FG_CYAN);
    println!("{table}");
}

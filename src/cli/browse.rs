use colored::Colorize;
use fundaview::{
    api::{self, EarningsSession, LoadEvent},
    report::YearWindow,
    utils::debounce::Debouncer,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::Duration,
};

use super::{
    search::print_search_results,
    show::{Metric, print_earnings},
};

const SEARCH_DEBOUNCE_MS: u64 = 500;

enum Input {
    Line(std::io::Result<Option<String>>),
    Event(Option<LoadEvent>),
}

#[derive(clap::Args)]
pub struct BrowseCommand {
    #[arg(
        short = 'y',
        long = "years",
        help = "Fiscal years to show: 3, 5, 10 or all, the default value comes from config"
    )]
    years: Option<YearWindow>,
}

impl BrowseCommand {
    pub async fn exec(&self) {
        let window = match self.years {
            Some(years) => years,
            None => match api::get_config().await {
                Ok(config) => config.default_years,
                Err(_) => YearWindow::default(),
            },
        };

        let client = match api::client().await {
            Ok(client) => client,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };

        println!(
            "{}",
            "Type '?<query>' to search, a symbol to view it, ':q' to quit".bright_black()
        );

        let mut session = EarningsSession::new(client.clone());
        let mut debouncer = Debouncer::new(Duration::from_millis(SEARCH_DEBOUNCE_MS));
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut awaiting = false;

        loop {
            let input = tokio::select! {
                line = lines.next_line() => Input::Line(line),
                event = session.next_event(), if awaiting => Input::Event(event),
            };

            match input {
                Input::Line(Err(err)) => {
                    println!("[!] {}", err.to_string().red());
                    break;
                }
                Input::Line(Ok(None)) => {
                    if awaiting {
                        if let Some(event) = session.next_event().await {
                            render_event(event, window).await;
                        }
                    }
                    break;
                }
                Input::Line(Ok(Some(line))) => {
                    let line = line.trim();

                    if line == ":q" || line.eq_ignore_ascii_case("quit") {
                        break;
                    }

                    if let Some(query) = line.strip_prefix('?') {
                        let client = client.clone();
                        debouncer.schedule_query(query, |query| async move {
                            match client.search_symbol(&query).await {
                                Ok(results) => print_search_results(&results),
                                Err(err) => println!("[!] {}", err.to_string().red()),
                            }
                        });
                    } else if line.is_empty() {
                        session.clear();
                        awaiting = false;
                    } else {
                        let symbol = api::normalize_symbol(line);
                        println!("{} {}", "Loading".bright_black(), symbol.cyan());
                        session.select(&symbol);
                        awaiting = true;
                    }
                }
                Input::Event(event) => {
                    awaiting = false;
                    if let Some(event) = event {
                        render_event(event, window).await;
                    }
                }
            }
        }
    }
}

async fn render_event(event: LoadEvent, window: YearWindow) {
    match event {
        LoadEvent::Loaded(data) => {
            let groups = api::bookmarked_in(&data.symbol).await.unwrap_or_default();
            print_earnings(&data, None, &groups, Metric::All, window);
        }
        LoadEvent::Failed { symbol, message } => {
            println!("[!] {} {}", symbol.cyan(), message.red());
        }
    }
}

use clap::Subcommand;

mod bookmark;
mod browse;
mod config;
mod search;
mod show;

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Manage bookmarked tickers")]
    #[clap(visible_aliases = &["bm"])]
    Bookmark(Box<bookmark::BookmarkCommand>),

    #[command(about = "Search and view tickers interactively")]
    Browse(Box<browse::BrowseCommand>),

    #[command(subcommand, about = "Show or change configurations")]
    Config(Box<config::ConfigCommand>),

    #[command(about = "Search US-listed tickers by symbol or company name")]
    #[clap(visible_aliases = &["find"])]
    Search(Box<search::SearchCommand>),

    #[command(about = "Show EPS and revenue with year-over-year change")]
    #[clap(visible_aliases = &["view"])]
    Show(Box<show::ShowCommand>),
}

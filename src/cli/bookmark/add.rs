use colored::Colorize;
use fundaview::api;

use super::list::print_bookmarks;

#[derive(clap::Args)]
pub struct BookmarkAddCommand {
    symbol: String,

    #[arg(short = 'n', long = "name", help = "Display name, the default value is the symbol")]
    name: Option<String>,

    #[arg(
        short = 'g',
        long = "group",
        help = "Bookmark group, the default value is 'Default'"
    )]
    group: Option<String>,
}

impl BookmarkAddCommand {
    pub async fn exec(&self) {
        if let Err(err) =
            api::add_bookmark(&self.symbol, self.name.as_deref(), self.group.as_deref()).await
        {
            println!("[!] {}", err.to_string().red());
            return;
        }

        let symbol = api::normalize_symbol(&self.symbol);
        match api::bookmarks(None).await {
            Ok(bookmarks) => {
                let bookmarks: Vec<_> = bookmarks
                    .into_iter()
                    .filter(|b| b.symbol == symbol)
                    .collect();
                print_bookmarks(bookmarks);
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}

use colored::Colorize;
use fundaview::api;

#[derive(clap::Args)]
pub struct BookmarkRemoveCommand {
    symbol: String,

    #[arg(
        short = 'g',
        long = "group",
        help = "Bookmark group, the default value is 'Default'"
    )]
    group: Option<String>,
}

impl BookmarkRemoveCommand {
    pub async fn exec(&self) {
        match api::is_bookmarked(&self.symbol, self.group.as_deref()).await {
            Ok(true) => {}
            Ok(false) => {
                let symbol = api::normalize_symbol(&self.symbol);
                println!(
                    "[!] {}",
                    format!("{symbol} is not bookmarked in this group").yellow()
                );
                return;
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        }

        match api::remove_bookmark(&self.symbol, self.group.as_deref()).await {
            Ok(_) => {
                println!(
                    "[✔] {} {}",
                    api::normalize_symbol(&self.symbol).cyan(),
                    self.group
                        .as_deref()
                        .unwrap_or(api::DEFAULT_BOOKMARK_GROUP)
                        .trim()
                );
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}

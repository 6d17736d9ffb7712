use colored::Colorize;
use fundaview::{api, data::bookmark::Bookmark};
use tabled::settings::{
    Color,
    object::{Columns, Object, Rows},
};

#[derive(clap::Args)]
pub struct BookmarkListCommand {
    #[arg(short = 'g', long = "group", help = "Only list this group")]
    group: Option<String>,
}

impl BookmarkListCommand {
    pub async fn exec(&self) {
        match api::bookmarks(self.group.as_deref()).await {
            Ok(bookmarks) => {
                if bookmarks.is_empty() {
                    println!(
                        "[!] {}",
                        "No bookmark yet, add one with 'bookmark add <SYMBOL>'".yellow()
                    );
                } else {
                    print_bookmarks(bookmarks);
                }
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}

pub fn print_bookmarks(mut bookmarks: Vec<Bookmark>) {
    bookmarks.sort_by(|a, b| {
        natord::compare(&a.group, &b.group).then_with(|| natord::compare(&a.symbol, &b.symbol))
    });

    let mut table_data: Vec<Vec<String>> = vec![vec![
        "Group".to_string(),
        "Symbol".to_string(),
        "Name".to_string(),
    ]];
    for bookmark in bookmarks {
        table_data.push(vec![bookmark.group, bookmark.symbol, bookmark.name]);
    }

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::new(1..2).not(Rows::first()), Color::FG_CYAN);
    println!("{table}");
}

use colored::Colorize;
use fundaview::api;
use tabled::settings::{Alignment, Color, object::Columns};

#[derive(clap::Args)]
pub struct BookmarkGroupsCommand;

impl BookmarkGroupsCommand {
    pub async fn exec(&self) {
        let groups = match api::bookmark_groups().await {
            Ok(groups) => groups,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };

        match api::bookmarks(None).await {
            Ok(bookmarks) => {
                if groups.is_empty() {
                    println!("[!] {}", "No bookmark group yet".yellow());
                    return;
                }

                let table_data: Vec<Vec<String>> = groups
                    .into_iter()
                    .map(|group| {
                        let count = bookmarks.iter().filter(|b| b.group == group).count();
                        vec![group, count.to_string()]
                    })
                    .collect();

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                table.modify(Columns::new(1..), Alignment::right());
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}

use clap::Subcommand;

mod add;
mod groups;
mod list;
mod remove;

#[derive(Subcommand)]
pub enum BookmarkCommand {
    #[command(about = "Bookmark a ticker into a group")]
    Add(Box<add::BookmarkAddCommand>),

    #[command(about = "List bookmark groups")]
    Groups(Box<groups::BookmarkGroupsCommand>),

    #[command(about = "List bookmarked tickers")]
    #[clap(visible_aliases = &["ls"])]
    List(Box<list::BookmarkListCommand>),

    #[command(about = "Remove a ticker from a group")]
    #[clap(visible_aliases = &["rm"])]
    Remove(Box<remove::BookmarkRemoveCommand>),
}

impl BookmarkCommand {
    pub async fn exec(&self) {
        match self {
            BookmarkCommand::Add(cmd) => {
                cmd.exec().await;
            }
            BookmarkCommand::Groups(cmd) => {
                cmd.exec().await;
            }
            BookmarkCommand::List(cmd) => {
                cmd.exec().await;
            }
            BookmarkCommand::Remove(cmd) => {
                cmd.exec().await;
            }
        }
    }
}

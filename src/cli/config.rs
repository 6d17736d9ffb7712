use clap::Subcommand;

mod set;
mod show;
mod unset;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Set configuration, e.g. config set api_key <KEY>")]
    Set(Box<set::ConfigSetCommand>),

    #[command(about = "Show configurations")]
    Show(Box<show::ConfigShowCommand>),

    #[command(about = "Restore a configuration to its default, or forget the API key")]
    Unset(Box<unset::ConfigUnsetCommand>),
}

impl ConfigCommand {
    pub async fn exec(&self) {
        match self {
            ConfigCommand::Set(cmd) => {
                cmd.exec().await;
            }
            ConfigCommand::Show(cmd) => {
                cmd.exec().await;
            }
            ConfigCommand::Unset(cmd) => {
                cmd.exec().await;
            }
        }
    }
}

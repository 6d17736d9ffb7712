use colored::Colorize;
use fundaview::api;

#[derive(clap::Args)]
pub struct ConfigUnsetCommand {
    key: String,
}

impl ConfigUnsetCommand {
    pub async fn exec(&self) {
        match api::unset_config(&self.key).await {
            Ok(_) => {
                println!("[✔] {}", self.key.to_lowercase().cyan());
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}

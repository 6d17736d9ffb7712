use colored::Colorize;
use fundaview::api;
use tabled::settings::{Color, object::Columns};

use super::show::mask_secret;

#[derive(clap::Args)]
pub struct ConfigSetCommand {
    key: String,
    value: String,
}

impl ConfigSetCommand {
    pub async fn exec(&self) {
        match api::set_config(&self.key, &self.value).await {
            Ok(_) => {
                let key = self.key.to_lowercase();
                let value = if key == api::API_KEY_CONFIG_NAME {
                    mask_secret(self.value.trim())
                } else {
                    self.value.trim().to_string()
                };
                let table_data: Vec<Vec<String>> = vec![vec![key, value]];

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}

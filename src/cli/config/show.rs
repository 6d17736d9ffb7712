use colored::Colorize;
use fundaview::api;
use tabled::settings::{Color, object::Columns};

#[derive(clap::Args)]
pub struct ConfigShowCommand;

impl ConfigShowCommand {
    pub async fn exec(&self) {
        let api_key = match api::get_api_key().await {
            Ok(api_key) => api_key,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };

        match api::get_config().await {
            Ok(config) => {
                let mut table_data: Vec<Vec<String>> = vec![vec![
                    api::API_KEY_CONFIG_NAME.to_string(),
                    api_key
                        .map(|key| mask_secret(&key))
                        .unwrap_or("-".to_string()),
                ]];
                for (key, value) in config.entries() {
                    table_data.push(vec![key.to_string(), value]);
                }
                table_data.push(vec![
                    "store".to_string(),
                    api::get_store_path().to_string_lossy().to_string(),
                ]);

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

pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "*".repeat(secret.chars().count())
    } else {
        format!("{visible}****")
    }
}

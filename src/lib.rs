//! # fundaview lib

use std::{env, path::PathBuf, sync::LazyLock};

use directories::ProjectDirs;
use tokio::sync::RwLock;

use crate::config::FvConfig;

pub mod api;
pub mod bookmark;
pub mod cache;
pub mod config;
pub mod data;
pub mod ds;
pub mod error;
pub mod report;
pub mod session;
pub mod store;
pub mod utils;

mod financial;

pub static CHANNEL_BUFFER_DEFAULT: usize = 64;

pub async fn init() {
    env_logger::Builder::new()
        .parse_filters(env::var("LOG").as_deref().unwrap_or("off"))
        .init();

    match FvConfig::load() {
        Ok(config) => {
            *CONFIG.write().await = config;
        }
        Err(err) => panic!("Load config error: {err}"),
    }
}

static CONFIG: LazyLock<RwLock<FvConfig>> = LazyLock::new(|| RwLock::new(FvConfig::default()));

static STORE_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    match ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
        Some(proj_dirs) => proj_dirs.data_dir().to_path_buf(),
        None => env::current_dir().expect("Unable to get current directory!"),
    }
    .join("store.db")
});

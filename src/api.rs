use std::{path::PathBuf, sync::Arc};

use log::debug;

use crate::{
    CONFIG, STORE_PATH,
    bookmark::BookmarkStore,
    cache::Cache,
    config::FvConfig,
    data::{
        bookmark::Bookmark,
        earnings::{EarningsData, SearchResult},
    },
    ds::fmp::FmpClient,
    error::{FvError, FvResult},
    report::{YearWindow, YoyTable},
    store::{LibsqlStore, SharedStore, namespaced},
};

pub use crate::session::{EarningsSession, LoadEvent};

pub static API_KEY_CONFIG_NAME: &str = "api_key";
pub static DEFAULT_BOOKMARK_GROUP: &str = "Default";

pub fn get_store_path() -> PathBuf {
    STORE_PATH.to_path_buf()
}

pub async fn open_store() -> FvResult<SharedStore> {
    Ok(Arc::new(LibsqlStore::open(&STORE_PATH).await?))
}

pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

pub async fn get_api_key() -> FvResult<Option<String>> {
    let store = open_store().await?;
    Ok(store
        .get(&namespaced(API_KEY_CONFIG_NAME))
        .await?
        .filter(|key| !key.trim().is_empty()))
}

pub async fn set_api_key(api_key: &str) -> FvResult<()> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(FvError::Invalid {
            code: "EMPTY_API_KEY",
            message: "API key cannot be empty".to_string(),
        });
    }

    let store = open_store().await?;
    store.set(&namespaced(API_KEY_CONFIG_NAME), api_key).await
}

pub async fn remove_api_key() -> FvResult<()> {
    let store = open_store().await?;
    store.delete(&namespaced(API_KEY_CONFIG_NAME)).await
}

pub async fn get_config() -> FvResult<FvConfig> {
    Ok(CONFIG.read().await.clone())
}

/// `api_key` is kept in the local store, everything else in the config file.
pub async fn set_config(key: &str, value: &str) -> FvResult<()> {
    if key.eq_ignore_ascii_case(API_KEY_CONFIG_NAME) {
        return set_api_key(value).await;
    }

    let mut config = CONFIG.write().await;
    let mut updated = config.clone();
    updated.set(key, value)?;
    updated.save()?;
    *config = updated;

    Ok(())
}

pub async fn unset_config(key: &str) -> FvResult<()> {
    if key.eq_ignore_ascii_case(API_KEY_CONFIG_NAME) {
        return remove_api_key().await;
    }

    let mut config = CONFIG.write().await;
    let mut updated = config.clone();
    updated.reset(key)?;
    updated.save()?;
    *config = updated;

    Ok(())
}

pub async fn client() -> FvResult<Arc<FmpClient>> {
    let store = open_store().await?;
    let Some(api_key) = store
        .get(&namespaced(API_KEY_CONFIG_NAME))
        .await?
        .filter(|key| !key.trim().is_empty())
    else {
        return Err(FvError::NotExists {
            code: "API_KEY_NOT_EXISTS",
            message: format!(
                "API key is not set, run 'config set {API_KEY_CONFIG_NAME} <KEY>' first"
            ),
        });
    };

    let options = CONFIG.read().await.fmp_options();
    Ok(Arc::new(FmpClient::new(&api_key, options, Cache::new(store))))
}

pub async fn search(query: &str) -> FvResult<Vec<SearchResult>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(vec![]);
    }

    client().await?.search_symbol(query).await
}

pub async fn earnings(symbol: &str) -> FvResult<EarningsData> {
    let symbol = normalize_symbol(symbol);
    if symbol.is_empty() {
        return Err(FvError::Invalid {
            code: "EMPTY_SYMBOL",
            message: "Symbol cannot be empty".to_string(),
        });
    }
    debug!("[Earnings] {symbol}");

    client().await?.fetch_earnings(&symbol).await
}

pub async fn session() -> FvResult<EarningsSession> {
    Ok(EarningsSession::new(client().await?))
}

pub fn eps_table(data: &EarningsData, window: YearWindow) -> YoyTable {
    YoyTable::build(&data.quarterly_eps, &data.annual_eps, window)
}

pub fn revenue_table(data: &EarningsData, window: YearWindow) -> YoyTable {
    YoyTable::build(&data.quarterly_revenue, &data.annual_revenue, window)
}

pub async fn bookmarks(group: Option<&str>) -> FvResult<Vec<Bookmark>> {
    let bookmarks = BookmarkStore::new(open_store().await?).list().await?;

    Ok(match group {
        Some(group) => bookmarks
            .into_iter()
            .filter(|b| b.group == group.trim())
            .collect(),
        None => bookmarks,
    })
}

pub async fn bookmark_groups() -> FvResult<Vec<String>> {
    BookmarkStore::new(open_store().await?).groups().await
}

/// Groups that contain `symbol`.
pub async fn bookmarked_in(symbol: &str) -> FvResult<Vec<String>> {
    BookmarkStore::new(open_store().await?)
        .groups_of(symbol)
        .await
}

pub async fn is_bookmarked(symbol: &str, group: Option<&str>) -> FvResult<bool> {
    BookmarkStore::new(open_store().await?)
        .is_bookmarked(symbol, Some(group.unwrap_or(DEFAULT_BOOKMARK_GROUP)))
        .await
}

pub async fn add_bookmark(symbol: &str, name: Option<&str>, group: Option<&str>) -> FvResult<()> {
    let bookmark = Bookmark::new(
        symbol,
        name.unwrap_or_default(),
        group.unwrap_or(DEFAULT_BOOKMARK_GROUP),
    );

    BookmarkStore::new(open_store().await?).add(bookmark).await
}

pub async fn remove_bookmark(symbol: &str, group: Option<&str>) -> FvResult<()> {
    BookmarkStore::new(open_store().await?)
        .remove(symbol, group.unwrap_or(DEFAULT_BOOKMARK_GROUP))
        .await
}

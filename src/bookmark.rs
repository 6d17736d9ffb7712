use itertools::Itertools;
use log::warn;
use serde_json::Value;

use crate::{
    data::bookmark::Bookmark,
    error::{FvError, FvResult},
    store::{SharedStore, namespaced},
};

pub struct BookmarkStore {
    store: SharedStore,
    key: String,
}

impl BookmarkStore {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            key: namespaced("bookmarks"),
        }
    }

    /// Persisted bookmarks; unreadable records are skipped rather than failing
    /// the whole list.
    pub async fn list(&self) -> FvResult<Vec<Bookmark>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(vec![]);
        };

        Ok(parse_bookmarks(&raw))
    }

    pub async fn add(&self, bookmark: Bookmark) -> FvResult<()> {
        let group = bookmark.group.trim();
        if group.is_empty() {
            return Err(FvError::Invalid {
                code: "EMPTY_GROUP",
                message: "Bookmark group cannot be empty".to_string(),
            });
        }

        let symbol = bookmark.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(FvError::Invalid {
                code: "EMPTY_SYMBOL",
                message: "Bookmark symbol cannot be empty".to_string(),
            });
        }

        let mut bookmarks = self.list().await?;
        if bookmarks.iter().any(|b| b.same_identity(&symbol, group)) {
            return Ok(());
        }

        let name = bookmark.name.trim();
        bookmarks.push(Bookmark::new(
            &symbol,
            if name.is_empty() { symbol.as_str() } else { name },
            group,
        ));
        self.save(&bookmarks).await
    }

    pub async fn remove(&self, symbol: &str, group: &str) -> FvResult<()> {
        let symbol = symbol.trim().to_uppercase();
        let group = group.trim();

        let mut bookmarks = self.list().await?;
        bookmarks.retain(|b| !b.same_identity(&symbol, group));
        self.save(&bookmarks).await
    }

    /// Groups that contain `symbol`, in stored order.
    pub async fn groups_of(&self, symbol: &str) -> FvResult<Vec<String>> {
        let symbol = symbol.trim().to_uppercase();

        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|b| b.symbol == symbol)
            .map(|b| b.group)
            .collect())
    }

    pub async fn is_bookmarked(&self, symbol: &str, group: Option<&str>) -> FvResult<bool> {
        let groups = self.groups_of(symbol).await?;

        Ok(match group {
            Some(group) => groups.iter().any(|g| g == group.trim()),
            None => !groups.is_empty(),
        })
    }

    /// Group names in first-seen order.
    pub async fn groups(&self) -> FvResult<Vec<String>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|b| b.group)
            .unique()
            .collect())
    }

    async fn save(&self, bookmarks: &[Bookmark]) -> FvResult<()> {
        let raw = serde_json::to_string(bookmarks)?;
        self.store.set(&self.key, &raw).await
    }
}

fn parse_bookmarks(raw: &str) -> Vec<Bookmark> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("[Bookmarks] Persisted value is not a list, ignored");
            return vec![];
        }
        Err(err) => {
            warn!("[Bookmarks] Unable to parse persisted value: {err}");
            return vec![];
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Bookmark>(item) {
            Ok(mut bookmark) => {
                bookmark.symbol = bookmark.symbol.trim().to_uppercase();
                bookmark.group = bookmark.group.trim().to_string();
                if bookmark.symbol.is_empty() || bookmark.group.is_empty() {
                    return None;
                }
                if bookmark.name.trim().is_empty() {
                    bookmark.name = bookmark.symbol.clone();
                }

                Some(bookmark)
            }
            Err(err) => {
                warn!("[Bookmarks] Dropped corrupt record: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    fn new_store() -> (SharedStore, BookmarkStore) {
        let store: SharedStore = Arc::new(MemoryStore::new());
        (store.clone(), BookmarkStore::new(store))
    }

    #[tokio::test]
    async fn test_add_is_idempotent_per_symbol_and_group() {
        let (_, bookmarks) = new_store();

        bookmarks
            .add(Bookmark::new("AAPL", "Apple Inc.", "Tech"))
            .await
            .unwrap();
        bookmarks
            .add(Bookmark::new("aapl", "Apple", " Tech "))
            .await
            .unwrap();
        bookmarks
            .add(Bookmark::new("AAPL", "Apple Inc.", "Dividend"))
            .await
            .unwrap();

        let list = bookmarks.list().await.unwrap();
        assert_eq!(
            list,
            vec![
                Bookmark::new("AAPL", "Apple Inc.", "Tech"),
                Bookmark::new("AAPL", "Apple Inc.", "Dividend"),
            ]
        );
        assert_eq!(bookmarks.groups().await.unwrap(), vec!["Tech", "Dividend"]);
    }

    #[tokio::test]
    async fn test_add_rejects_empty_group() {
        let (_, bookmarks) = new_store();

        let result = bookmarks.add(Bookmark::new("MSFT", "Microsoft", "   ")).await;
        assert!(matches!(result, Err(FvError::Invalid { .. })));
        assert!(bookmarks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_only_matching_group() {
        let (_, bookmarks) = new_store();
        bookmarks
            .add(Bookmark::new("NVDA", "NVIDIA", "Tech"))
            .await
            .unwrap();
        bookmarks
            .add(Bookmark::new("NVDA", "NVIDIA", "Watch"))
            .await
            .unwrap();

        bookmarks.remove("NVDA", "Tech").await.unwrap();

        assert!(!bookmarks.is_bookmarked("NVDA", Some("Tech")).await.unwrap());
        assert!(bookmarks.is_bookmarked("NVDA", Some("Watch")).await.unwrap());
        assert!(bookmarks.is_bookmarked("nvda", None).await.unwrap());
        assert!(!bookmarks.is_bookmarked("AMD", None).await.unwrap());
        assert_eq!(bookmarks.groups_of(" nvda ").await.unwrap(), vec!["Watch"]);
    }

    #[tokio::test]
    async fn test_corrupt_records_are_dropped() {
        let (store, bookmarks) = new_store();
        store
            .set(
                "eps_bookmarks",
                r#"[
                    {"symbol": "AAPL", "name": "Apple", "group": "Tech"},
                    {"symbol": 42},
                    "garbage",
                    {"symbol": "IBM", "name": "IBM", "group": ""},
                    {"symbol": "KO", "group": "Dividend"}
                ]"#,
            )
            .await
            .unwrap();

        assert_eq!(
            bookmarks.list().await.unwrap(),
            vec![
                Bookmark::new("AAPL", "Apple", "Tech"),
                Bookmark::new("KO", "KO", "Dividend"),
            ]
        );
    }

    #[tokio::test]
    async fn test_unparseable_list_reads_as_empty() {
        let (store, bookmarks) = new_store();
        store.set("eps_bookmarks", "{oops").await.unwrap();

        assert!(bookmarks.list().await.unwrap().is_empty());

        bookmarks
            .add(Bookmark::new("AMZN", "Amazon", "Tech"))
            .await
            .unwrap();
        assert_eq!(bookmarks.list().await.unwrap().len(), 1);
    }
}

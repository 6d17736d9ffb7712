use serde::{Deserialize, Serialize};

/// A saved ticker; `(symbol, group)` identifies it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub group: String,
}

impl Bookmark {
    pub fn new(symbol: &str, name: &str, group: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            group: group.to_string(),
        }
    }

    pub fn same_identity(&self, symbol: &str, group: &str) -> bool {
        self.symbol == symbol && self.group == group
    }
}

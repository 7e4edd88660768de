use serde::{Deserialize, Deserializer};

/// Category label used when an item carries no theme.
pub const DEFAULT_THEME: &str = "General";

/// One digest entry as published in the feed document.
///
/// Items are immutable for the session. Read and liked state is never
/// stored on the item itself; see [`crate::storage::PersistedIdSet`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub theme: Option<String>,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// ISO-8601 timestamp or free text.
    #[serde(default)]
    pub date: Option<String>,
}

impl Item {
    /// The item's category label, falling back to `default` when the theme
    /// is absent or empty.
    pub fn theme_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.theme.as_deref() {
            Some(theme) if !theme.is_empty() => theme,
            _ => default,
        }
    }
}

/// The feed document: an optional generation timestamp and the items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<Item>,
}

/// `"items": null` is treated like a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Item>>::deserialize(deserializer)?.unwrap_or_default())
}

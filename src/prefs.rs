//! Persisted UI preference state
//!
//! Theme, panel visibility, and the two station watchlists live in a small
//! fjall keyspace under namespaced keys, JSON-encoded. Every read falls
//! back to a hard-coded default on missing or corrupt state; preferences
//! are never a reason to fail a request.

use crate::error::DepbriefError;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;
use tokio::task;
use tracing::warn;

const KEY_THEME: &str = "depbrief.theme";
const KEY_PANELS: &str = "depbrief.panels";
const KEY_WX_WATCHLIST: &str = "depbrief.wxlist";
const KEY_STASH_WATCHLIST: &str = "depbrief.stashlist";

/// Weather watchlist holds at most this many stations
pub const WEATHER_WATCHLIST_CAP: usize = 20;

/// Stash watchlist holds at most this many identifiers
pub const STASH_WATCHLIST_CAP: usize = 15;

/// Stations shown before the user has saved a watchlist
pub const DEFAULT_WEATHER_WATCHLIST: [&str; 5] = ["KLGA", "KJFK", "KEWR", "KTEB", "KHPN"];

/// Display theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Which panels the display currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelVisibility {
    pub weather: bool,
    pub routes: bool,
    pub rules: bool,
    pub search: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            weather: true,
            routes: true,
            rules: true,
            search: true,
        }
    }
}

/// Newest-first watchlist insert: de-duplicates, then truncates to `cap`.
#[must_use]
pub fn push_watchlist_entry(mut list: Vec<String>, ident: &str, cap: usize) -> Vec<String> {
    let ident = ident.trim().to_uppercase();
    if ident.is_empty() {
        return list;
    }
    list.retain(|existing| *existing != ident);
    list.insert(0, ident);
    list.truncate(cap);
    list
}

/// fjall-backed preference store.
pub struct PrefStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl PrefStore {
    /// Open (or create) the store at the given directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DepbriefError> {
        let keyspace = Config::new(path.as_ref())
            .open()
            .map_err(|e| DepbriefError::store(e.to_string()))?;
        let partition = keyspace
            .open_partition("prefs", PartitionCreateOptions::default())
            .map_err(|e| DepbriefError::store(e.to_string()))?;
        Ok(Self { keyspace, partition })
    }

    async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &'static str) -> Option<T> {
        let partition = self.partition.clone();
        let bytes = task::spawn_blocking(move || partition.get(key))
            .await
            .ok()?
            .ok()?;

        let bytes = bytes?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("corrupt preference under {key}: {e}; using default");
                None
            }
        }
    }

    async fn put<T: Serialize>(&self, key: &'static str, value: &T) -> Result<(), DepbriefError> {
        let encoded =
            serde_json::to_vec(value).map_err(|e| DepbriefError::store(e.to_string()))?;
        let partition = self.partition.clone();
        let keyspace = self.keyspace.clone();
        task::spawn_blocking(move || {
            partition.insert(key, encoded)?;
            keyspace.persist(PersistMode::Buffer)
        })
        .await
        .map_err(|e| DepbriefError::store(e.to_string()))?
        .map_err(|e: fjall::Error| DepbriefError::store(e.to_string()))
    }

    /// Current theme, defaulting to dark.
    pub async fn theme(&self) -> Theme {
        self.get(KEY_THEME).await.unwrap_or_default()
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), DepbriefError> {
        self.put(KEY_THEME, &theme).await
    }

    /// Current panel visibility, defaulting to everything visible.
    pub async fn panels(&self) -> PanelVisibility {
        self.get(KEY_PANELS).await.unwrap_or_default()
    }

    pub async fn set_panels(&self, panels: PanelVisibility) -> Result<(), DepbriefError> {
        self.put(KEY_PANELS, &panels).await
    }

    /// Weather watchlist, newest first.
    pub async fn weather_watchlist(&self) -> Vec<String> {
        self.get(KEY_WX_WATCHLIST).await.unwrap_or_else(|| {
            DEFAULT_WEATHER_WATCHLIST
                .iter()
                .map(ToString::to_string)
                .collect()
        })
    }

    /// Add a station to the weather watchlist; returns the updated list.
    pub async fn add_weather_station(&self, ident: &str) -> Result<Vec<String>, DepbriefError> {
        let list = push_watchlist_entry(
            self.weather_watchlist().await,
            ident,
            WEATHER_WATCHLIST_CAP,
        );
        self.put(KEY_WX_WATCHLIST, &list).await?;
        Ok(list)
    }

    /// Remove a station from the weather watchlist; returns the updated list.
    pub async fn remove_weather_station(&self, ident: &str) -> Result<Vec<String>, DepbriefError> {
        let ident = ident.trim().to_uppercase();
        let mut list = self.weather_watchlist().await;
        list.retain(|existing| *existing != ident);
        self.put(KEY_WX_WATCHLIST, &list).await?;
        Ok(list)
    }

    /// Stash watchlist (disabled feature set), newest first.
    pub async fn stash_watchlist(&self) -> Vec<String> {
        self.get(KEY_STASH_WATCHLIST).await.unwrap_or_default()
    }

    /// Add an identifier to the stash watchlist; returns the updated list.
    pub async fn add_stash_ident(&self, ident: &str) -> Result<Vec<String>, DepbriefError> {
        let list =
            push_watchlist_entry(self.stash_watchlist().await, ident, STASH_WATCHLIST_CAP);
        self.put(KEY_STASH_WATCHLIST, &list).await?;
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_store() -> PrefStore {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("depbrief-prefs-{}-{nanos}", std::process::id()));
        PrefStore::open(dir).unwrap()
    }

    #[test]
    fn test_push_newest_first_and_dedup() {
        let list = vec!["KJFK".to_string(), "KLGA".to_string()];
        let list = push_watchlist_entry(list, "klga", 20);
        assert_eq!(list, vec!["KLGA", "KJFK"]);
    }

    #[test]
    fn test_push_respects_cap() {
        let list = (0..20).map(|i| format!("K{i:03}")).collect();
        let list = push_watchlist_entry(list, "KNEW", 20);
        assert_eq!(list.len(), 20);
        assert_eq!(list[0], "KNEW");
        assert!(!list.contains(&"K019".to_string()));
    }

    #[test]
    fn test_push_ignores_blank_ident() {
        let list = vec!["KLGA".to_string()];
        assert_eq!(push_watchlist_entry(list.clone(), "  ", 20), list);
    }

    #[tokio::test]
    async fn test_theme_roundtrip_and_default() {
        let store = scratch_store();
        assert_eq!(store.theme().await, Theme::Dark);

        store.set_theme(Theme::Light).await.unwrap();
        assert_eq!(store.theme().await, Theme::Light);
    }

    #[tokio::test]
    async fn test_watchlist_defaults_until_saved() {
        let store = scratch_store();
        assert_eq!(store.weather_watchlist().await, DEFAULT_WEATHER_WATCHLIST);

        let list = store.add_weather_station("kbos").await.unwrap();
        assert_eq!(list[0], "KBOS");
        assert_eq!(store.weather_watchlist().await, list);
    }

    #[tokio::test]
    async fn test_remove_station() {
        let store = scratch_store();
        store.add_weather_station("KBOS").await.unwrap();
        let list = store.remove_weather_station("KBOS").await.unwrap();
        assert!(!list.contains(&"KBOS".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_value_falls_back_to_default() {
        let store = scratch_store();
        store
            .partition
            .insert(KEY_THEME, b"{not json".as_slice())
            .unwrap();
        assert_eq!(store.theme().await, Theme::Dark);
    }

    #[tokio::test]
    async fn test_stash_watchlist_cap() {
        let store = scratch_store();
        for i in 0..20 {
            store.add_stash_ident(&format!("F{i:02}")).await.unwrap();
        }
        let list = store.stash_watchlist().await;
        assert_eq!(list.len(), STASH_WATCHLIST_CAP);
        assert_eq!(list[0], "F19");
    }
}

//! The on-disk diary store.
//!
//! The store is a JSON document written by the upstream diary export:
//!
//! ```json
//! {"generatedAt": "2024-02-11T22:00:00Z", "events": [ ... ]}
//! ```
//!
//! Events are kept raw here and only normalized when a window is assembled.

use std::io;
use std::path::Path;

use diary_core::{Event, normalize_events, sort_events};
use serde_json::Value;

use crate::error::{ProviderError, ProviderResult};

/// Raw contents of a diary store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryStore {
    /// When the export was produced, if recorded.
    pub generated_at: Option<String>,
    /// Raw upstream event records.
    pub events: Vec<Value>,
}

impl DiaryStore {
    /// Parses a store document.
    ///
    /// A blank `generatedAt` is dropped and a non-array `events` is read as
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidStore` error if `text` is not JSON.
    pub fn parse(text: &str) -> ProviderResult<Self> {
        let raw: Value = serde_json::from_str(text).map_err(|e| {
            ProviderError::invalid_store("diary store is not valid JSON").with_source(e)
        })?;
        Ok(Self::from_value(&raw))
    }

    pub fn from_value(raw: &Value) -> Self {
        let generated_at = raw
            .get("generatedAt")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let events = raw
            .get("events")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Self {
            generated_at,
            events,
        }
    }

    /// Reads the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the file exists but cannot be read, or
    /// `InvalidStore` if it does not parse.
    pub async fn load(path: &Path) -> ProviderResult<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                let store = Self::parse(&text)?;
                tracing::debug!(
                    path = %path.display(),
                    events = store.events.len(),
                    "loaded diary store"
                );
                Ok(store)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no diary store, starting empty");
                Ok(Self::default())
            }
            Err(err) => Err(ProviderError::store_unavailable(format!(
                "failed to read {}",
                path.display()
            ))
            .with_source(err)),
        }
    }

    /// Every valid event in the store, in start order.
    pub fn normalized_events(&self) -> Vec<Event> {
        let mut events = normalize_events(&self.events);
        sort_events(&mut events);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STORE: &str = r#"{
        "generatedAt": " 2024-02-11T22:00:00Z ",
        "events": [
            {"id": "late", "title": "Late viewing", "start": "2024-02-14T17:00:00Z"},
            {"id": "early", "title": "Early valuation", "start": "2024-02-12T08:00:00Z"},
            {"id": "todo", "title": "Chase solicitor"},
            {"title": "No id"}
        ]
    }"#;

    #[test]
    fn parse_reads_header_and_events() {
        let store = DiaryStore::parse(STORE).unwrap();
        assert_eq!(store.generated_at.as_deref(), Some("2024-02-11T22:00:00Z"));
        assert_eq!(store.events.len(), 4);
    }

    #[test]
    fn parse_tolerates_odd_shapes() {
        let store = DiaryStore::parse(r#"{"generatedAt": "  ", "events": {"id": "x"}}"#).unwrap();
        assert_eq!(store, DiaryStore::default());

        let store = DiaryStore::parse("[]").unwrap();
        assert!(store.events.is_empty());
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = DiaryStore::parse("not json").unwrap_err();
        assert_eq!(err.kind(), crate::ProviderErrorKind::InvalidStore);
    }

    #[test]
    fn normalized_events_are_sorted_and_filtered() {
        let store = DiaryStore::parse(STORE).unwrap();
        let ids: Vec<_> = store
            .normalized_events()
            .into_iter()
            .map(|event| event.id)
            .collect();
        assert_eq!(ids, vec!["early", "late", "todo"]);
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiaryStore::load(&dir.path().join("diary.json")).await.unwrap();
        assert_eq!(store, DiaryStore::default());
    }

    #[tokio::test]
    async fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STORE.as_bytes()).unwrap();

        let store = DiaryStore::load(file.path()).await.unwrap();
        assert_eq!(store.events.len(), 4);
    }

    #[tokio::test]
    async fn load_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiaryStore::load(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), crate::ProviderErrorKind::StoreUnavailable);
    }
}

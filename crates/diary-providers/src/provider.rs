//! DiaryProvider trait definition.
//!
//! Providers turn a [`WindowRequest`] into a raw [`WindowPayload`]. They do
//! not build calendars; that stays with `diary_core` so every source goes
//! through the same normalization.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{ProviderError, ProviderResult};
use crate::store::DiaryStore;
use crate::week::WorkingWeek;
use crate::window::{WindowPayload, assemble_window};

/// A boxed future for async trait methods.
///
/// Keeps [`DiaryProvider`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Which window to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRequest {
    /// Any date inside the wanted week. `None` means the current week.
    pub start: Option<NaiveDate>,
    /// Reference clock for today and focus selection.
    pub now: DateTime<Utc>,
}

impl WindowRequest {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { start: None, now }
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// The working week this request resolves to.
    pub fn week(&self) -> WorkingWeek {
        WorkingWeek::containing(self.start.unwrap_or_else(|| self.now.date_naive()))
    }
}

/// A source of diary windows.
pub trait DiaryProvider: Send + Sync {
    /// Returns the name of this provider (e.g. "store").
    fn name(&self) -> &str;

    /// Fetches the raw window for a request.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the backing source cannot be read.
    fn fetch_window(&self, request: WindowRequest) -> BoxFuture<'_, ProviderResult<WindowPayload>>;

    /// Fetches a window as an explicit import.
    ///
    /// The default implementation fetches and flags the payload as imported.
    fn import_window(
        &self,
        request: WindowRequest,
    ) -> BoxFuture<'_, ProviderResult<WindowPayload>> {
        let fetch = self.fetch_window(request);
        Box::pin(async move {
            let mut payload = fetch.await?;
            payload.imported = true;
            tracing::info!(events = payload.event_count(), "imported diary window");
            Ok(payload)
        })
    }
}

/// Serves windows from a JSON diary store on disk.
#[derive(Debug, Clone)]
pub struct StoreProvider {
    path: PathBuf,
}

impl StoreProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiaryProvider for StoreProvider {
    fn name(&self) -> &str {
        "store"
    }

    fn fetch_window(&self, request: WindowRequest) -> BoxFuture<'_, ProviderResult<WindowPayload>> {
        Box::pin(async move {
            let store = DiaryStore::load(&self.path)
                .await
                .map_err(|e| e.with_provider(self.name()))?;
            Ok(assemble_window(&store, request.week(), request.now))
        })
    }
}

/// A provider that fails every fetch with the same error.
///
/// Stands in for the store when the client configuration is rejected.
#[derive(Debug)]
pub struct ErrorProvider {
    name: String,
    error: ProviderError,
}

impl ErrorProvider {
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl DiaryProvider for ErrorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_window(&self, _request: WindowRequest) -> BoxFuture<'_, ProviderResult<WindowPayload>> {
        let error =
            ProviderError::new(self.error.kind(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}

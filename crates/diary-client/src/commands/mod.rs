//! Subcommand implementations.
//!
//! Commands return their output so `main` owns printing and exit codes.

pub mod add;
pub mod config;
pub mod view;

use chrono::{DateTime, NaiveDate, Utc};
use diary_core::{Calendar, Composer};
use diary_providers::{DiaryProvider, ErrorProvider, ProviderError, StoreProvider, WindowRequest};

use crate::config::DiaryConfig;
use crate::error::ClientResult;
use crate::render::Renderer;

/// Everything a command needs, resolved from config and flags.
pub struct Context {
    pub provider: Box<dyn DiaryProvider>,
    pub renderer: Renderer,
    pub composer: Composer,
    pub json: bool,
    pub now: DateTime<Utc>,
}

impl Context {
    /// Builds a context reading from the configured store.
    ///
    /// A configuration that fails validation yields a provider that reports
    /// the problem on every fetch.
    pub fn from_config(config: &DiaryConfig, json: bool, now: DateTime<Utc>) -> Self {
        let provider: Box<dyn DiaryProvider> = match config.validate() {
            Ok(()) => {
                let path = config.store_path();
                tracing::debug!(store = %path.display(), "using diary store");
                Box::new(StoreProvider::new(path))
            }
            Err(reason) => {
                tracing::debug!(%reason, "configuration rejected, store disabled");
                Box::new(ErrorProvider::new("store", ProviderError::misconfigured(reason)))
            }
        };
        Self {
            provider,
            renderer: Renderer::new(config.display.no_events_text.clone()),
            composer: Composer::new(config.composer.clone()),
            json: json || config.display.json,
            now,
        }
    }

    pub fn request(&self, start: Option<NaiveDate>) -> WindowRequest {
        let request = WindowRequest::new(self.now);
        match start {
            Some(start) => request.with_start(start),
            None => request,
        }
    }

    /// Fetches and builds the calendar of the week containing `start`.
    pub async fn calendar(&self, start: Option<NaiveDate>) -> ClientResult<Calendar> {
        let payload = self.provider.fetch_window(self.request(start)).await?;
        Ok(payload.to_calendar(self.now)?)
    }
}

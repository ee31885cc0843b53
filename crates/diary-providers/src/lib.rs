//! DiaryProvider trait and implementations.
//!
//! ```text
//! ┌─────────────────┐
//! │   diary.json    │
//! └────────┬────────┘
//!          │ DiaryStore::load()
//!          ▼
//! ┌─────────────────┐
//! │  StoreProvider  │  DiaryProvider
//! └────────┬────────┘
//!          │ assemble_window(store, WorkingWeek, now)
//!          ▼
//! ┌─────────────────┐
//! │  WindowPayload  │
//! └────────┬────────┘
//!          │ diary_core::build_calendar()
//!          ▼
//! ┌─────────────────┐
//! │    Calendar     │
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use diary_providers::{DiaryProvider, StoreProvider, WindowRequest};
//!
//! async fn this_week(provider: &dyn DiaryProvider) -> ProviderResult<Calendar> {
//!     let now = chrono::Utc::now();
//!     provider.fetch_window(WindowRequest::new(now)).await?.to_calendar(now)
//! }
//! ```

pub mod error;
pub mod provider;
pub mod store;
pub mod week;
pub mod window;

pub use error::{ProviderError, ProviderErrorKind, ProviderResult};
pub use provider::{BoxFuture, DiaryProvider, ErrorProvider, StoreProvider, WindowRequest};
pub use store::DiaryStore;
pub use week::WorkingWeek;
pub use window::{DayPayload, WindowPayload, assemble_window};

//! Errors raised while reading a diary window.

use std::fmt;

use thiserror::Error;

/// What went wrong, independent of which provider hit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The store exists but could not be read.
    StoreUnavailable,
    /// The store was read but is not a diary document.
    InvalidStore,
    /// The provider was never usable, e.g. the configuration is rejected.
    Misconfigured,
    Internal,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StoreUnavailable => "store unavailable",
            Self::InvalidStore => "invalid store",
            Self::Misconfigured => "misconfigured",
            Self::Internal => "internal error",
        })
    }
}

/// A failed window fetch, tagged with the provider that raised it.
#[derive(Debug, Error)]
#[error("{}{kind}: {message}", provider_prefix(.provider))]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

fn provider_prefix(provider: &Option<String>) -> String {
    provider
        .as_ref()
        .map(|name| format!("[{}] ", name))
        .unwrap_or_default()
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::StoreUnavailable, message)
    }

    pub fn invalid_store(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidStore, message)
    }

    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Misconfigured, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Internal, message)
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

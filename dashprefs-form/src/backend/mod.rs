//! Backend seam for the preferences form
//!
//! The form only ever talks to the dashboard server through
//! [`PreferencesBackend`], and to its host page through [`PageReload`].

use std::sync::Arc;

use async_trait::async_trait;
use dashprefs_common::{DashboardSummary, PreferenceSet, ResourceScope, SearchQuery};
use thiserror::Error;

pub mod http;

pub use http::HttpBackend;

/// Dashboard server request errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Requests the preferences form issues against the dashboard server
#[async_trait]
pub trait PreferencesBackend: Send + Sync {
    /// `GET /api/{resourceUri}/preferences`
    async fn get_preferences(&self, scope: &ResourceScope) -> Result<PreferenceSet, BackendError>;

    /// Dashboard search, results in server order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DashboardSummary>, BackendError>;

    /// `PUT /api/{resourceUri}/preferences`
    async fn put_preferences(
        &self,
        scope: &ResourceScope,
        preferences: &PreferenceSet,
    ) -> Result<(), BackendError>;
}

/// Full reload of whatever page hosts the form
#[async_trait]
pub trait PageReload: Send + Sync {
    async fn reload(&self);
}

#[async_trait]
impl<T: PreferencesBackend + ?Sized> PreferencesBackend for Arc<T> {
    async fn get_preferences(&self, scope: &ResourceScope) -> Result<PreferenceSet, BackendError> {
        (**self).get_preferences(scope).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<DashboardSummary>, BackendError> {
        (**self).search(query).await
    }

    async fn put_preferences(
        &self,
        scope: &ResourceScope,
        preferences: &PreferenceSet,
    ) -> Result<(), BackendError> {
        (**self).put_preferences(scope, preferences).await
    }
}

#[async_trait]
impl<T: PageReload + ?Sized> PageReload for Arc<T> {
    async fn reload(&self) {
        (**self).reload().await
    }
}

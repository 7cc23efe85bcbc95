//! Dashboard server HTTP client

use std::time::Duration;

use async_trait::async_trait;
use dashprefs_common::config::ClientConfig;
use dashprefs_common::{DashboardSummary, PreferenceSet, ResourceScope, SearchQuery};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{BackendError, PreferencesBackend};

const USER_AGENT: &str = concat!("dashprefs-form/", env!("CARGO_PKG_VERSION"));
const SEARCH_PATH: &str = "/api/search";

/// [`PreferencesBackend`] over the dashboard server's REST API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Self::new(config.server_url.clone(), config.api_token.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "Dashboard API request");

        let builder = self.http_client.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder, path: &str) -> Result<Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::Api(status.as_u16(), error_text));
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PreferencesBackend for HttpBackend {
    async fn get_preferences(&self, scope: &ResourceScope) -> Result<PreferenceSet, BackendError> {
        let path = scope.preferences_path();
        let response = Self::send(self.request(Method::GET, &path), &path).await?;
        let preferences: PreferenceSet = Self::json(response).await?;

        tracing::debug!(
            scope = %scope,
            home_dashboard_id = preferences.home_dashboard_id,
            theme = %preferences.theme,
            timezone = %preferences.timezone,
            "Fetched preferences"
        );

        Ok(preferences)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<DashboardSummary>, BackendError> {
        let builder = self
            .request(Method::GET, SEARCH_PATH)
            .query(&query.to_query_pairs());
        let response = Self::send(builder, SEARCH_PATH).await?;
        let hits: Vec<DashboardSummary> = Self::json(response).await?;

        tracing::debug!(results = hits.len(), "Dashboard search complete");
        Ok(hits)
    }

    async fn put_preferences(
        &self,
        scope: &ResourceScope,
        preferences: &PreferenceSet,
    ) -> Result<(), BackendError> {
        let path = scope.preferences_path();
        Self::send(self.request(Method::PUT, &path).json(preferences), &path).await?;

        tracing::info!(scope = %scope, "Saved preferences");
        Ok(())
    }
}

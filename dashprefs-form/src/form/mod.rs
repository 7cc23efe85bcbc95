//! Shared preferences form controller
//!
//! Lifecycle: `Unloaded → Loaded → (editing)* → Submitting → Reloaded`.
//!
//! Activation is an ordered pipeline, each step waiting on the previous one:
//! 1. Fetch the preference set for the resource scope
//! 2. Fetch the starred dashboards
//! 3. If the configured home dashboard is set but not starred, fetch it by id
//! 4. Merge: "Default" sentinel, starred dashboards, then the fetched home dashboard
//! 5. Store the result as working state
//!
//! The working state is owned exclusively by the form and replaced wholesale
//! on every interaction.

use dashprefs_common::{DashboardSummary, PreferenceSet, ResourceScope, SearchQuery, Theme, Timezone};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::backend::{BackendError, PageReload, PreferencesBackend};

pub mod options;
pub mod view;

pub use view::{FormView, SelectField, SelectOption};

/// Preferences form errors
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Backend request failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Unloaded,
    Loaded,
    Submitting,
    Reloaded,
}

/// Transient edit state of the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkingState {
    pub home_dashboard_id: i64,
    pub theme: Theme,
    pub timezone: Timezone,
    /// Home dashboard options, sentinel first
    pub dashboards: Vec<DashboardSummary>,
}

impl WorkingState {
    /// The three fields that are written back on submit
    pub fn preferences(&self) -> PreferenceSet {
        PreferenceSet {
            home_dashboard_id: self.home_dashboard_id,
            theme: self.theme.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

/// Form editing one resource scope's preferences
pub struct PreferencesForm<B, R> {
    scope: ResourceScope,
    backend: B,
    reloader: R,
    phase: FormPhase,
    state: WorkingState,
}

impl<B: PreferencesBackend, R: PageReload> PreferencesForm<B, R> {
    pub fn new(scope: ResourceScope, backend: B, reloader: R) -> Self {
        Self {
            scope,
            backend,
            reloader,
            phase: FormPhase::Unloaded,
            state: WorkingState::default(),
        }
    }

    pub fn scope(&self) -> ResourceScope {
        self.scope
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn state(&self) -> &WorkingState {
        &self.state
    }

    /// Render model for the current working state
    pub fn view(&self) -> FormView {
        FormView::from_state(&self.state)
    }

    /// Run the activation pipeline once
    ///
    /// On failure the working state keeps its zero values and the form stays
    /// `Unloaded`.
    pub async fn activate(&mut self) -> Result<(), FormError> {
        if self.phase != FormPhase::Unloaded {
            return Err(FormError::InvalidState(format!(
                "form for '{}' is already activated ({:?})",
                self.scope, self.phase
            )));
        }

        match self.load().await {
            Ok(state) => {
                info!(
                    scope = %self.scope,
                    home_dashboard_id = state.home_dashboard_id,
                    dashboards = state.dashboards.len(),
                    "Preferences form loaded"
                );
                self.state = state;
                self.phase = FormPhase::Loaded;
                Ok(())
            }
            Err(e) => {
                error!(scope = %self.scope, "Failed to load preferences form: {}", e);
                Err(e)
            }
        }
    }

    async fn load(&self) -> Result<WorkingState, FormError> {
        let preferences = self.backend.get_preferences(&self.scope).await?;
        let starred = self.backend.search(&SearchQuery::starred()).await?;
        let missing = self.fetch_missing_home(&preferences, &starred).await?;

        Ok(WorkingState {
            home_dashboard_id: preferences.home_dashboard_id,
            theme: preferences.theme,
            timezone: preferences.timezone,
            dashboards: options::merge_dashboard_options(starred, missing),
        })
    }

    /// Keep the saved home dashboard selectable after it has been unstarred
    async fn fetch_missing_home(
        &self,
        preferences: &PreferenceSet,
        starred: &[DashboardSummary],
    ) -> Result<Option<DashboardSummary>, FormError> {
        let id = preferences.home_dashboard_id;
        if !options::needs_missing_lookup(id, starred) {
            return Ok(None);
        }

        debug!(home_dashboard_id = id, "Home dashboard not starred, fetching by id");
        let missing = self
            .backend
            .search(&SearchQuery::by_id(id))
            .await?
            .into_iter()
            .next();

        if missing.is_none() {
            warn!(home_dashboard_id = id, "Configured home dashboard not found");
        }

        Ok(missing)
    }

    pub fn on_theme_changed(&mut self, theme: Theme) {
        let previous = std::mem::take(&mut self.state);
        self.state = WorkingState { theme, ..previous };
    }

    pub fn on_timezone_changed(&mut self, timezone: Timezone) {
        let previous = std::mem::take(&mut self.state);
        self.state = WorkingState { timezone, ..previous };
    }

    pub fn on_home_dashboard_changed(&mut self, dashboard_id: i64) {
        let previous = std::mem::take(&mut self.state);
        self.state = WorkingState {
            home_dashboard_id: dashboard_id,
            ..previous
        };
    }

    /// Write the working state back and reload the host page
    ///
    /// Only valid once loaded. A failed write leaves the form `Loaded` with
    /// the edits intact and does not reload.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        if self.phase != FormPhase::Loaded {
            return Err(FormError::InvalidState(format!(
                "cannot submit form for '{}' while {:?}",
                self.scope, self.phase
            )));
        }

        self.phase = FormPhase::Submitting;
        let preferences = self.state.preferences();

        match self.backend.put_preferences(&self.scope, &preferences).await {
            Ok(()) => {
                info!(scope = %self.scope, "Preferences submitted, reloading");
                self.reloader.reload().await;
                self.phase = FormPhase::Reloaded;
                Ok(())
            }
            Err(e) => {
                error!(scope = %self.scope, "Failed to save preferences: {}", e);
                self.phase = FormPhase::Loaded;
                Err(e.into())
            }
        }
    }
}

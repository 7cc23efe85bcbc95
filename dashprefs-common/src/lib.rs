//! # Dashboard Preferences Common Library
//!
//! Shared code for the dashboard preferences client including:
//! - Preference and dashboard search models
//! - Resource scope (user, team, organization) path handling
//! - Client configuration loading
//! - Error types

pub mod config;
pub mod dashboard;
pub mod error;
pub mod preferences;
pub mod resource;
pub mod search;

pub use dashboard::{DashboardHitType, DashboardSummary};
pub use error::{Error, Result};
pub use preferences::{PreferenceSet, SelectChoice, Theme, Timezone};
pub use resource::ResourceScope;
pub use search::SearchQuery;

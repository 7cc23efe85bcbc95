//! Dashboard search hit projection
//!
//! Only `id` and `title` matter to the preferences form; the remaining fields
//! are carried so a hit can be passed around without losing information.

use serde::{Deserialize, Serialize};

/// Kind of object returned by the dashboard search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DashboardHitType {
    /// Unset (used by the synthetic "Default" entry)
    #[default]
    None,
    Dashboard,
    Folder,
    Other(String),
}

impl From<String> for DashboardHitType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => DashboardHitType::None,
            "dash-db" => DashboardHitType::Dashboard,
            "dash-folder" => DashboardHitType::Folder,
            _ => DashboardHitType::Other(value),
        }
    }
}

impl From<DashboardHitType> for String {
    fn from(hit_type: DashboardHitType) -> Self {
        match hit_type {
            DashboardHitType::None => String::new(),
            DashboardHitType::Dashboard => "dash-db".to_string(),
            DashboardHitType::Folder => "dash-folder".to_string(),
            DashboardHitType::Other(other) => other,
        }
    }
}

/// One dashboard search result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "type", default)]
    pub hit_type: DashboardHitType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub folder_id: i64,
    #[serde(default)]
    pub folder_uid: String,
    #[serde(default)]
    pub folder_title: String,
    #[serde(default)]
    pub folder_url: String,
}

impl DashboardSummary {
    /// Title of the synthetic zero-id entry
    pub const DEFAULT_TITLE: &'static str = "Default";

    /// Sentinel entry representing "no specific home dashboard"
    pub fn default_entry() -> Self {
        Self {
            id: 0,
            title: Self::DEFAULT_TITLE.to_string(),
            ..Self::default()
        }
    }

    /// Whether this is the zero-id sentinel
    pub fn is_default_entry(&self) -> bool {
        self.id == 0
    }
}

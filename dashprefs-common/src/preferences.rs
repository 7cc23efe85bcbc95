//! Preference record persisted per resource scope
//!
//! `GET /api/{resourceUri}/preferences` returns and
//! `PUT /api/{resourceUri}/preferences` accepts:
//!
//! ```json
//! { "homeDashboardId": 0, "theme": "", "timezone": "" }
//! ```
//!
//! Empty strings mean "use the default". Values outside the known option
//! catalogs are preserved verbatim so a round trip never rewrites them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An enumerated preference value backed by a fixed `(value, label)` catalog
pub trait SelectChoice: Sized {
    /// Ordered `(value, label)` pairs offered by the selection control
    const OPTIONS: &'static [(&'static str, &'static str)];

    /// Wire value of this choice
    fn value(&self) -> &str;

    /// Map a wire value to a choice, keeping unknown values verbatim
    fn from_value(value: &str) -> Self;

    /// Display label, if the value is part of the catalog
    fn label(&self) -> Option<&'static str> {
        Self::OPTIONS
            .iter()
            .find(|(value, _)| *value == self.value())
            .map(|(_, label)| *label)
    }

    /// Parse a value a user typed, accepting only catalog entries
    fn parse_known(input: &str) -> Result<Self> {
        let input = input.trim();
        let normalized = if input.eq_ignore_ascii_case("default") { "" } else { input };
        Self::OPTIONS
            .iter()
            .find(|(value, _)| value.eq_ignore_ascii_case(normalized))
            .map(|(value, _)| Self::from_value(value))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::OPTIONS
                    .iter()
                    .map(|(value, _)| if value.is_empty() { "default" } else { *value })
                    .collect();
                Error::InvalidInput(format!(
                    "'{}' is not one of: {}",
                    input,
                    known.join(", ")
                ))
            })
    }
}

/// UI theme preference
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    /// Inherit the theme from the enclosing scope
    #[default]
    Default,
    Dark,
    Light,
    /// Value stored by the backend that this client does not know about
    Unrecognized(String),
}

impl SelectChoice for Theme {
    const OPTIONS: &'static [(&'static str, &'static str)] =
        &[("", "Default"), ("dark", "Dark"), ("light", "Light")];

    fn value(&self) -> &str {
        match self {
            Theme::Default => "",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Unrecognized(other) => other,
        }
    }

    fn from_value(value: &str) -> Self {
        match value {
            "" => Theme::Default,
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            other => Theme::Unrecognized(other.to_string()),
        }
    }
}

/// Default timezone preference
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Timezone {
    /// Inherit the timezone from the enclosing scope
    #[default]
    Default,
    /// Render times in the client's local timezone
    Browser,
    Utc,
    /// Value stored by the backend that this client does not know about
    Unrecognized(String),
}

impl SelectChoice for Timezone {
    const OPTIONS: &'static [(&'static str, &'static str)] = &[
        ("", "Default"),
        ("browser", "Local browser time"),
        ("utc", "UTC"),
    ];

    fn value(&self) -> &str {
        match self {
            Timezone::Default => "",
            Timezone::Browser => "browser",
            Timezone::Utc => "utc",
            Timezone::Unrecognized(other) => other,
        }
    }

    fn from_value(value: &str) -> Self {
        match value {
            "" => Timezone::Default,
            "browser" => Timezone::Browser,
            "utc" => Timezone::Utc,
            other => Timezone::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Theme::from_value(&value)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.value().to_string()
    }
}

impl From<String> for Timezone {
    fn from(value: String) -> Self {
        Timezone::from_value(&value)
    }
}

impl From<Timezone> for String {
    fn from(timezone: Timezone) -> Self {
        timezone.value().to_string()
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Theme::parse_known(s)
    }
}

impl FromStr for Timezone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Timezone::parse_known(s)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => f.write_str(self.value()),
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => f.write_str(self.value()),
        }
    }
}

/// The three-field preference record persisted per resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSet {
    /// Home dashboard id (0 = no specific home dashboard)
    #[serde(default)]
    pub home_dashboard_id: i64,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub timezone: Timezone,
}

impl PreferenceSet {
    /// Whether a specific home dashboard is configured
    pub fn has_home_dashboard(&self) -> bool {
        self.home_dashboard_id > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preferences_deserialize_camel_case() {
        let prefs: PreferenceSet = serde_json::from_value(json!({
            "homeDashboardId": 12,
            "theme": "dark",
            "timezone": "utc"
        }))
        .unwrap();

        assert_eq!(prefs.home_dashboard_id, 12);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.timezone, Timezone::Utc);
        assert!(prefs.has_home_dashboard());
    }

    #[test]
    fn test_missing_fields_are_zero_valued() {
        let prefs: PreferenceSet = serde_json::from_value(json!({})).unwrap();
        assert_eq!(prefs, PreferenceSet::default());
        assert!(!prefs.has_home_dashboard());
    }

    #[test]
    fn test_unrecognized_values_survive_round_trip() {
        let body = json!({ "homeDashboardId": 0, "theme": "solarized", "timezone": "Europe/Oslo" });
        let prefs: PreferenceSet = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(prefs.theme, Theme::Unrecognized("solarized".to_string()));
        assert_eq!(prefs.theme.label(), None);
        assert_eq!(serde_json::to_value(&prefs).unwrap(), body);
    }

    #[test]
    fn test_default_serializes_as_empty_string() {
        let value = serde_json::to_value(PreferenceSet::default()).unwrap();
        assert_eq!(value, json!({ "homeDashboardId": 0, "theme": "", "timezone": "" }));
    }

    #[test]
    fn test_catalog_labels() {
        assert_eq!(Theme::Default.label(), Some("Default"));
        assert_eq!(Timezone::Browser.label(), Some("Local browser time"));
        assert_eq!(Timezone::Utc.to_string(), "UTC");
    }

    #[test]
    fn test_parse_known_accepts_catalog_values_only() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("Default".parse::<Theme>().unwrap(), Theme::Default);
        assert_eq!("".parse::<Timezone>().unwrap(), Timezone::Default);
        assert_eq!("UTC".parse::<Timezone>().unwrap(), Timezone::Utc);

        let err = "blue".parse::<Theme>().unwrap_err();
        assert!(err.to_string().contains("default, dark, light"));
    }
}

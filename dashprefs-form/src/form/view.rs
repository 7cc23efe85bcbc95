//! Render model for the preferences form
//!
//! A [`FormView`] is derived from the working state on demand and is what a
//! host draws: three selection controls and a submit action. `Display`
//! produces the plain-text rendering used by the CLI.

use std::fmt;

use dashprefs_common::{SelectChoice, Theme, Timezone};

use super::WorkingState;

pub const HEADING: &str = "Preferences";
pub const SUBMIT_LABEL: &str = "Save";
pub const THEME_LABEL: &str = "UI Theme";
pub const HOME_DASHBOARD_LABEL: &str = "Home Dashboard";
pub const TIMEZONE_LABEL: &str = "Timezone";
pub const HOME_DASHBOARD_PLACEHOLDER: &str = "Choose default dashboard";
pub const HOME_DASHBOARD_TOOLTIP: &str =
    "Not finding the dashboard you want? Star it first, then it should appear in this select box.";

/// One entry of a selection control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A selection control and its current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub label: &'static str,
    pub options: Vec<SelectOption>,
    /// Index into `options`; `None` shows the placeholder
    pub selected: Option<usize>,
    pub placeholder: Option<&'static str>,
    pub tooltip: Option<&'static str>,
    pub searchable: bool,
}

impl SelectField {
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    fn catalog<C: SelectChoice>(label: &'static str, current: &C) -> Self {
        let options: Vec<SelectOption> = C::OPTIONS
            .iter()
            .map(|(value, option_label)| SelectOption {
                value: value.to_string(),
                label: option_label.to_string(),
            })
            .collect();
        let selected = options.iter().position(|o| o.value == current.value());

        Self {
            label,
            options,
            selected,
            placeholder: None,
            tooltip: None,
            searchable: false,
        }
    }
}

/// Everything needed to draw the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub heading: &'static str,
    pub theme: SelectField,
    pub home_dashboard: SelectField,
    pub timezone: SelectField,
    pub submit_label: &'static str,
}

impl FormView {
    pub fn from_state(state: &WorkingState) -> Self {
        let options: Vec<SelectOption> = state
            .dashboards
            .iter()
            .map(|d| SelectOption {
                value: d.id.to_string(),
                label: d.title.clone(),
            })
            .collect();
        let selected = state
            .dashboards
            .iter()
            .position(|d| d.id == state.home_dashboard_id);

        Self {
            heading: HEADING,
            theme: SelectField::catalog::<Theme>(THEME_LABEL, &state.theme),
            home_dashboard: SelectField {
                label: HOME_DASHBOARD_LABEL,
                options,
                selected,
                placeholder: Some(HOME_DASHBOARD_PLACEHOLDER),
                tooltip: Some(HOME_DASHBOARD_TOOLTIP),
                searchable: true,
            },
            timezone: SelectField::catalog::<Timezone>(TIMEZONE_LABEL, &state.timezone),
            submit_label: SUBMIT_LABEL,
        }
    }
}

impl fmt::Display for SelectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = match (self.selected_option(), self.placeholder) {
            (Some(option), _) => option.label.as_str(),
            (None, Some(placeholder)) => placeholder,
            (None, None) => "",
        };
        writeln!(f, "{}: {}", self.label, current)?;

        if let Some(tooltip) = self.tooltip {
            writeln!(f, "  ({})", tooltip)?;
        }

        for (index, option) in self.options.iter().enumerate() {
            let marker = if self.selected == Some(index) { '*' } else { ' ' };
            writeln!(f, "  [{}] {}", marker, option.label)?;
        }

        Ok(())
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f)?;
        write!(f, "{}", self.theme)?;
        write!(f, "{}", self.home_dashboard)?;
        write!(f, "{}", self.timezone)?;
        write!(f, "<{}>", self.submit_label)
    }
}

//! dashprefs-form library - Shared preferences form
//!
//! Edits the theme, timezone and home dashboard of a user, team or
//! organization against the dashboard server's REST API.
//!
//! - [`backend`]: the request/response seam plus the reqwest implementation
//! - [`form`]: the form controller, its activation pipeline and render model
//! - [`logging`]: stderr tracing setup with a reloadable level

pub mod backend;
pub mod form;
pub mod logging;

pub use backend::{BackendError, HttpBackend, PageReload, PreferencesBackend};
pub use form::{FormError, FormPhase, FormView, PreferencesForm, WorkingState};

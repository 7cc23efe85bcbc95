//! Home dashboard option list reconciliation

use dashprefs_common::DashboardSummary;

/// Whether the configured home dashboard must be fetched separately
///
/// True when a specific dashboard is configured and it is not among the
/// starred set.
pub fn needs_missing_lookup(home_dashboard_id: i64, starred: &[DashboardSummary]) -> bool {
    home_dashboard_id > 0 && !starred.iter().any(|d| d.id == home_dashboard_id)
}

/// Build the option list: sentinel, starred in server order, then the
/// separately fetched home dashboard (if any)
pub fn merge_dashboard_options(
    starred: Vec<DashboardSummary>,
    missing: Option<DashboardSummary>,
) -> Vec<DashboardSummary> {
    let mut options = Vec::with_capacity(starred.len() + 2);
    options.push(DashboardSummary::default_entry());
    options.extend(starred);
    options.extend(missing);
    options
}

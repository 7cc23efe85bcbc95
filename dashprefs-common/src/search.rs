//! Dashboard search filter (`GET /api/search`)

/// Filter for the dashboard search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub starred: Option<bool>,
    pub dashboard_ids: Vec<i64>,
    pub query: Option<String>,
    pub tags: Vec<String>,
    pub limit: Option<u32>,
}

impl SearchQuery {
    /// Dashboards the current user has starred
    pub fn starred() -> Self {
        Self {
            starred: Some(true),
            ..Self::default()
        }
    }

    /// A single dashboard by id
    pub fn by_id(id: i64) -> Self {
        Self {
            dashboard_ids: vec![id],
            ..Self::default()
        }
    }

    /// Query-string pairs in a stable order; list fields repeat their key
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(starred) = self.starred {
            pairs.push(("starred", starred.to_string()));
        }
        for id in &self.dashboard_ids {
            pairs.push(("dashboardIds", id.to_string()));
        }
        for tag in &self.tags {
            pairs.push(("tag", tag.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

//! Resource scope owning a preference set
//!
//! The scope is the path segment between `/api/` and `/preferences`:
//! `user`, `org`, or `teams/{id}`.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Entity whose preferences are being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceScope {
    /// The signed-in user
    #[default]
    User,
    /// The current organization
    Org,
    /// A team, by numeric id
    Team(i64),
}

impl ResourceScope {
    /// Path segment identifying this scope (`resourceUri`)
    pub fn resource_uri(&self) -> String {
        match self {
            ResourceScope::User => "user".to_string(),
            ResourceScope::Org => "org".to_string(),
            ResourceScope::Team(id) => format!("teams/{}", id),
        }
    }

    /// `/api/{resourceUri}/preferences`
    pub fn preferences_path(&self) -> String {
        format!("/api/{}/preferences", self.resource_uri())
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_uri())
    }
}

impl FromStr for ResourceScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_matches('/');
        match trimmed {
            "" => Err(Error::InvalidInput("resource scope is empty".to_string())),
            "user" => Ok(ResourceScope::User),
            "org" => Ok(ResourceScope::Org),
            other => {
                let id = other
                    .strip_prefix("teams/")
                    .ok_or_else(|| {
                        Error::InvalidInput(format!(
                            "unknown resource scope '{}' (expected user, org or teams/<id>)",
                            other
                        ))
                    })?;
                let id: i64 = id
                    .parse()
                    .map_err(|_| Error::InvalidInput(format!("invalid team id '{}'", id)))?;
                if id <= 0 {
                    return Err(Error::InvalidInput(format!("team id must be positive, got {}", id)));
                }
                Ok(ResourceScope::Team(id))
            }
        }
    }
}

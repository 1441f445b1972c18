//! Hierarchical query keys.
//!
//! A key is an ordered list of segments (`["users", "detail", "u-1"]`).
//! Invalidation and removal match by prefix, so `["users"]` covers every
//! user query.

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

use std::fmt;

use crate::net::types::ChartPeriod;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Keys for user queries.
pub mod user_keys {
    use super::QueryKey;

    pub fn all() -> QueryKey {
        QueryKey::new(["users"])
    }

    pub fn lists() -> QueryKey {
        all().child("list")
    }

    /// A filtered list; still covered by [`lists`].
    pub fn list(filters: &str) -> QueryKey {
        lists().child(filters)
    }

    pub fn details() -> QueryKey {
        all().child("detail")
    }

    pub fn detail(id: &str) -> QueryKey {
        details().child(id)
    }
}

/// Keys for dashboard queries.
pub mod dashboard_keys {
    use super::{ChartPeriod, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new(["dashboard"])
    }

    pub fn stats() -> QueryKey {
        all().child("stats")
    }

    pub fn activity() -> QueryKey {
        all().child("activity")
    }

    pub fn charts(period: ChartPeriod) -> QueryKey {
        all().child("charts").child(period.as_str())
    }
}

//! Client-side sorting, filtering, search and pagination for the user table.
//!
//! The backend returns the full user list; the table narrows and pages it
//! locally. Text comparisons ignore ASCII case throughout.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::net::types::{PaginatedResponse, User};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserColumn {
    Name,
    Email,
    Role,
    CreatedAt,
}

impl UserColumn {
    fn value(self, user: &User) -> &str {
        match self {
            Self::Name => &user.name,
            Self::Email => &user.email,
            Self::Role => user.role.as_str(),
            Self::CreatedAt => &user.created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: UserColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Header click: flip direction on the same column, otherwise start
    /// ascending on the new one.
    #[must_use]
    pub fn clicked(current: Option<Self>, column: UserColumn) -> Self {
        match current {
            Some(spec) if spec.column == column => Self { column, direction: spec.direction.toggled() },
            _ => Self { column, direction: SortDirection::Ascending },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub column: UserColumn,
    pub operator: FilterOperator,
    pub value: String,
}

impl Filter {
    pub fn matches(&self, user: &User) -> bool {
        let field = self.column.value(user).to_ascii_lowercase();
        let needle = self.value.trim().to_ascii_lowercase();
        match self.operator {
            FilterOperator::Contains => field.contains(&needle),
            FilterOperator::Equals => field == needle,
            FilterOperator::StartsWith => field.starts_with(&needle),
            FilterOperator::EndsWith => field.ends_with(&needle),
        }
    }
}

/// Sort in place. Ties keep their original order.
pub fn sort_users(users: &mut [User], spec: SortSpec) {
    users.sort_by(|a, b| {
        let ordering = compare_ignore_case(spec.column.value(a), spec.column.value(b));
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Users matching every filter.
pub fn apply_filters<'a>(users: impl IntoIterator<Item = &'a User>, filters: &[Filter]) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| filters.iter().all(|f| f.matches(u)))
        .cloned()
        .collect()
}

/// Free-text match on name or email. A blank query matches everyone.
pub fn matches_search(user: &User, query: &str) -> bool {
    let query = query.trim().to_ascii_lowercase();
    query.is_empty()
        || user.name.to_ascii_lowercase().contains(&query)
        || user.email.to_ascii_lowercase().contains(&query)
}

/// Slice `items` into 1-based page `page` of `limit` rows.
///
/// A zero `limit` is treated as one row per page; pages past the end come
/// back empty with the real totals.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> PaginatedResponse<T> {
    let limit = limit.max(1);
    let page = page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    PaginatedResponse {
        data: items[start..end].to_vec(),
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    }
}

/// Everything the user table applies to the raw list, in order: search,
/// filters, sort, page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub filters: Vec<Filter>,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub limit: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self { search: String::new(), filters: Vec::new(), sort: None, page: 1, limit: DEFAULT_PAGE_SIZE }
    }
}

impl TableQuery {
    pub fn apply(&self, users: &[User]) -> PaginatedResponse<User> {
        let mut rows = apply_filters(users.iter().filter(|u| matches_search(u, &self.search)), &self.filters);
        if let Some(spec) = self.sort {
            sort_users(&mut rows, spec);
        }
        paginate(&rows, self.page, self.limit)
    }
}

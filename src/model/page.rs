//! Page results and filter parameters exchanged with paged data loaders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One settled page load.
///
/// `items` is whatever the loader hands back to its caller. [`PaginationVm`] returns
/// the whole accumulated collection so a view can replace its list on every page.
///
/// [`PaginationVm`]: crate::pagination::PaginationVm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Items resolved by the load.
    pub items: Vec<T>,
    /// True when no further page exists.
    pub is_last_page: bool,
    /// Total row count reported by the backend, if any.
    pub total: Option<u64>,
}

impl<T> PageResult<T> {
    /// Build a page result.
    pub fn new(items: Vec<T>, is_last_page: bool, total: Option<u64>) -> Self {
        Self {
            items,
            is_last_page,
            total,
        }
    }
}

/// Sort direction for an `order` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("asc"),
            Direction::Desc => f.write_str("desc"),
        }
    }
}

/// Filter parameters passed to `first_page`.
///
/// Keys are column names (plus `order`), values are PostgREST operator expressions
/// such as `eq.42` or `created_at.desc`. Ordered so that equal filters compare and
/// serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterParams(BTreeMap<String, String>);

impl FilterParams {
    /// Empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: impl Into<String>, value: String) {
        self.0.insert(key.into(), value);
    }
}

/// Builder for [`FilterParams`].
///
/// ```
/// use viewkit::model::{Direction, FilterSet};
///
/// let params = FilterSet::new()
///     .eq("user_id", 7)
///     .eq("project_id", 12)
///     .order("created_at", Direction::Desc)
///     .build();
///
/// assert_eq!(params.get("user_id"), Some("eq.7"));
/// assert_eq!(params.get("order"), Some("created_at.desc"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    params: FilterParams,
    order: Vec<String>,
}

impl FilterSet {
    /// Start an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = value`.
    pub fn eq(self, column: &str, value: impl fmt::Display) -> Self {
        self.op(column, "eq", value)
    }

    /// `column < value`.
    pub fn lt(self, column: &str, value: impl fmt::Display) -> Self {
        self.op(column, "lt", value)
    }

    /// `column > value`.
    pub fn gt(self, column: &str, value: impl fmt::Display) -> Self {
        self.op(column, "gt", value)
    }

    /// `column <= value`.
    pub fn lte(self, column: &str, value: impl fmt::Display) -> Self {
        self.op(column, "lte", value)
    }

    /// `column >= value`.
    pub fn gte(self, column: &str, value: impl fmt::Display) -> Self {
        self.op(column, "gte", value)
    }

    /// Case-insensitive pattern match; `*` is the wildcard.
    pub fn ilike(self, column: &str, pattern: impl fmt::Display) -> Self {
        self.op(column, "ilike", pattern)
    }

    /// Append a sort key. Multiple calls sort by each key in call order.
    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order.push(format!("{column}.{direction}"));
        self
    }

    /// Finish building.
    pub fn build(mut self) -> FilterParams {
        if !self.order.is_empty() {
            let order = self.order.join(",");
            self.params.insert("order", order);
        }
        self.params
    }

    fn op(mut self, column: &str, op: &str, value: impl fmt::Display) -> Self {
        self.params.insert(column, format!("{op}.{value}"));
        self
    }
}

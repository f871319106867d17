use chrono::NaiveDate;
use regex::Regex;
use sea_orm::Order;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_SORT_BY: &str = "updated_at";

/// Lexical shape of `sort_by`; the entity's sortable list decides the rest
static SORT_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Filters shared by every `find` operation.
///
/// Each present field adds exactly one predicate; absent fields add none.
/// Date bounds are inclusive and compared against the date part of the
/// timestamp column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindParams {
    /// Lower bound for `created_at` (inclusive, `YYYY-MM-DD`)
    pub created_from: Option<NaiveDate>,
    /// Upper bound for `created_at` (inclusive, `YYYY-MM-DD`)
    pub created_to: Option<NaiveDate>,
    pub updated_from: Option<NaiveDate>,
    pub updated_to: Option<NaiveDate>,
    /// Substring matched against the entity's search column
    #[validate(length(min = 1, max = 255))]
    pub search: Option<String>,
    pub offset: Option<u64>,
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
    /// Column to sort by (default `updated_at`), one of the entity's sortable columns
    #[validate(regex(path = *SORT_COLUMN))]
    pub sort_by: Option<String>,
    /// Sort direction (default `desc`)
    pub sort_direction: Option<SortDirection>,
}

impl AsRef<FindParams> for FindParams {
    fn as_ref(&self) -> &FindParams {
        self
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

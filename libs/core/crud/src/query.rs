//! Query plan for the generic CRUD operations.
//!
//! A [`SelectQuery`] records what a query builder would be asked to do
//! (`where`, `andWhere`, `offset`, `limit`, `orderBy`, `leftJoinAndMapMany`)
//! as plain data. Repositories turn it into a sea-orm `Select` with
//! [`crate::render`]; tests inspect it directly.

use chrono::NaiveDate;
use sea_orm::Value;
use std::fmt;

use crate::entity::CrudConfig;
use crate::error::{CrudError, CrudResult};
use crate::params::{FindParams, SortDirection, DEFAULT_LIMIT, DEFAULT_SORT_BY};

/// A column addressed through a query alias, e.g. `user.username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub alias: String,
    pub column: String,
}

impl Field {
    pub fn new(alias: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.alias, self.column)
    }
}

/// Which side of an inclusive date range a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// `>=`
    From,
    /// `<=`
    To,
}

/// One condition of the `WHERE` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field = value`
    Eq { field: Field, value: Value },
    /// `field LIKE pattern`
    Like { field: Field, pattern: String },
    /// `CAST(field AS DATE) >= date` or `<= date`
    OnDate {
        field: Field,
        bound: DateBound,
        date: NaiveDate,
    },
}

impl Predicate {
    pub fn field(&self) -> &Field {
        match self {
            Predicate::Eq { field, .. }
            | Predicate::Like { field, .. }
            | Predicate::OnDate { field, .. } => field,
        }
    }
}

/// `LEFT JOIN table AS alias ON alias.joined = root`, mapped onto a
/// many-valued property of the root record (`user.permissions`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinMany {
    pub property: String,
    pub table: String,
    pub alias: String,
    pub joined: Field,
    pub root: Field,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: Field,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: String,
    pub alias: String,
    /// The first predicate is the `WHERE`, the rest are `AND`ed onto it
    pub predicates: Vec<Predicate>,
    pub joins: Vec<JoinMany>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub order_by: Option<OrderBy>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
            predicates: Vec::new(),
            joins: Vec::new(),
            offset: None,
            limit: None,
            order_by: None,
        }
    }

    /// Column of the root alias
    pub fn field(&self, column: &str) -> Field {
        Field::new(self.alias.as_str(), column)
    }

    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// `root.column = value`
    pub fn where_eq(self, column: &str, value: impl Into<Value>) -> Self {
        let field = self.field(column);
        self.and_where(Predicate::Eq {
            field,
            value: value.into(),
        })
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, field: Field, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy { field, direction });
        self
    }

    /// Joins `table AS alias` on `alias.joined_column = root.root_column`.
    pub fn left_join_and_map_many(
        mut self,
        property: impl Into<String>,
        table: impl Into<String>,
        alias: impl Into<String>,
        joined_column: &str,
        root_column: &str,
    ) -> Self {
        let alias = alias.into();
        let root = self.field(root_column);
        self.joins.push(JoinMany {
            property: property.into(),
            table: table.into(),
            joined: Field::new(alias.as_str(), joined_column),
            alias,
            root,
        });
        self
    }

    /// The `find` query for an entity. `sort_by` must be one of the
    /// entity's sortable columns.
    pub fn for_find(config: &CrudConfig, params: &FindParams) -> CrudResult<Self> {
        let sort_by = params.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY);
        if !config.sortable.contains(&sort_by) {
            return Err(CrudError::Query(format!(
                "cannot sort {} by '{sort_by}'",
                config.name
            )));
        }

        let mut query = SelectQuery::new(config.table, config.name);

        let date_bounds = [
            ("created_at", DateBound::From, params.created_from),
            ("created_at", DateBound::To, params.created_to),
            ("updated_at", DateBound::From, params.updated_from),
            ("updated_at", DateBound::To, params.updated_to),
        ];
        for (column, bound, date) in date_bounds {
            if let Some(date) = date {
                let field = query.field(column);
                query = query.and_where(Predicate::OnDate { field, bound, date });
            }
        }

        if let Some(search) = &params.search {
            let field = query.field(config.search_by);
            query = query.and_where(Predicate::Like {
                field,
                pattern: format!("%{search}%"),
            });
        }

        if let Some(offset) = params.offset {
            query = query.offset(offset);
        }

        let sort_field = query.field(sort_by);
        Ok(query
            .limit(params.limit.unwrap_or(DEFAULT_LIMIT))
            .order_by(sort_field, params.sort_direction.unwrap_or_default()))
    }
}

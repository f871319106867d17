//! Turns a [`SelectQuery`] into a sea-orm [`Select`].
//!
//! Root-alias fields resolve through the entity's `Column`, so a column the
//! entity does not have is rejected before any SQL exists. Joined-alias
//! fields are addressed as `alias.column`. Every value is bound by sea-query.

use sea_orm::sea_query::{Alias, Expr, ExprTrait};
use sea_orm::{
    ColumnTrait, EntityName, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::str::FromStr;

use crate::error::{CrudError, CrudResult};
use crate::query::{DateBound, Field, Predicate, SelectQuery};

/// Expression for one field of the plan.
pub fn field_expr<E: EntityTrait>(query: &SelectQuery, field: &Field) -> CrudResult<Expr> {
    if field.alias == query.alias {
        let column = E::Column::from_str(&field.column)
            .map_err(|_| CrudError::Query(format!("unknown column {field}")))?;
        return Ok(column.into_expr());
    }

    if query.joins.iter().any(|join| join.alias == field.alias) {
        return Ok(Expr::col((field.alias.clone(), field.column.clone())));
    }

    Err(CrudError::Query(format!("unknown alias in {field}")))
}

fn predicate_expr<E: EntityTrait>(query: &SelectQuery, predicate: &Predicate) -> CrudResult<Expr> {
    let expr = match predicate {
        Predicate::Eq { field, value } => field_expr::<E>(query, field)?.eq(value.clone()),
        Predicate::Like { field, pattern } => field_expr::<E>(query, field)?.like(pattern.as_str()),
        Predicate::OnDate { field, bound, date } => {
            let day = field_expr::<E>(query, field)?.cast_as(Alias::new("DATE"));
            match bound {
                DateBound::From => day.gte(*date),
                DateBound::To => day.lte(*date),
            }
        }
    };
    Ok(expr)
}

/// Root table, joins and predicates; no order or pagination. This is the
/// select `count` runs on.
pub fn filtered<E: EntityTrait>(query: &SelectQuery) -> CrudResult<Select<E>> {
    let table = E::default().table_name();
    if query.table != table {
        return Err(CrudError::Query(format!(
            "query targets {} but entity table is {table}",
            query.table
        )));
    }

    let mut select = E::find();

    for join in &query.joins {
        let on = field_expr::<E>(query, &join.joined)?.eq(field_expr::<E>(query, &join.root)?);
        QuerySelect::query(&mut select).join_as(
            JoinType::LeftJoin,
            join.table.clone(),
            join.alias.clone(),
            on,
        );
    }

    for predicate in &query.predicates {
        select = select.filter(predicate_expr::<E>(query, predicate)?);
    }

    Ok(select)
}

/// The full select: [`filtered`] plus order, offset and limit.
pub fn to_select<E: EntityTrait>(query: &SelectQuery) -> CrudResult<Select<E>> {
    let mut select = filtered::<E>(query)?;

    if let Some(order) = &query.order_by {
        select = select.order_by(field_expr::<E>(query, &order.field)?, order.direction.into());
    }

    Ok(select.offset(query.offset).limit(query.limit))
}

//! `SeaOrmRepository<role::Entity>` against sea-orm's mock connection.
//!
//! These check the SQL the generic CRUD layer sends for roles and how
//! driver results come back, without a running PostgreSQL.

use core_crud::{CrudError, CrudRepository, CrudService, FindParams, SelectQuery, SortDirection};
use domain_roles::{PgRoleRepository, RoleError, RolesService, role};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

fn sample_role(name: &str) -> role::Model {
    let now = chrono::Utc::now().fixed_offset();
    role::Model {
        id: Uuid::now_v7(),
        name: name.to_string(),
        description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(count))])
}

fn values(stmt: &Statement) -> Vec<Value> {
    stmt.values.as_ref().map(|v| v.0.clone()).unwrap_or_default()
}

#[tokio::test]
async fn test_find_and_count_issues_count_then_page() {
    let rows = vec![sample_role("admin"), sample_role("administrator")];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(2)]])
        .append_query_results([rows.clone()])
        .into_connection();

    let service = RolesService::new(PgRoleRepository::new(db.clone()));
    let params = FindParams {
        search: Some("adm".to_string()),
        sort_by: Some("name".to_string()),
        sort_direction: Some(SortDirection::Asc),
        offset: Some(20),
        ..Default::default()
    };
    let page = service.find(&params).await.unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.data, rows);

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 2);

    let count = &log[0].statements()[0];
    assert!(count.sql.starts_with("SELECT COUNT(*) AS num_items FROM (SELECT"), "{}", count.sql);
    assert!(count.sql.contains(r#"WHERE "roles"."name" LIKE $1"#), "{}", count.sql);
    assert!(!count.sql.contains("ORDER BY") && !count.sql.contains("OFFSET"), "{}", count.sql);
    assert_eq!(values(count), vec![Value::from("%adm%")]);

    let page_stmt = &log[1].statements()[0];
    assert!(
        page_stmt.sql.starts_with(r#"SELECT "roles"."id", "roles"."name""#),
        "{}",
        page_stmt.sql
    );
    assert!(
        page_stmt
            .sql
            .contains(r#"FROM "roles" WHERE "roles"."name" LIKE $1 ORDER BY "roles"."name" ASC LIMIT"#),
        "{}",
        page_stmt.sql
    );
    assert!(page_stmt.sql.contains("OFFSET"), "{}", page_stmt.sql);
    assert_eq!(values(page_stmt)[0], Value::from("%adm%"));
}

#[tokio::test]
async fn test_text_with_quotes_and_colons_is_bound_as_a_value() {
    let stored = sample_role("reader");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .into_connection();

    let repository = PgRoleRepository::new(db.clone());
    let query = SelectQuery::new("roles", "role").where_eq("description", "'scope:read'");
    let found = repository.find_one(query).await.unwrap();

    assert_eq!(found, Some(stored));

    let log = db.into_transaction_log();
    let stmt = &log[0].statements()[0];
    assert!(stmt.sql.contains(r#"WHERE "roles"."description" = $1"#), "{}", stmt.sql);
    assert!(!stmt.sql.contains("scope"), "{}", stmt.sql);
    assert_eq!(values(stmt)[0], Value::from("'scope:read'"));
}

#[tokio::test]
async fn test_find_rejects_unknown_sort_column_without_querying() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let service = RolesService::new(PgRoleRepository::new(db.clone()));
    let params = FindParams {
        sort_by: Some("no_such_column".to_string()),
        ..Default::default()
    };
    let err = service.find(&params).await.unwrap_err();

    assert!(matches!(err, RoleError::Crud(CrudError::Query(_))));
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_find_by_id_returns_none_for_empty_result() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<role::Model>::new()])
        .into_connection();

    let repository = PgRoleRepository::new(db);
    let found = repository.find_by_id(Uuid::now_v7()).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_delete_reports_rows_affected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let service = RolesService::new(PgRoleRepository::new(db));

    assert!(service.remove(Uuid::now_v7()).await.is_ok());
    assert!(service.remove(Uuid::now_v7()).await.is_err());
}

#[tokio::test]
async fn test_create_inserts_and_returns_row() {
    let created = sample_role("editor");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![created.clone()]])
        .into_connection();

    let service = RolesService::new(PgRoleRepository::new(db));
    let role = service
        .create(domain_roles::CreateRoleDto {
            name: "editor".to_string(),
            description: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(role, created);
}

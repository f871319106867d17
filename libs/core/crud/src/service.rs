use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::CrudEntity;
use crate::error::CrudError;
use crate::params::Page;
use crate::query::SelectQuery;
use crate::repository::CrudRepository;

/// Generic CRUD operations over one entity.
///
/// Implementors provide the repository and their error type; every
/// operation has a default implementation that may be overridden to add
/// domain rules before delegating to persistence.
#[async_trait]
pub trait CrudService<E: CrudEntity>: Send + Sync {
    type Repository: CrudRepository<E::Model, E::ActiveModel>;
    type Error: From<CrudError> + Send;

    fn repository(&self) -> &Self::Repository;

    /// Filtered, sorted page of records plus the total ignoring pagination.
    async fn find(&self, dto: &E::FindDto) -> Result<Page<E::Model>, Self::Error> {
        let query = SelectQuery::for_find(&E::CONFIG, dto.as_ref())?;
        let (data, total) = self.repository().find_and_count(query).await?;

        tracing::debug!(entity = E::CONFIG.name, total, "Listed records");
        Ok(Page { data, total })
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<E::Model>, Self::Error> {
        Ok(self.repository().find_by_id(id).await?)
    }

    async fn create(&self, dto: E::CreateDto) -> Result<E::Model, Self::Error> {
        let entity = E::new_active_model(dto);
        let created = self.repository().save(entity).await?;

        tracing::info!(entity = E::CONFIG.name, "Created record");
        Ok(created)
    }

    /// Full-field overwrite; a missing id is `CrudError::NotFound`.
    async fn update(&self, id: Uuid, dto: E::UpdateDto) -> Result<E::Model, Self::Error> {
        let entity = E::updated_active_model(id, dto);
        let updated = self.repository().update(id, entity).await?;

        tracing::info!(entity = E::CONFIG.name, %id, "Updated record");
        Ok(updated)
    }

    /// Hard delete; a missing id is `CrudError::NotFound`.
    async fn remove(&self, id: Uuid) -> Result<(), Self::Error> {
        let deleted = self.repository().delete(id).await?;
        if deleted == 0 {
            return Err(CrudError::NotFound {
                entity: E::CONFIG.name,
                id,
            }
            .into());
        }

        tracing::info!(entity = E::CONFIG.name, %id, "Removed record");
        Ok(())
    }

    async fn is_entity_exists(&self, id: Uuid) -> Result<bool, Self::Error> {
        Ok(self.repository().find_by_id(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CrudConfig;
    use crate::params::{FindParams, SortDirection};
    use crate::query::{Field, OrderBy, Predicate};
    use crate::repository::MockCrudRepository;
    use mockall::predicate::eq;
    use sea_orm::ActiveValue::{NotSet, Set};

    mod widget {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "widgets")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: Uuid,
            pub name: String,
            pub created_at: DateTimeWithTimeZone,
            pub updated_at: DateTimeWithTimeZone,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    impl CrudEntity for widget::Entity {
        type CreateDto = String;
        type UpdateDto = String;
        type FindDto = FindParams;

        const CONFIG: CrudConfig = CrudConfig {
            name: "widget",
            table: "widgets",
            search_by: "name",
            sortable: &["id", "name", "created_at", "updated_at"],
        };

        fn new_active_model(name: String) -> widget::ActiveModel {
            let now = chrono::Utc::now().fixed_offset();
            widget::ActiveModel {
                id: Set(Uuid::now_v7()),
                name: Set(name),
                created_at: Set(now),
                updated_at: Set(now),
            }
        }

        fn updated_active_model(id: Uuid, name: String) -> widget::ActiveModel {
            widget::ActiveModel {
                id: Set(id),
                name: Set(name),
                created_at: NotSet,
                updated_at: Set(chrono::Utc::now().fixed_offset()),
            }
        }
    }

    type MockWidgetRepository = MockCrudRepository<widget::Model, widget::ActiveModel>;

    struct WidgetService {
        repository: MockWidgetRepository,
    }

    impl CrudService<widget::Entity> for WidgetService {
        type Repository = MockWidgetRepository;
        type Error = CrudError;

        fn repository(&self) -> &Self::Repository {
            &self.repository
        }
    }

    fn widget(name: &str) -> widget::Model {
        let now = chrono::Utc::now().fixed_offset();
        widget::Model {
            id: Uuid::now_v7(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_defaults() {
        let rows = vec![widget("a"), widget("b")];
        let returned = rows.clone();

        let mut repository = MockWidgetRepository::new();
        repository
            .expect_find_and_count()
            .withf(|query| {
                query.predicates.is_empty()
                    && query.offset.is_none()
                    && query.limit == Some(10)
                    && query.order_by
                        == Some(OrderBy {
                            field: Field::new("widget", "updated_at"),
                            direction: SortDirection::Desc,
                        })
            })
            .times(1)
            .returning(move |_| Ok((returned.clone(), 42)));

        let service = WidgetService { repository };
        let page = service.find(&FindParams::default()).await.unwrap();

        assert_eq!(page.data, rows);
        assert_eq!(page.total, 42);
    }

    #[tokio::test]
    async fn test_find_search_uses_configured_column() {
        let mut repository = MockWidgetRepository::new();
        repository
            .expect_find_and_count()
            .withf(|query| {
                query.predicates
                    == vec![Predicate::Like {
                        field: Field::new("widget", "name"),
                        pattern: "%some name%".to_string(),
                    }]
            })
            .times(1)
            .returning(|_| Ok((vec![], 0)));

        let service = WidgetService { repository };
        let params = FindParams {
            search: Some("some name".to_string()),
            ..Default::default()
        };
        let page = service.find(&params).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_find_rejects_unsortable_column_before_querying() {
        let mut repository = MockWidgetRepository::new();
        repository.expect_find_and_count().never();

        let service = WidgetService { repository };
        let params = FindParams {
            sort_by: Some("secret".to_string()),
            ..Default::default()
        };
        let err = service.find(&params).await.unwrap_err();

        assert!(matches!(err, CrudError::Query(_)));
    }

    #[tokio::test]
    async fn test_is_entity_exists_false_when_missing() {
        let id = Uuid::now_v7();
        let mut repository = MockWidgetRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = WidgetService { repository };
        assert!(!service.is_entity_exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_entity_exists_true_when_found() {
        let id = Uuid::now_v7();
        let mut repository = MockWidgetRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(Some(widget("found"))));

        let service = WidgetService { repository };
        assert!(service.is_entity_exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_saves_built_entity() {
        let mut repository = MockWidgetRepository::new();
        repository
            .expect_save()
            .withf(|model| matches!(&model.name, Set(name) if name == "gear"))
            .times(1)
            .returning(|_| Ok(widget("gear")));

        let service = WidgetService { repository };
        let created = service.create("gear".to_string()).await.unwrap();

        assert_eq!(created.name, "gear");
    }

    #[tokio::test]
    async fn test_update_overwrites_by_id() {
        let id = Uuid::now_v7();
        let mut repository = MockWidgetRepository::new();
        repository
            .expect_update()
            .withf(move |target, model| {
                *target == id
                    && matches!(&model.id, Set(model_id) if *model_id == id)
                    && matches!(model.created_at, NotSet)
            })
            .times(1)
            .returning(|_, _| Ok(widget("renamed")));

        let service = WidgetService { repository };
        let updated = service.update(id, "renamed".to_string()).await.unwrap();

        assert_eq!(updated.name, "renamed");
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let id = Uuid::now_v7();
        let mut repository = MockWidgetRepository::new();
        repository
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(0));

        let service = WidgetService { repository };
        let err = service.remove(id).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("widget"));
    }

    #[tokio::test]
    async fn test_remove_existing() {
        let mut repository = MockWidgetRepository::new();
        repository.expect_delete().times(1).returning(|_| Ok(1));

        let service = WidgetService { repository };
        assert!(service.remove(Uuid::now_v7()).await.is_ok());
    }
}

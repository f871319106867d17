use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait,
};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::entity::CrudEntity;
use crate::error::{CrudError, CrudResult};
use crate::query::SelectQuery;
use crate::render::{filtered, to_select};

/// Persistence collaborator of the generic CRUD operations.
///
/// `M` is the stored record, `A` the sea-orm active model used for writes.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CrudRepository<M: Send + Sync + 'static, A: Send + Sync + 'static>: Send + Sync {
    /// Primary-key lookup
    async fn find_by_id(&self, id: Uuid) -> CrudResult<Option<M>>;

    /// First record matching the query
    async fn find_one(&self, query: SelectQuery) -> CrudResult<Option<M>>;

    /// One page of records plus the number of records matching the predicates
    async fn find_and_count(&self, query: SelectQuery) -> CrudResult<(Vec<M>, u64)>;

    /// Insert a new record
    async fn save(&self, model: A) -> CrudResult<M>;

    /// Overwrite the record with the given id
    async fn update(&self, id: Uuid, model: A) -> CrudResult<M>;

    /// Delete by id, returning the number of rows removed
    async fn delete(&self, id: Uuid) -> CrudResult<u64>;
}

/// sea-orm implementation of [`CrudRepository`] for any [`CrudEntity`].
pub struct SeaOrmRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for SeaOrmRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: CrudEntity> SeaOrmRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl<E> CrudRepository<E::Model, E::ActiveModel> for SeaOrmRepository<E>
where
    E: CrudEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    async fn find_by_id(&self, id: Uuid) -> CrudResult<Option<E::Model>> {
        Ok(E::find_by_id(id).one(&self.db).await?)
    }

    async fn find_one(&self, query: SelectQuery) -> CrudResult<Option<E::Model>> {
        Ok(to_select::<E>(&query)?.one(&self.db).await?)
    }

    async fn find_and_count(&self, query: SelectQuery) -> CrudResult<(Vec<E::Model>, u64)> {
        let total = filtered::<E>(&query)?.count(&self.db).await?;
        let data = to_select::<E>(&query)?.all(&self.db).await?;

        tracing::debug!(entity = E::CONFIG.name, total, returned = data.len(), "find_and_count");
        Ok((data, total))
    }

    async fn save(&self, model: E::ActiveModel) -> CrudResult<E::Model> {
        Ok(model.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, model: E::ActiveModel) -> CrudResult<E::Model> {
        match model.update(&self.db).await {
            Ok(updated) => Ok(updated),
            Err(DbErr::RecordNotUpdated) => Err(CrudError::NotFound {
                entity: E::CONFIG.name,
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> CrudResult<u64> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

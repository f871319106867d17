use async_trait::async_trait;
use core_crud::{CrudEntity, CrudService, Field, Predicate, SelectQuery};
use domain_roles::permission;
use sea_orm::EntityName;
use tracing::instrument;
use uuid::Uuid;

use crate::entity;
use crate::error::{UserError, UserResult};
use crate::models::{CreateUserDto, UpdateUserDto, UserWithPermissions};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;

const PERMISSION_ALIAS: &str = "permission";

/// User management on top of the generic CRUD operations.
///
/// Overrides `create` (username uniqueness, hashing) and `update`
/// (re-hashing) and adds username and permission lookups.
pub struct UsersService<R, H> {
    repository: R,
    hasher: H,
}

impl<R: Clone, H: Clone> Clone for UsersService<R, H> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<R, H> UsersService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    pub fn new(repository: R, hasher: H) -> Self {
        Self { repository, hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    fn base_query() -> SelectQuery {
        let config = &entity::Entity::CONFIG;
        SelectQuery::new(config.table, config.name)
    }

    /// Exact-match lookup by username
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> UserResult<Option<entity::Model>> {
        let query = Self::base_query().where_eq("username", username);
        Ok(self.repository.find_one(query).await?)
    }

    /// The user with the allowed permissions of their role, or `None`.
    ///
    /// The allowed-permission filter sits in the WHERE clause, so a user
    /// whose role grants nothing comes back as `None` too.
    #[instrument(skip(self))]
    pub async fn get_user_with_permissions(
        &self,
        id: Uuid,
    ) -> UserResult<Option<UserWithPermissions>> {
        let allowed = Predicate::Eq {
            field: Field::new(PERMISSION_ALIAS, "is_allowed"),
            value: true.into(),
        };

        let query = Self::base_query()
            .where_eq("id", id)
            .and_where(allowed)
            .left_join_and_map_many(
                "user.permissions",
                permission::Entity.table_name(),
                PERMISSION_ALIAS,
                "role_id",
                "role_id",
            );

        Ok(self.repository.find_with_permissions(query).await?)
    }

    /// Fetch a user or fail with [`UserError::NotFound`]
    pub async fn get_user(&self, id: Uuid) -> UserResult<entity::Model> {
        self.find_one(id).await?.ok_or(UserError::NotFound(id))
    }
}

#[async_trait]
impl<R, H> CrudService<entity::Entity> for UsersService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    type Repository = R;
    type Error = UserError;

    fn repository(&self) -> &R {
        &self.repository
    }

    #[instrument(skip(self, dto), fields(username = %dto.username))]
    async fn create(&self, dto: CreateUserDto) -> UserResult<entity::Model> {
        if self.find_by_username(&dto.username).await?.is_some() {
            tracing::info!("Rejected duplicate username");
            return Err(UserError::AlreadyExists);
        }

        let password = self.hasher.hash(&dto.password).await?;
        let model = entity::Entity::new_active_model(CreateUserDto { password, ..dto });
        let created = self.repository.save(model).await?;

        tracing::info!(user_id = %created.id, "Created user");
        Ok(created)
    }

    #[instrument(skip(self, dto), fields(username = %dto.username))]
    async fn update(&self, id: Uuid, dto: UpdateUserDto) -> UserResult<entity::Model> {
        if let Some(other) = self.find_by_username(&dto.username).await?
            && other.id != id
        {
            return Err(UserError::AlreadyExists);
        }

        let password = self.hasher.hash(&dto.password).await?;
        let model = entity::Entity::updated_active_model(id, UpdateUserDto { password, ..dto });
        let updated = self.repository.update(id, model).await?;

        tracing::info!("Updated user");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::MockPasswordHasher;
    use crate::repository::mock::MockUserRepo;
    use core_crud::{FindParams, JoinMany, SortDirection};
    use mockall::predicate::eq;
    use sea_orm::{ActiveValue, Value};

    fn user(username: &str) -> entity::Model {
        let now = chrono::Utc::now().fixed_offset();
        entity::Model {
            id: Uuid::now_v7(),
            username: username.to_string(),
            password: "$argon2id$stored".to_string(),
            role_id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
        }
    }

    fn create_dto(username: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password: "s3cret!".to_string(),
            role_id: Uuid::now_v7(),
        }
    }

    fn is_username_lookup(query: &SelectQuery, username: &str) -> bool {
        query.predicates
            == vec![Predicate::Eq {
                field: Field::new("user", "username"),
                value: Value::from(username),
            }]
    }

    #[tokio::test]
    async fn test_find_by_username_is_exact_match() {
        let existing = user("admin");
        let mut repository = MockUserRepo::new();
        repository
            .expect_find_one()
            .withf(|query| query.alias == "user" && is_username_lookup(query, "admin"))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = UsersService::new(repository, MockPasswordHasher::new());
        let found = service.find_by_username("admin").await.unwrap();

        assert_eq!(found.unwrap().username, "admin");
    }

    #[tokio::test]
    async fn test_create_rejects_existing_username() {
        let mut repository = MockUserRepo::new();
        repository
            .expect_find_one()
            .times(1)
            .returning(|_| Ok(Some(user("admin"))));
        repository.expect_save().never();

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let service = UsersService::new(repository, hasher);
        let err = service.create(create_dto("admin")).await.unwrap_err();

        assert!(matches!(err, UserError::AlreadyExists));
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn test_create_hashes_and_saves_once() {
        let created = user("newbie");
        let returned = created.clone();

        let mut repository = MockUserRepo::new();
        repository
            .expect_find_one()
            .withf(|query| is_username_lookup(query, "newbie"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_save()
            .withf(|model| {
                model.username == ActiveValue::Set("newbie".to_string())
                    && model.password == ActiveValue::Set("hashed".to_string())
            })
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|plaintext| plaintext == "s3cret!")
            .times(1)
            .returning(|_| Ok("hashed".to_string()));

        let service = UsersService::new(repository, hasher);
        let result = service.create(create_dto("newbie")).await.unwrap();

        assert_eq!(result, created);
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let id = Uuid::now_v7();
        let mut repository = MockUserRepo::new();
        repository.expect_find_one().times(1).returning(|_| Ok(None));
        repository
            .expect_update()
            .withf(move |target, model| {
                *target == id
                    && model.password == ActiveValue::Set("rehashed".to_string())
                    && model.created_at.is_not_set()
            })
            .times(1)
            .returning(|_, _| Ok(user("renamed")));

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Ok("rehashed".to_string()));

        let service = UsersService::new(repository, hasher);
        let dto = UpdateUserDto {
            username: "renamed".to_string(),
            password: "n3w-pass".to_string(),
            role_id: Uuid::now_v7(),
        };
        service.update(id, dto).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_username_of_another_user() {
        let mut repository = MockUserRepo::new();
        repository
            .expect_find_one()
            .times(1)
            .returning(|_| Ok(Some(user("taken"))));
        repository.expect_update().never();

        let service = UsersService::new(repository, MockPasswordHasher::new());
        let dto = UpdateUserDto {
            username: "taken".to_string(),
            password: "n3w-pass".to_string(),
            role_id: Uuid::now_v7(),
        };
        let err = service.update(Uuid::now_v7(), dto).await.unwrap_err();

        assert!(matches!(err, UserError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_get_user_with_permissions_builds_join_query() {
        let mut repository = MockUserRepo::new();
        repository
            .expect_find_with_permissions()
            .withf(|query| {
                query.predicates
                    == vec![
                        Predicate::Eq {
                            field: Field::new("user", "id"),
                            value: Value::from(Uuid::nil()),
                        },
                        Predicate::Eq {
                            field: Field::new("permission", "is_allowed"),
                            value: Value::from(true),
                        },
                    ]
                    && query.joins
                        == vec![JoinMany {
                            property: "user.permissions".to_string(),
                            table: "permissions".to_string(),
                            alias: "permission".to_string(),
                            joined: Field::new("permission", "role_id"),
                            root: Field::new("user", "role_id"),
                        }]
            })
            .times(1)
            .returning(|_| Ok(None));

        let service = UsersService::new(repository, MockPasswordHasher::new());
        let result = service.get_user_with_permissions(Uuid::nil()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_searches_by_username() {
        let mut repository = MockUserRepo::new();
        repository
            .expect_find_and_count()
            .withf(|query| {
                query.predicates
                    == vec![Predicate::Like {
                        field: Field::new("user", "username"),
                        pattern: "%some name%".to_string(),
                    }]
                    && query.offset == Some(300)
                    && query.order_by.as_ref().is_some_and(|order| {
                        order.field == Field::new("user", "updated_at")
                            && order.direction == SortDirection::Desc
                    })
            })
            .times(1)
            .returning(|_| Ok((vec![], 0)));

        let service = UsersService::new(repository, MockPasswordHasher::new());
        let params = FindParams {
            search: Some("some name".to_string()),
            offset: Some(300),
            ..Default::default()
        };
        let page = service.find(&params).await.unwrap();

        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_find_rejects_password_as_sort_column() {
        let mut repository = MockUserRepo::new();
        repository.expect_find_and_count().never();

        let service = UsersService::new(repository, MockPasswordHasher::new());
        let params = FindParams {
            sort_by: Some("password".to_string()),
            ..Default::default()
        };
        let err = service.find(&params).await.unwrap_err();

        assert!(matches!(err, UserError::Crud(core_crud::CrudError::Query(_))));
    }

    #[tokio::test]
    async fn test_remove_delegates_to_delete() {
        let id = Uuid::now_v7();
        let mut repository = MockUserRepo::new();
        repository
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(1));

        let service = UsersService::new(repository, MockPasswordHasher::new());
        service.remove(id).await.unwrap();
    }
}

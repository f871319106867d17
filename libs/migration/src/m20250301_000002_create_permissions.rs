use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_roles::Roles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .if_not_exists()
                    .col(pk_uuid(Permissions::Id))
                    .col(uuid(Permissions::RoleId))
                    .col(string(Permissions::Name))
                    .col(boolean(Permissions::IsAllowed).default(true))
                    .col(
                        timestamp_with_time_zone(Permissions::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Permissions::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permissions_role_id")
                            .from(Permissions::Table, Permissions::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per permission name within a role
        manager
            .create_index(
                Index::create()
                    .name("idx_permissions_role_id_name")
                    .table(Permissions::Table)
                    .col(Permissions::RoleId)
                    .col(Permissions::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER permissions_touch_updated_at
                    BEFORE UPDATE ON permissions
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS permissions_touch_updated_at ON permissions")
            .await?;

        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Id,
    RoleId,
    Name,
    IsAllowed,
    CreatedAt,
    UpdatedAt,
}

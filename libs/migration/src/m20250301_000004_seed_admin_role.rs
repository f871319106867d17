use sea_orm_migration::prelude::*;

/// Fixed id of the seeded `admin` role
pub const ADMIN_ROLE_ID: &str = "01950000-0000-7000-8000-000000000001";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(&format!(
            r#"
            INSERT INTO roles (id, name, description, created_at, updated_at)
            VALUES ('{ADMIN_ROLE_ID}', 'admin', 'Full access to users and roles', NOW(), NOW())
            ON CONFLICT (id) DO NOTHING
            "#
        ))
        .await?;

        db.execute_unprepared(&format!(
            r#"
            INSERT INTO permissions (id, role_id, name, is_allowed, created_at, updated_at)
            VALUES
                ('01950000-0000-7000-8000-000000000101', '{ADMIN_ROLE_ID}', 'users.read', true, NOW(), NOW()),
                ('01950000-0000-7000-8000-000000000102', '{ADMIN_ROLE_ID}', 'users.write', true, NOW(), NOW()),
                ('01950000-0000-7000-8000-000000000103', '{ADMIN_ROLE_ID}', 'roles.read', true, NOW(), NOW()),
                ('01950000-0000-7000-8000-000000000104', '{ADMIN_ROLE_ID}', 'roles.write', true, NOW(), NOW())
            ON CONFLICT (id) DO NOTHING
            "#
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!("DELETE FROM roles WHERE id = '{ADMIN_ROLE_ID}'"))
            .await?;

        Ok(())
    }
}

pub use sea_orm_migration::prelude::*;

mod m20250301_000000_bootstrap;
mod m20250301_000001_create_roles;
mod m20250301_000002_create_permissions;
mod m20250301_000003_create_users;
mod m20250301_000004_seed_admin_role;

pub use m20250301_000004_seed_admin_role::ADMIN_ROLE_ID;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_bootstrap::Migration),
            Box::new(m20250301_000001_create_roles::Migration),
            Box::new(m20250301_000002_create_permissions::Migration),
            Box::new(m20250301_000003_create_users::Migration),
            Box::new(m20250301_000004_seed_admin_role::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_unique() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_admin_role_id_is_a_uuid() {
        assert!(ADMIN_ROLE_ID.parse::<sea_orm::prelude::Uuid>().is_ok());
    }
}

//! Creates the initial administrator so a fresh database can be logged into.

use core_crud::CrudService;
use domain_users::{CreateUserDto, PasswordHasher, UserRepository, UsersService};
use eyre::WrapErr;
use tracing::info;
use validator::Validate;

use crate::config::AdminBootstrap;

/// No-op when a user with the configured username already exists.
pub async fn ensure_admin_user<R, H>(
    users: &UsersService<R, H>,
    admin: &AdminBootstrap,
) -> eyre::Result<()>
where
    R: UserRepository,
    H: PasswordHasher,
{
    if users.find_by_username(&admin.username).await?.is_some() {
        info!(username = %admin.username, "Admin user already present");
        return Ok(());
    }

    let dto = CreateUserDto {
        username: admin.username.clone(),
        password: admin.password.clone(),
        role_id: admin.role_id,
    };
    dto.validate()
        .wrap_err("ADMIN_USERNAME/ADMIN_PASSWORD do not satisfy the user rules")?;

    let user = users.create(dto).await?;
    info!(user_id = %user.id, username = %user.username, "Created admin user");
    Ok(())
}

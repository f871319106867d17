use axum_helpers::JwtConfig;
use core_config::{EtcdConfig, FromEnv, env_optional, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::fmt;
use uuid::Uuid;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub database: PostgresConfig,
    pub etcd: EtcdConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub admin: Option<AdminBootstrap>,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DB_* variables
        let etcd = EtcdConfig::from_env()?; // Optional ETCD_HOST/ETCD_PORT
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // Required JWT_SECRET
        let admin = AdminBootstrap::from_env()?;

        Ok(Self {
            database,
            etcd,
            server,
            jwt,
            admin,
            environment,
        })
    }
}

/// Initial administrator created at startup when `ADMIN_USERNAME` and
/// `ADMIN_PASSWORD` are both set and no user with that name exists.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
    pub role_id: Uuid,
}

impl AdminBootstrap {
    pub fn from_env() -> eyre::Result<Option<Self>> {
        let (Some(username), Some(password)) =
            (env_optional("ADMIN_USERNAME"), env_optional("ADMIN_PASSWORD"))
        else {
            return Ok(None);
        };

        let role_id = match env_optional("ADMIN_ROLE_ID") {
            Some(raw) => core_config::parse_env("ADMIN_ROLE_ID", &raw)?,
            None => migration::ADMIN_ROLE_ID.parse()?,
        };

        Ok(Some(Self {
            username,
            password,
            role_id,
        }))
    }
}

impl fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role_id", &self.role_id)
            .finish()
    }
}

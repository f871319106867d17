use crate::{env_optional, parse_env, ConfigError, FromEnv};

/// Coordination service endpoint.
///
/// `ETCD_HOST` and `ETCD_PORT` are optional; the endpoint is only known when
/// the host is set. Port defaults to 2379.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EtcdConfig {
    pub host: Option<String>,
    pub port: u16,
}

impl EtcdConfig {
    /// `http://host:port`, or `None` when no host is configured
    pub fn endpoint(&self) -> Option<String> {
        self.host
            .as_ref()
            .map(|host| format!("http://{}:{}", host, self.port))
    }
}

impl FromEnv for EtcdConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = match env_optional("ETCD_PORT") {
            Some(raw) => parse_env("ETCD_PORT", &raw)?,
            None => 2379,
        };

        Ok(Self {
            host: env_optional("ETCD_HOST"),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etcd_config_unset() {
        temp_env::with_vars([("ETCD_HOST", None::<&str>), ("ETCD_PORT", None)], || {
            let config = EtcdConfig::from_env().unwrap();
            assert_eq!(config.host, None);
            assert_eq!(config.port, 2379);
            assert_eq!(config.endpoint(), None);
        });
    }

    #[test]
    fn test_etcd_config_endpoint() {
        temp_env::with_vars(
            [("ETCD_HOST", Some("etcd.local")), ("ETCD_PORT", Some("12379"))],
            || {
                let config = EtcdConfig::from_env().unwrap();
                assert_eq!(config.endpoint().as_deref(), Some("http://etcd.local:12379"));
            },
        );
    }

    #[test]
    fn test_etcd_config_invalid_port() {
        temp_env::with_var("ETCD_PORT", Some("abc"), || {
            let err = EtcdConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("ETCD_PORT"));
        });
    }
}

//! Service settings loaded via OrthoConfig.
//!
//! Values come from `EXERCISE_*` environment variables, an optional
//! configuration file, or command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised when settings cannot be turned into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid host address `{value}`")]
    InvalidHost { value: String },
}

/// Settings controlling the listener and the log store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXERCISE")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind; defaults to 3000.
    pub port: Option<u16>,
    /// PostgreSQL URL. When absent the service keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Return the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP
    /// address.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::settings::AppSettings;
    ///
    /// let settings = AppSettings {
    ///     host: Some("127.0.0.1".into()),
    ///     port: Some(8080),
    ///     database_url: None,
    ///     pool_max_size: None,
    /// };
    /// assert_eq!(settings.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
    /// ```
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HOST,
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidHost {
                value: raw.to_owned(),
            })?,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Return the database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("exercise-tracker")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("EXERCISE_HOST", None::<String>),
            ("EXERCISE_PORT", None::<String>),
            ("EXERCISE_DATABASE_URL", None::<String>),
            ("EXERCISE_POOL_MAX_SIZE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT)
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXERCISE_HOST", Some("127.0.0.1".to_owned())),
            ("EXERCISE_PORT", Some("8088".to_owned())),
            (
                "EXERCISE_DATABASE_URL",
                Some("postgres://tracker@localhost/exercises".to_owned()),
            ),
            ("EXERCISE_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address").to_string(),
            "127.0.0.1:8088"
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://tracker@localhost/exercises")
        );
        assert_eq!(settings.pool_max_size(), 4);
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(Some(""))]
    #[case(None)]
    fn blank_database_url_means_in_memory(#[case] url: Option<&str>) {
        let settings = AppSettings {
            host: None,
            port: None,
            database_url: url.map(str::to_owned),
            pool_max_size: None,
        };
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn unparsable_host_is_rejected() {
        let settings = AppSettings {
            host: Some("not a host".into()),
            port: None,
            database_url: None,
            pool_max_size: None,
        };
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost {
                value: "not a host".into()
            })
        );
    }
}

// ============================
// crates/gatehouse-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory for the credential store
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Server-side session TTL in seconds; 0 means sessions never expire
    pub session_ttl_secs: u64,
    /// Max-Age of the session cookie in seconds (transport expiry,
    /// independent of the registry's TTL)
    pub cookie_max_age_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().expect("valid default address"),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            session_ttl_secs: 0,
            cookie_max_age_secs: 3600,
        }
    }
}

impl Settings {
    /// Load settings: defaults, overridden by `gatehouse.toml`, overridden by
    /// `GATEHOUSE_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from("gatehouse.toml")
    }

    /// Load settings with an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("GATEHOUSE_"))
            .extract()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.session_ttl_secs, 0);
        assert_eq!(settings.cookie_max_age_secs, 3600);
    }

    #[test]
    fn test_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GATEHOUSE_BIND_ADDR", "0.0.0.0:9000");
            jail.set_env("GATEHOUSE_SESSION_TTL_SECS", "86400");

            let settings = Settings::load().expect("settings load");
            assert_eq!(settings.bind_addr, "0.0.0.0:9000".parse().unwrap());
            assert_eq!(settings.session_ttl_secs, 86400);
            // untouched fields keep their defaults
            assert_eq!(settings.cookie_max_age_secs, 3600);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "gatehouse.toml",
                r#"
                data_dir = "/var/lib/gatehouse"
                log_level = "debug"
                "#,
            )?;

            let settings = Settings::load().expect("settings load");
            assert_eq!(settings.data_dir, PathBuf::from("/var/lib/gatehouse"));
            assert_eq!(settings.log_level, "debug");
            Ok(())
        });
    }
}

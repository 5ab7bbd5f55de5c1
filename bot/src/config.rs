use crate::errors::{Error, Result};

use log::LevelFilter;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "./links.db3";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    /// Secret path segment the webhook is served under
    pub webhook_url_id: String,
    pub db_path: PathBuf,
    pub listen_addr: SocketAddr,
    /// Level for this bot's own crates, dependencies always log at warn
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = get("BOT_TOKEN").ok_or(Error::ConstStr("BOT_TOKEN is not set"))?;
        let webhook_url_id =
            get("WEBHOOK_URL_ID").ok_or(Error::ConstStr("WEBHOOK_URL_ID is not set"))?;
        if !webhook_url_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidArgument(
                "WEBHOOK_URL_ID may only contain letters, digits, - and _".to_string(),
            ));
        }

        let db_path = PathBuf::from(get("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()));

        let listen_addr = get("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|why| Error::InvalidArgument(format!("LISTEN_ADDR is not valid: {why}")))?;

        let log_level = match get("LOG_LEVEL") {
            Some(level) => level
                .parse::<LevelFilter>()
                .map_err(|_| Error::InvalidArgument(format!("unknown LOG_LEVEL {level}")))?,
            None => LevelFilter::Debug,
        };

        Ok(Config {
            token,
            webhook_url_id,
            db_path,
            listen_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("BOT_TOKEN", "123:ABC"), ("WEBHOOK_URL_ID", "hook")]).unwrap();

        assert_eq!(config.token, "123:ABC");
        assert_eq!(config.webhook_url_id, "hook");
        assert_eq!(config.db_path, PathBuf::from("./links.db3"));
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("BOT_TOKEN", "123:ABC"),
            ("WEBHOOK_URL_ID", "hook"),
            ("DB_PATH", "/data/links.db3"),
            ("LISTEN_ADDR", "127.0.0.1:9000"),
            ("LOG_LEVEL", "info"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/links.db3"));
        assert_eq!(config.listen_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_missing_required() {
        assert!(config(&[("WEBHOOK_URL_ID", "hook")]).is_err());
        assert!(config(&[("BOT_TOKEN", "123:ABC")]).is_err());
        assert!(config(&[("BOT_TOKEN", "  "), ("WEBHOOK_URL_ID", "hook")]).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let base = [("BOT_TOKEN", "123:ABC"), ("WEBHOOK_URL_ID", "hook")];

        assert!(config(&[base[0], ("WEBHOOK_URL_ID", "a/b")]).is_err());
        assert!(config(&[base[0], base[1], ("LISTEN_ADDR", "localhost")]).is_err());
        assert!(config(&[base[0], base[1], ("LOG_LEVEL", "loud")]).is_err());
    }
}

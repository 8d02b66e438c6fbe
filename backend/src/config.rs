use std::env;
use std::net::SocketAddr;

use anyhow::{bail, Context, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Redis { url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let redis_url = lookup("REDIS_URL");
        let store = match lookup("TODOS_STORE").as_deref() {
            Some("memory") => StoreKind::Memory,
            Some("redis") => StoreKind::Redis {
                url: redis_url.unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            },
            Some(other) => bail!("unknown TODOS_STORE {:?}, expected redis or memory", other),
            None => match redis_url {
                Some(url) => StoreKind::Redis { url },
                None => StoreKind::Memory,
            },
        };

        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Ok(Self {
            bind_addr,
            store,
            static_dir,
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
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_memory_without_redis_url() {
        let settings = config(&[]).unwrap();
        assert_eq!(settings.store, StoreKind::Memory);
        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.static_dir, "frontend/dist");
    }

    #[test]
    fn redis_url_selects_redis() {
        let settings = config(&[("REDIS_URL", "redis://cache:6379")]).unwrap();
        assert_eq!(
            settings.store,
            StoreKind::Redis {
                url: "redis://cache:6379".into()
            }
        );

        let forced = config(&[("REDIS_URL", "redis://cache:6379"), ("TODOS_STORE", "memory")]);
        assert_eq!(forced.unwrap().store, StoreKind::Memory);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("TODOS_STORE", "postgres")]).is_err());
        assert!(config(&[("BIND_ADDR", "localhost")]).is_err());
    }
}

use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{bail, Context, Result};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_PATH: &str = "db";

/// Which backend holds the `todos` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sled,
    Memory,
}
impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sled" => Ok(StoreKind::Sled),
            "memory" => Ok(StoreKind::Memory),
            other => bail!("unknown store {:?}, expected \"sled\" or \"memory\"", other),
        }
    }
}

/// Server settings, read from `TODO_ADDR`, `TODO_DB_PATH` and `TODO_STORE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub store: StoreKind,
}
impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = lookup("TODO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .parse()
            .with_context(|| format!("TODO_ADDR is not a socket address: {:?}", addr))?;
        let db_path = lookup("TODO_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
            .into();
        let store = match lookup("TODO_STORE") {
            Some(store) => store.parse().context("invalid TODO_STORE")?,
            None => StoreKind::Sled,
        };
        Ok(Self {
            bind_addr,
            db_path,
            store,
        })
    }
}

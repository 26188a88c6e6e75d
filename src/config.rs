use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Context};

use crate::filters::BlueprintFilter;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

const FILTER_VAR: &str = "BLUEPRINTS_FILTER";
const STORE_VAR: &str = "BLUEPRINTS_STORE";
const HOST_VAR: &str = "BLUEPRINTS_HOST";
const PORT_VAR: &str = "BLUEPRINTS_PORT";
const MONGODB_URI_VAR: &str = "MONGODB_URI";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Store {
    Memory,
    Mongo { uri: String },
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Memory => f.write_str("memory"),
            Store::Mongo { .. } => f.write_str("mongodb"),
        }
    }
}

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub filter: BlueprintFilter,
    pub store: Store,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = match lookup(FILTER_VAR) {
            Some(value) => BlueprintFilter::from_str(&value).context(FILTER_VAR)?,
            None => BlueprintFilter::default(),
        };

        let store_name = lookup(STORE_VAR).map(|name| name.trim().to_ascii_lowercase());
        let store = match store_name.as_deref() {
            None | Some("memory") => Store::Memory,
            Some("mongodb") => {
                let uri = lookup(MONGODB_URI_VAR).ok_or_else(|| {
                    anyhow!("{} must be set when {}=mongodb", MONGODB_URI_VAR, STORE_VAR)
                })?;
                Store::Mongo { uri }
            }
            Some(other) => bail!(
                "{}: unknown store '{}', expected memory or mongodb",
                STORE_VAR,
                other
            ),
        };

        let host = lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup(PORT_VAR) {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("{}: invalid port '{}'", PORT_VAR, port))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            filter,
            store,
            host,
            port,
        })
    }
}

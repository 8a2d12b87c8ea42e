use crate::error::AppError;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Loads `configuration.*` (optional), `.env`, then `APP__`-prefixed variables.
    ///
    /// A bare `PORT` variable is honoured when nothing else sets the port.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = builder(std::env::var("PORT").ok())?
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn builder(port_fallback: Option<String>) -> Result<ConfigBuilder<DefaultState>, AppError> {
    let builder = Cfg::builder();
    match port_fallback {
        Some(port) => Ok(builder.set_default("port", port)?),
        None => Ok(builder),
    }
}

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use atelier_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_GRAPHQL_MAX_DEPTH: usize = 10;
const DEFAULT_GRAPHQL_MAX_COMPLEXITY: usize = 200;

/// Backing store for blueprints and placed instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentStoreConfig {
    Memory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub dev_seed: bool,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub content_store: ContentStoreConfig,
    pub seed_system_blueprints: bool,
    pub graphql_max_depth: usize,
    pub graphql_max_complexity: usize,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = env::args().nth(1);
        let migrate_only = command.as_deref() == Some("migrate");
        let dev_seed = command.as_deref() == Some("seed");

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let content_store = match env::var("CONTENT_STORE")
            .unwrap_or_else(|_| "memory".to_owned())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => ContentStoreConfig::Memory,
            "postgres" => ContentStoreConfig::Postgres {
                database_url: required_non_empty_env("DATABASE_URL")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "CONTENT_STORE must be either 'memory' or 'postgres', got '{other}'"
                )));
            }
        };

        if migrate_only && content_store == ContentStoreConfig::Memory {
            return Err(AppError::Validation(
                "migrate requires CONTENT_STORE=postgres".to_owned(),
            ));
        }

        let seed_system_blueprints = parse_flag(
            "SEED_SYSTEM_BLUEPRINTS",
            env::var("SEED_SYSTEM_BLUEPRINTS").ok().as_deref(),
            true,
        )?;
        let graphql_max_depth = parse_limit(
            "GRAPHQL_MAX_DEPTH",
            env::var("GRAPHQL_MAX_DEPTH").ok().as_deref(),
            DEFAULT_GRAPHQL_MAX_DEPTH,
        )?;
        let graphql_max_complexity = parse_limit(
            "GRAPHQL_MAX_COMPLEXITY",
            env::var("GRAPHQL_MAX_COMPLEXITY").ok().as_deref(),
            DEFAULT_GRAPHQL_MAX_COMPLEXITY,
        )?;

        Ok(Self {
            migrate_only,
            dev_seed,
            frontend_url,
            api_host,
            api_port,
            content_store,
            seed_system_blueprints,
            graphql_max_depth,
            graphql_max_complexity,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_flag(name: &str, value: Option<&str>, default: bool) -> Result<bool, AppError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(default);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "{name} must be 'true' or 'false', got '{value}'"
        ))),
    }
}

fn parse_limit(name: &str, value: Option<&str>, default: usize) -> Result<usize, AppError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(default);
    };

    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(AppError::Validation(format!(
            "{name} must be a positive integer, got '{value}'"
        ))),
    }
}

//! Centralized configuration (environment variables + defaults).
//!
//! Everything is resolved through a key lookup function so the parsing can be
//! exercised without mutating the process environment; `from_env` is the
//! production entry point and loads `.env` first.

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the PostgreSQL server lives.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseTarget {
    /// `DATABASE_URL` was set; it wins over the discrete variables.
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
        ssl_mode: String,
    },
}

impl DatabaseTarget {
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        match self {
            DatabaseTarget::Url(url) => {
                PgConnectOptions::from_str(url).context("DATABASE_URL is not a valid PostgreSQL URL")
            }
            DatabaseTarget::Parts {
                host,
                port,
                user,
                password,
                name,
                ssl_mode,
            } => {
                let ssl_mode = PgSslMode::from_str(ssl_mode)
                    .with_context(|| format!("DB_SSLMODE has an unsupported value: {ssl_mode}"))?;
                Ok(PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(user)
                    .password(password)
                    .database(name)
                    .ssl_mode(ssl_mode))
            }
        }
    }

    /// Human readable target with the password left out.
    pub fn redacted(&self) -> String {
        match self {
            DatabaseTarget::Url(url) => redact_url(url),
            DatabaseTarget::Parts {
                host,
                port,
                user,
                name,
                ssl_mode,
                ..
            } => format!("host={host} port={port} user={user} dbname={name} sslmode={ssl_mode}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseTarget,
    pub max_connections: u32,
    pub port: u16,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => DatabaseTarget::Url(url),
            None => DatabaseTarget::Parts {
                host: get("DB_HOST", "localhost"),
                port: parse_var("DB_PORT", lookup("DB_PORT"), 5432)?,
                user: get("DB_USER", "postgres"),
                password: get("DB_PASSWORD", "postgres"),
                name: get("DB_NAME", "reviews_db"),
                ssl_mode: get("DB_SSLMODE", "disable"),
            },
        };

        let max_connections = parse_var(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?
        .max(1);

        Ok(Self {
            database,
            max_connections,
            port: parse_var("PORT", lookup("PORT"), DEFAULT_PORT)?,
        })
    }
}

/// Drops user info and the query string (which may carry `password=`).
fn redact_url(url: &str) -> String {
    let (scheme, rest) = url.split_once("://").unwrap_or(("postgres", url));
    let (location, query) = match rest.split_once('?') {
        Some((location, _)) => (location, "?***"),
        None => (rest, ""),
    };
    match location.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}{query}"),
        None => format!("{scheme}://{location}{query}"),
    }
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {value:?}")),
    }
}

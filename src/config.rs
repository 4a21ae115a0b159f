// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and carried
//! through the application as an explicit [`Config`] value.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATABASE_PATH` | redb database file | `data/community.redb` |
//! | `JWT_SECRET` | HMAC secret used to sign session tokens | `change_me` |
//! | `JWT_ALG` | Token signing algorithm (`HS256`, `HS384`, `HS512`) | `HS256` |
//! | `JWT_EXPIRE_MINUTES` | Session token lifetime in minutes (1 to 525600) | `60` |
//! | `BCRYPT_COST` | bcrypt work factor | `12` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_ALG_ENV: &str = "JWT_ALG";
pub const JWT_EXPIRE_MINUTES_ENV: &str = "JWT_EXPIRE_MINUTES";
pub const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const TTL_EXPECTED: &str = "number of minutes between 1 and 525600";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_PATH: &str = "data/community.redb";

/// Placeholder secret used when `JWT_SECRET` is unset. Only fit for local runs.
pub const DEFAULT_JWT_SECRET: &str = "change_me";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
/// Longest accepted session lifetime: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("unsupported token algorithm {0:?} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Settings shared by the token codec and the authentication service.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    /// Whether the placeholder secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_algorithm: Algorithm::HS256,
            token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_format: LogFormat,
    pub auth: AuthSettings,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV) {
            Some(raw) => parse_number(PORT_ENV, "port number", &raw)?,
            None => DEFAULT_PORT,
        };

        let database_path = lookup(DATABASE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    expected: "log format",
                    value: other.to_string(),
                })
            }
        };

        let jwt_secret = lookup(JWT_SECRET_ENV).unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());
        if jwt_secret.is_empty() {
            return Err(ConfigError::Empty(JWT_SECRET_ENV));
        }

        let jwt_algorithm = match lookup(JWT_ALG_ENV) {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let ttl_minutes: i64 = match lookup(JWT_EXPIRE_MINUTES_ENV) {
            Some(raw) => parse_number(JWT_EXPIRE_MINUTES_ENV, TTL_EXPECTED, &raw)?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };
        let token_ttl = Duration::try_minutes(ttl_minutes)
            .filter(|_| (1..=MAX_TOKEN_TTL_MINUTES).contains(&ttl_minutes))
            .ok_or_else(|| ConfigError::Invalid {
                var: JWT_EXPIRE_MINUTES_ENV,
                expected: TTL_EXPECTED,
                value: ttl_minutes.to_string(),
            })?;

        let bcrypt_cost: u32 = match lookup(BCRYPT_COST_ENV) {
            Some(raw) => parse_number(BCRYPT_COST_ENV, "bcrypt cost (4-31)", &raw)?,
            None => bcrypt::DEFAULT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                var: BCRYPT_COST_ENV,
                expected: "bcrypt cost (4-31)",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            database_path,
            log_format,
            auth: AuthSettings {
                jwt_secret,
                jwt_algorithm,
                token_ttl,
                bcrypt_cost,
            },
        })
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(
    var: &'static str,
    expected: &'static str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: raw.to_string(),
    })
}

/// Only HMAC algorithms are accepted: the key is a shared secret.
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(raw.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::UnsupportedAlgorithm(raw.to_string())),
    }
}

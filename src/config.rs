//! Runtime configuration, read from the environment (and `.env`)

use crate::classifier::Mode;
use crate::error::AssistantError;
use crate::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_AUTH_URL: &str = "https://functions.poehali.dev/d2a8ceaf-2621-4a04-9ca9-d9492f463324";
const DEFAULT_CARDS_URL: &str = "https://functions.poehali.dev/2420bae8-4bf1-4f3b-b39c-69b4557d4886";
const DEFAULT_TRANSACTIONS_URL: &str = "https://functions.poehali.dev/50deae80-664d-4ee6-89ca-ac2a7d5bee5b";
const DEFAULT_CREDIT_URL: &str = "https://functions.poehali.dev/48e74b84-b25e-434c-89a5-1c1b76256ea3";

/// Endpoints of the four remote collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub auth: String,
    pub cards: String,
    pub transactions: String,
    pub credit: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: DEFAULT_AUTH_URL.to_string(),
            cards: DEFAULT_CARDS_URL.to_string(),
            transactions: DEFAULT_TRANSACTIONS_URL.to_string(),
            credit: DEFAULT_CREDIT_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// All four services under one base URL, as `{base}/auth` etc.
    pub fn under(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            auth: format!("{}/auth", base),
            cards: format!("{}/cards", base),
            transactions: format!("{}/transactions", base),
            credit: format!("{}/credit", base),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub api_port: u16,
    pub http_timeout: Duration,
    pub hotline_hold: Duration,
    pub mode: Mode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            auth: lookup("AUTH_API_URL").unwrap_or(defaults.auth),
            cards: lookup("CARDS_API_URL").unwrap_or(defaults.cards),
            transactions: lookup("TRANSACTIONS_API_URL").unwrap_or(defaults.transactions),
            credit: lookup("CREDIT_API_URL").unwrap_or(defaults.credit),
        };

        let api_port: u16 = parse_var(&lookup, &["PORT", "API_PORT"], 8080)?;
        let timeout_secs: u64 = parse_var(&lookup, &["HTTP_TIMEOUT_SECS"], 30)?;
        let hold_secs: u64 = parse_var(&lookup, &["HOTLINE_HOLD_SECS"], 3)?;

        let mode = match lookup("ASSISTANT_MODE") {
            Some(raw) => raw.parse::<Mode>().map_err(AssistantError::Config)?,
            None => Mode::Standard,
        };

        Ok(Self {
            endpoints,
            api_port,
            http_timeout: Duration::from_secs(timeout_secs),
            hotline_hold: Duration::from_secs(hold_secs),
            mode,
        })
    }
}

/// First key present wins; absent keys fall back to `default`
fn parse_var<F, T>(lookup: &F, keys: &[&str], default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some((key, raw)) = keys.iter().find_map(|k| lookup(k).map(|v| (*k, v))) else {
        return Ok(default);
    };

    raw.trim()
        .parse::<T>()
        .map_err(|e| AssistantError::Config(format!("{}={:?}: {}", key, raw, e)))
}

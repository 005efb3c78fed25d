use log::warn;
use std::env;

use crate::errors::ConfigError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TABLE: &str = "code_executions";
const DEFAULT_LOOP_ITERATION_LIMIT: u64 = 100_000_000;
const DEFAULT_RECURSION_LIMIT: usize = 10_000;
const DEFAULT_MAX_CODE_LENGTH: usize = 64 * 1024;
const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Write the record before responding; a failed write fails the request.
    Await,
    /// Spawn the write and respond immediately; failures are only logged.
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLimits {
    pub loop_iterations: u64,
    pub recursion: usize,
    /// Bytes of source accepted before parsing.
    pub max_code_length: usize,
    /// Deepest `(`/`[`/`{` nesting accepted before parsing.
    pub max_nesting_depth: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        ScriptLimits {
            loop_iterations: DEFAULT_LOOP_ITERATION_LIMIT,
            recursion: DEFAULT_RECURSION_LIMIT,
            max_code_length: DEFAULT_MAX_CODE_LENGTH,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
    pub table: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub supabase: Option<SupabaseConfig>,
    pub persist_mode: PersistMode,
    pub script_limits: ScriptLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            supabase: None,
            persist_mode: PersistMode::Await,
            script_limits: ScriptLimits::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("APP_PORT")
            .and_then(|value| match value.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("Ignoring invalid APP_PORT {:?}, using {}", value, DEFAULT_PORT);
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        let supabase = match (lookup("SUPABASE_URL"), lookup("SUPABASE_SERVICE_ROLE_KEY")) {
            (Some(url), Some(service_key)) if !url.is_empty() && !service_key.is_empty() => {
                Some(SupabaseConfig {
                    url: url.trim_end_matches('/').to_string(),
                    service_key,
                    table: lookup("EXECUTIONS_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
                })
            }
            _ => None,
        };

        let persist_mode = match lookup("PERSIST_MODE").as_deref() {
            None | Some("await") => PersistMode::Await,
            Some("background") => PersistMode::Background,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "PERSIST_MODE",
                    value: other.to_string(),
                })
            }
        };

        let script_limits = ScriptLimits {
            loop_iterations: parse_or(&lookup, "JS_LOOP_ITERATION_LIMIT", DEFAULT_LOOP_ITERATION_LIMIT)?,
            recursion: parse_or(&lookup, "JS_RECURSION_LIMIT", DEFAULT_RECURSION_LIMIT)?,
            max_code_length: parse_or(&lookup, "JS_MAX_CODE_LENGTH", DEFAULT_MAX_CODE_LENGTH)?,
            max_nesting_depth: parse_or(&lookup, "JS_MAX_NESTING_DEPTH", DEFAULT_MAX_NESTING_DEPTH)?,
        };

        Ok(AppConfig {
            port,
            supabase,
            persist_mode,
            script_limits,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

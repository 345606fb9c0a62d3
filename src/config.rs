use crate::constants::{API_BASE_VAR, API_KEY_VARS, DEFAULT_API_BASE};
use crate::error::{Result, VariatorError};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reads the credential from `GEMINI_API_KEY`, then `API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| env::var(var).ok().filter(|value| !value.trim().is_empty()))
            .ok_or(VariatorError::MissingApiKey)?;
        let api_base = env::var(API_BASE_VAR).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Ok(Self::new(api_key, api_base))
    }
}

//! Hosted backend configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! A browser bundle has no process environment, so values are baked in at
//! compile time and parsed through the same lookup path the tests use.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_BUCKET: &str = "posts";
pub const DEFAULT_SESSION_KEY: &str = "nexus.auth.session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL without trailing slash.
    pub url: String,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: String,
    /// Storage bucket holding post images.
    pub bucket: String,
    /// `localStorage` key for the persisted session.
    pub session_key: String,
}

impl BackendConfig {
    /// Build typed config from a key lookup.
    ///
    /// Required:
    /// - `NEXUS_BACKEND_URL`
    /// - `NEXUS_BACKEND_ANON_KEY`
    ///
    /// Optional:
    /// - `NEXUS_STORAGE_BUCKET`: default `posts`
    /// - `NEXUS_SESSION_KEY`: default `nexus.auth.session`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or the URL is
    /// not an http(s) URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, "NEXUS_BACKEND_URL")?;
        let url = parse_url(&url)?;
        let anon_key = required(&lookup, "NEXUS_BACKEND_ANON_KEY")?;
        let bucket = optional(&lookup, "NEXUS_STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_owned());
        let session_key = optional(&lookup, "NEXUS_SESSION_KEY").unwrap_or_else(|| DEFAULT_SESSION_KEY.to_owned());

        Ok(Self { url, anon_key, bucket, session_key })
    }

    /// Build config from values captured at compile time.
    ///
    /// # Errors
    ///
    /// See [`BackendConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "NEXUS_BACKEND_URL" => option_env!("NEXUS_BACKEND_URL"),
                "NEXUS_BACKEND_ANON_KEY" => option_env!("NEXUS_BACKEND_ANON_KEY"),
                "NEXUS_STORAGE_BUCKET" => option_env!("NEXUS_STORAGE_BUCKET"),
                "NEXUS_SESSION_KEY" => option_env!("NEXUS_SESSION_KEY"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| ConfigError::Missing { var: key.to_owned() })
}

fn parse_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidUrl(raw.to_owned()))?;
    if host.is_empty() {
        return Err(ConfigError::InvalidUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

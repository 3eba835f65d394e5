//! Run configuration, built once at startup.

use std::time::Duration;

use crate::constants::{
    AVATAR_SOURCE_URL, POLL_INTERVAL_SECONDS, POLL_TIMEOUT_SECONDS, TALKS_API_BASE, VOICE_ID,
    VOICE_PROVIDER,
};

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "D_ID_API_KEY";

/// Immutable configuration for one studio session.
///
/// The credential comes from the environment; the endpoint, avatar, voice,
/// and poll cadence come from compiled defaults. Constructed once in the
/// root component and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub avatar_url: String,
    pub voice_provider: String,
    pub voice_id: String,
    pub poll_interval: Duration,
    /// `None` waits on a job indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: TALKS_API_BASE.to_string(),
            avatar_url: AVATAR_SOURCE_URL.to_string(),
            voice_provider: VOICE_PROVIDER.to_string(),
            voice_id: VOICE_ID.to_string(),
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECONDS),
            timeout: Some(Duration::from_secs(POLL_TIMEOUT_SECONDS)),
        }
    }
}

impl StudioConfig {
    /// Read the credential from the environment. Empty values count as unset.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            tracing::warn!("{API_KEY_ENV} is not set; generation will fail until it is configured");
        }
        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

//! Hosted backend (PostgREST) configuration.

use serde::{Deserialize, Serialize};

fn default_schema() -> String {
    String::from("public")
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

/// Default number of retries for transient HTTP failures.
const fn default_max_retries() -> u32 {
    3
}

fn default_profiles_table() -> String {
    String::from("profiles")
}

fn default_profiles_name_column() -> String {
    String::from("full_name")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL (e.g., `https://abcd1234.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public anon key. Sent as `apikey` when no service role key is set.
    #[serde(default)]
    pub anon_key: String,

    /// Service role key. Bypasses row-level security; back-office jobs only.
    #[serde(default)]
    pub service_role_key: String,

    /// Signed-in user's access token, so row-level security applies as that user.
    #[serde(default)]
    pub access_token: String,

    /// Postgres schema exposed by the REST API.
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Table holding user profiles (actor display names).
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,

    /// Column of `profiles_table` with the display name.
    #[serde(default = "default_profiles_name_column")]
    pub profiles_name_column: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: String::new(),
            access_token: String::new(),
            schema: default_schema(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            profiles_table: default_profiles_table(),
            profiles_name_column: default_profiles_name_column(),
        }
    }
}

impl BackendConfig {
    /// Check if the backend has a URL and at least one API key.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && (!self.anon_key.is_empty() || !self.service_role_key.is_empty())
    }

    /// Base URL of the REST API: `{url}/rest/v1`.
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }

    /// Key sent in the `apikey` header. The service role key wins when set.
    #[must_use]
    pub fn api_key(&self) -> &str {
        if self.service_role_key.is_empty() {
            &self.anon_key
        } else {
            &self.service_role_key
        }
    }

    /// Token sent as `Authorization: Bearer`. A user access token wins over the API key.
    #[must_use]
    pub fn bearer_token(&self) -> &str {
        if self.access_token.is_empty() {
            self.api_key()
        } else {
            &self.access_token
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = BackendConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.schema, "public");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.profiles_table, "profiles");
        assert_eq!(config.profiles_name_column, "full_name");
    }

    #[test]
    fn configured_with_url_and_anon_key() {
        let config = BackendConfig {
            url: "https://abcd.supabase.co".into(),
            anon_key: "anon".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.api_key(), "anon");
        assert_eq!(config.bearer_token(), "anon");
    }

    #[test]
    fn service_role_key_wins_over_anon_key() {
        let config = BackendConfig {
            url: "https://abcd.supabase.co".into(),
            anon_key: "anon".into(),
            service_role_key: "service".into(),
            ..Default::default()
        };
        assert_eq!(config.api_key(), "service");
    }

    #[test]
    fn access_token_is_used_as_bearer() {
        let config = BackendConfig {
            anon_key: "anon".into(),
            access_token: "user-jwt".into(),
            ..Default::default()
        };
        assert_eq!(config.api_key(), "anon");
        assert_eq!(config.bearer_token(), "user-jwt");
    }

    #[test]
    fn rest_url_trims_trailing_slash() {
        let config = BackendConfig {
            url: "https://abcd.supabase.co/".into(),
            ..Default::default()
        };
        assert_eq!(config.rest_url(), "https://abcd.supabase.co/rest/v1");
    }
}

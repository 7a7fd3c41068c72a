use rib_config::RibConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RibConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RibConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if config.backend.is_configured() {
        return warnings;
    }

    if has_env_prefix(&env_keys, "RIB_BACKEND") {
        warnings.push(
            "Backend config appears default while RIB_BACKEND* env vars exist. Use double underscores (example: RIB_BACKEND__URL)."
                .to_string(),
        );
    }

    if has_env_prefix(&env_keys, "SUPABASE_URL") {
        warnings.push(
            "SUPABASE_URL is set but ribctl reads RIB_BACKEND__URL and RIB_BACKEND__ANON_KEY."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use rib_config::{BackendConfig, RibConfig};

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_unconfigured_backend_with_env_prefixes() {
        let config = RibConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                (
                    "RIB_BACKEND_URL".to_string(),
                    "https://demo.supabase.co".to_string(),
                ),
                (
                    "SUPABASE_URL".to_string(),
                    "https://demo.supabase.co".to_string(),
                ),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_when_backend_is_configured() {
        let config = RibConfig {
            backend: BackendConfig {
                url: "https://demo.supabase.co".to_string(),
                anon_key: "anon".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![(
                "RIB_BACKEND__URL".to_string(),
                "https://demo.supabase.co".to_string(),
            )],
        );

        assert!(warnings.is_empty());
    }
}

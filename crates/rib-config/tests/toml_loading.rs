//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use rib_config::{ConfigError, RibConfig};

#[test]
fn loads_backend_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
url = "https://abcd1234.supabase.co"
anon_key = "anon-key"
schema = "backoffice"
timeout_secs = 30
max_retries = 1
profiles_table = "usuarios"
profiles_name_column = "nombre_completo"
"#,
        )?;

        let config: RibConfig = Figment::from(Serialized::defaults(RibConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backend.url, "https://abcd1234.supabase.co");
        assert_eq!(config.backend.anon_key, "anon-key");
        assert_eq!(config.backend.schema, "backoffice");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.backend.max_retries, 1);
        assert_eq!(config.backend.profiles_table, "usuarios");
        assert_eq!(config.backend.profiles_name_column, "nombre_completo");
        assert!(config.backend.is_configured());
        Ok(())
    });
}

#[test]
fn loads_reconcile_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[reconcile]
years = [2021, 2022, 2023, 2024, 2025]
tolerance = 0.5
tax_report_table = "reporte_tributario_v2"
"#,
        )?;

        let config: RibConfig = Figment::from(Serialized::defaults(RibConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.reconcile.years, vec![2021, 2022, 2023, 2024, 2025]);
        assert!((config.reconcile.tolerance - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.reconcile.tax_report_table, "reporte_tributario_v2");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
url = "https://abcd1234.supabase.co"
"#,
        )?;

        let config: RibConfig = Figment::from(Serialized::defaults(RibConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backend.schema, "public");
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(!config.backend.is_configured());
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
url = "https://from-toml.supabase.co"
anon_key = "toml-key"
"#,
        )?;
        jail.set_env("RIB_BACKEND__URL", "https://from-env.supabase.co");
        jail.set_env("RIB_GENERAL__DEFAULT_LIMIT", "5");

        let config: RibConfig = Figment::from(Serialized::defaults(RibConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("RIB_").split("__"))
            .extract()?;

        assert_eq!(config.backend.url, "https://from-env.supabase.co");
        assert_eq!(config.backend.anon_key, "toml-key");
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".rib")?;
        jail.create_file(
            ".rib/config.toml",
            r#"
[backend]
url = "https://project.supabase.co"
service_role_key = "service"
"#,
        )?;

        let config = RibConfig::load().expect("config loads");
        assert_eq!(config.backend.url, "https://project.supabase.co");
        assert_eq!(config.backend.api_key(), "service");
        Ok(())
    });
}

#[test]
fn env_years_list_is_parsed() {
    Jail::expect_with(|jail| {
        jail.set_env("RIB_RECONCILE__YEARS", "[2023, 2024]");
        let config = RibConfig::load().expect("config loads");
        assert_eq!(config.reconcile.years, vec![2023, 2024]);
        Ok(())
    });
}

#[test]
fn invalid_reconcile_settings_fail_load() {
    Jail::expect_with(|jail| {
        jail.set_env("RIB_RECONCILE__YEARS", "[2024, 2024]");
        let err = RibConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

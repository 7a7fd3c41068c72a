use std::path::Path;

use anyhow::Context;

/// Load `.env` (if any) and the layered configuration.
pub fn load_config() -> anyhow::Result<rib_config::RibConfig> {
    load_dotenv()?;
    rib_config::RibConfig::load().context("failed to load ribctl configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    // Nearest .env in the current directory or an ancestor.
    for dir in cwd.ancestors() {
        let env_path = dir.join(".env");
        if env_path.is_file() {
            return load_env_file(&env_path);
        }
    }
    Ok(())
}

fn load_env_file(path: &Path) -> anyhow::Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("failed to load dotenv file at {}", path.display()))
}

use anyhow::Context;
use rib_config::RibConfig;
use rib_db::{RestClient, RibService};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: RibService<RestClient>,
    pub config: RibConfig,
}

impl AppContext {
    /// Connect the REST client and wrap it in the service layer.
    pub fn init(config: RibConfig) -> anyhow::Result<Self> {
        let backend = config.require_backend().context(
            "backend is not configured; set RIB_BACKEND__URL and RIB_BACKEND__ANON_KEY (or .rib/config.toml)",
        )?;
        let client =
            RestClient::from_config(backend).context("failed to build the backend REST client")?;

        tracing::debug!(
            url = %backend.rest_url(),
            schema = %backend.schema,
            "backend client ready"
        );

        let service = RibService::new(client, &config);
        Ok(Self { service, config })
    }
}

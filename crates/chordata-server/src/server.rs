use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use chordata_inspect::{SnapshotAssembler, SnapshotProvider};
use chordata_store::StoreGateway;

use crate::assets::AssetBundle;
use crate::config::InspectorConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Embedded inspector server.
///
/// Owns its snapshot provider and asset bundle; nothing is global. Create
/// one at startup and pass it to whatever composes the process.
pub struct InspectorServer {
    config: InspectorConfig,
    state: AppState,
}

impl InspectorServer {
    /// Serve snapshots of the store behind `gateway`.
    pub fn new(config: InspectorConfig, gateway: StoreGateway) -> ServerResult<Self> {
        config.validate()?;
        let assembler = SnapshotAssembler::with_formatter(gateway, config.formatter()?)
            .with_cap(config.sample_cap);
        Self::with_provider(config, Arc::new(assembler))
    }

    /// Serve snapshots from an arbitrary provider.
    pub fn with_provider(config: InspectorConfig, provider: Arc<dyn SnapshotProvider>) -> ServerResult<Self> {
        config.validate()?;
        let assets = match &config.assets_dir {
            Some(dir) => AssetBundle::from_dir(dir),
            None => AssetBundle::bundled(),
        };
        Ok(Self {
            state: AppState::new(provider, assets),
            config,
        })
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests until the process exits.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start serving requests until `signal` resolves.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            "Chordata inspector listening on http://{}",
            listener.local_addr()?
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

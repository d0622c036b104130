use std::sync::Arc;

use axum::Router;
use tracing::{debug, info};

use crate::api::rest::{openapi, routes};
use crate::config::UsersInfoConfig;
use crate::contract::client::UsersInfoApi;
use crate::domain::repo::UsersRepository;
use crate::domain::service::Service;
use crate::gateways::local::UsersInfoLocalClient;
use crate::infra::storage::InMemoryUsersRepository;

/// Users registry module: owns the service and exposes it over REST and as
/// an in-process client.
#[derive(Clone)]
pub struct UsersInfo {
    config: UsersInfoConfig,
    service: Arc<Service>,
}

impl UsersInfo {
    /// Build the module over a fresh in-memory repository.
    pub fn new(config: UsersInfoConfig) -> anyhow::Result<Self> {
        Self::with_repository(config, Arc::new(InMemoryUsersRepository::new()))
    }

    pub fn with_repository(
        config: UsersInfoConfig,
        repo: Arc<dyn UsersRepository>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        info!(base_path = %config.base_path, "users_info module initialized");
        Ok(Self {
            config,
            service: Arc::new(Service::new(repo)),
        })
    }

    pub fn config(&self) -> &UsersInfoConfig {
        &self.config
    }

    /// Client for other modules in the same process.
    pub fn client(&self) -> Arc<dyn UsersInfoApi> {
        Arc::new(UsersInfoLocalClient::new(self.service.clone()))
    }
}

impl api_ingress::RestfulModule for UsersInfo {
    fn name(&self) -> &'static str {
        "users_info"
    }

    fn register_rest(&self, router: Router) -> anyhow::Result<Router> {
        debug!(base_path = %self.config.base_path, "Registering users_info routes");
        routes::register_routes(router, &self.config.base_path, self.service.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(openapi::document(&self.config.base_path))
    }
}

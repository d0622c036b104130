//! HTTP ingress: owns the axum router, the shared middleware stack and the
//! listener. Feature modules plug their routes and OpenAPI fragments in
//! through [`RestfulModule`].

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder};

mod config;
pub mod request_id;
pub mod shutdown;
mod web;

pub use config::ApiIngressConfig;

/// A module that exposes REST endpoints through the ingress.
pub trait RestfulModule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Attach this module's routes to `router`.
    fn register_rest(&self, router: Router) -> Result<Router>;

    /// OpenAPI fragment describing the routes added by `register_rest`.
    fn openapi(&self) -> Option<OpenApi> {
        None
    }
}

pub struct ApiIngress {
    config: ApiIngressConfig,
    modules: Vec<Arc<dyn RestfulModule>>,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            modules: Vec::new(),
        }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    pub fn register_module(&mut self, module: Arc<dyn RestfulModule>) -> &mut Self {
        tracing::debug!(module = module.name(), "Registered REST module");
        self.modules.push(module);
        self
    }

    /// Merge the documents of all registered modules into one.
    pub fn build_openapi(&self) -> OpenApi {
        let info = InfoBuilder::new()
            .title("Users Service")
            .version(env!("CARGO_PKG_VERSION"))
            .description(Some("In-memory user registry"))
            .build();
        let mut doc = OpenApiBuilder::new().info(info).build();
        for module in &self.modules {
            if let Some(part) = module.openapi() {
                doc.merge(part);
            }
        }
        doc
    }

    /// Build the HTTP router from registered modules
    pub fn build_router(&self) -> Result<Router> {
        tracing::debug!("Building router");
        let mut router = Router::new().route("/health", get(web::health_check));

        if self.config.enable_docs {
            // Build once, serve as static JSON (no per-request serialization)
            let openapi_value = Arc::new(serde_json::to_value(self.build_openapi())?);
            router = router
                .route(
                    "/openapi.json",
                    get({
                        use axum::{http::header, response::IntoResponse};
                        let v = openapi_value.clone();
                        move || async move {
                            let json = axum::Json((*v).clone());
                            ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                        }
                    }),
                )
                .route("/docs", get(web::serve_docs));
        }

        for module in &self.modules {
            router = module.register_rest(router)?;
            tracing::debug!(module = module.name(), "Module routes attached");
        }

        // Layers are listed innermost first; the last one added sees the
        // request first.
        let x_request_id = request_id::header();

        if self.config.request_timeout_sec > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_sec,
            )));
        }

        router = router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        // Enforced when the body is buffered, so handlers report an oversized
        // payload through their own error type.
        router = router.layer(DefaultBodyLimit::max(self.config.body_limit_bytes));

        Ok(router)
    }

    /// Bind `addr` and serve until `shutdown` resolves.
    pub async fn serve<F>(&self, addr: SocketAddr, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router()?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server is running on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

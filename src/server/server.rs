use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::config::settings::Settings;
use crate::generator::invoker::Invoker;
use crate::generator::GenerateCredential;
use crate::observability::metrics::get_metrics;
use crate::observability::routes::MetricsState;
use crate::server::routes;

pub struct AppState<G> {
    pub invoker: Invoker<G>,
    pub port: u16,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self { invoker: self.invoker.clone(), port: self.port }
    }
}

/// Build the full application router: token and health endpoints, optional
/// metrics endpoint, JSON 404 for everything else.
pub fn router<G>(state: AppState<G>, settings: &Settings, metrics_state: &MetricsState) -> Router
where
    G: GenerateCredential + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/token",
            get(routes::serve_token::<G>).post(routes::serve_token::<G>),
        )
        .route("/health", get(routes::serve_health::<G>))
        .fallback(routes::not_found)
        .with_state(state)
        .merge(metrics_state.router(&settings.metrics))
}

/// Start the Axum server and serve until shutdown.
pub async fn start<G>(settings: &Settings, invoker: Invoker<G>) -> Result<()>
where
    G: GenerateCredential + Send + Sync + 'static,
{
    let metrics = get_metrics().await;
    let metrics_state = MetricsState::new(metrics.registry.clone());

    let state = AppState { invoker, port: settings.server.port };
    let app = router(state, settings, &metrics_state);

    let bind_addr = &settings.server.host;
    let port = settings.server.port;
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind_addr, port)).await?;
    info!("listening on {}:{}", bind_addr, port);
    metrics.up.set(1);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

//! Rental service binary: loads config from env, ensures the rental tables
//! exist, mounts common and rental routes.

use axum::Router;
use pagila_rental::{
    common_routes_with_ready, connect_pool, ensure_rental_schema, rental_routes, AppConfig,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pagila_rental=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    let pool = connect_pool(&config).await?;
    ensure_rental_schema(&pool).await?;
    let state = AppState { pool };

    let app = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api/v1", rental_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

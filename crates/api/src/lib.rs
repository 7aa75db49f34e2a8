//! # Showbill API
//!
//! The web server for the Showbill booking directory. Venues, artists and
//! the shows that pair them are listed, searched, created and edited here.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure, one module per entity
//! - **Handlers**: Request processing against a [`BookingStore`]
//! - **Middleware**: Error pages and flash messages
//! - **Config**: Environment configuration
//!
//! Pages are rendered as JSON view models. Persistence goes through the
//! [`BookingStore`] trait so the server runs the same against PostgreSQL or
//! an in-memory store.

/// Configuration module for API settings
pub mod config;
/// Request handlers for each page
pub mod handlers;
/// Error pages and flash messages
pub mod middleware;
/// Route definitions
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use showbill_core::store::BookingStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use middleware::error_handling;

/// Shared application state handed to every handler.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use showbill_api::{router, ApiState};
/// # fn example(store: Arc<dyn showbill_core::store::BookingStore>) {
/// let app = router(Arc::new(ApiState { store }));
/// # }
/// ```
pub struct ApiState {
    pub store: Arc<dyn BookingStore>,
}

/// Builds the application with every route, the 404 fallback and request
/// tracing. CORS and timeouts are added by [`start_server`].
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::routes())
        .fallback(error_handling::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the server on `config.server_addr()` backed by `store`.
///
/// Installs the global tracing subscriber at `config.log_level`, so it must
/// be called once per process.
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState { store });

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

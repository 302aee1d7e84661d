//! Route table and middleware stack.
//!
//! ```text
//! /api/blobs      POST   create (create quota + general quota)
//! /api/blobs/:id  GET    retrieve
//! /api/health     GET    liveness
//! /api/config     GET    public frontend config
//! /api/<known>    other  405 {"error":"Method not allowed"}
//! /api/*          any    404 {"error":"Not found"}
//! /*              GET    static frontend with SPA fallback, if present
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use jb_core::ServerConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::http::handlers;
use crate::http::rate_limit::{limit_api_requests, limit_blob_creation};
use crate::http::security_headers::security_headers;
use crate::http::state::AppState;

/// Build the complete application router.
///
/// # Errors
///
/// Fails when a configured CORS origin or CSP source is not a valid header
/// value.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router> {
    let api = Router::new()
        .route(
            "/blobs",
            post(handlers::create_blob)
                .route_layer(from_fn_with_state(state.clone(), limit_blob_creation))
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/blobs/:id",
            get(handlers::get_blob).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/config",
            get(handlers::public_config).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), limit_api_requests))
        .layer(DefaultBodyLimit::max(config.http.json_size_limit))
        .with_state(state);

    let mut router = attach_frontend(Router::new().nest("/api", api), &config.http.frontend_dir);

    for (name, value) in security_headers(&config.csp)? {
        router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }

    Ok(router
        .layer(cors_layer(config.http.cors_origins.as_deref())?)
        .layer(TraceLayer::new_for_http()))
}

fn attach_frontend(router: Router, frontend_dir: &Path) -> Router {
    let index = frontend_dir.join("index.html");

    if index.is_file() {
        info!(dir = %frontend_dir.display(), "Serving frontend");
        router.fallback_service(ServeDir::new(frontend_dir).fallback(ServeFile::new(index)))
    } else if frontend_dir.is_dir() {
        info!(dir = %frontend_dir.display(), "Serving static files without SPA index");
        router.fallback_service(
            ServeDir::new(frontend_dir).fallback(handlers::not_found.into_service()),
        )
    } else {
        info!("No frontend files found, API only mode");
        router.fallback(handlers::not_found)
    }
}

fn cors_layer(origins: Option<&[String]>) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any);

    let Some(origins) = origins else {
        return Ok(layer.allow_origin(Any));
    };

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin {origin:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

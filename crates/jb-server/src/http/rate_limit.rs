//! Per-client quotas as axum middleware.
//!
//! Allowed responses carry `RateLimit-Limit`, `RateLimit-Remaining` and
//! `RateLimit-Reset`. When two limiters stack, the inner one's headers win.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jb_app::usecases::{EnforceRateLimit, RateLimitQuota};

use crate::http::client::client_key;
use crate::http::error::{ceil_secs, ApiError, RATE_LIMIT_LIMIT, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET};
use crate::http::state::AppState;

/// General quota for every `/api/*` request
pub async fn limit_api_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let enforce = state.app.enforce_api_rate_limit();
    enforce_then_run(&enforce, &state, request, next).await
}

/// Creation quota, stacked on top of the general one
pub async fn limit_blob_creation(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let enforce = state.app.enforce_create_rate_limit();
    enforce_then_run(&enforce, &state, request, next).await
}

async fn enforce_then_run(
    enforce: &EnforceRateLimit,
    state: &AppState,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let key = client_key(request.headers(), peer, state.trust_proxy_hops);

    match enforce.execute(&key).await {
        Ok(quota) => {
            let mut response = next.run(request).await;
            insert_quota_headers(response.headers_mut(), &quota);
            response
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn insert_quota_headers(headers: &mut HeaderMap, quota: &RateLimitQuota) {
    let values = [
        (RATE_LIMIT_LIMIT, u64::from(quota.limit)),
        (RATE_LIMIT_REMAINING, u64::from(quota.remaining)),
        (RATE_LIMIT_RESET, ceil_secs(quota.reset_after)),
    ];

    for (name, value) in values {
        insert_if_absent(headers, name, value);
    }
}

fn insert_if_absent(headers: &mut HeaderMap, name: HeaderName, value: u64) {
    headers.entry(name).or_insert_with(|| HeaderValue::from(value));
}

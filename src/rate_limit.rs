//! Global GCRA limiter for state-changing requests.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultDirectRateLimiter, Quota};
use tracing::warn;

use crate::{config::RateLimitConfig, errors::ApiError, states::AppState};

pub type WriteLimiter = DefaultDirectRateLimiter;

pub fn build_limiter(config: &RateLimitConfig) -> WriteLimiter {
    let quota = Quota::per_second(config.per_second).allow_burst(config.burst);
    WriteLimiter::direct(quota)
}

fn is_write(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// Reads pass through untouched; writes spend one cell of the shared budget.
pub async fn limit_writes(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if is_write(request.method()) && state.limiter.check().is_err() {
        warn!("Rate limit exceeded: {} {}", request.method(), request.uri().path());
        return ApiError::RateLimited.into_response();
    }
    next.run(request).await
}

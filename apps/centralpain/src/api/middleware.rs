//! # Request Throttling
//!
//! One shared quota guards every endpoint. `server.rate_limit` (or
//! `CENTRALPAIN_RATE_LIMIT`) sets the requests per second; 0 turns the
//! throttle off entirely.
//!
//! Rejected requests get a 429 carrying the usual error body and a
//! `Retry-After` header.

use super::types::EvaluateResponse;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Quota shared by every request the server handles.
pub type RequestThrottle = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Build the shared throttle, or `None` when `requests_per_second` is 0.
pub fn request_throttle(requests_per_second: u32) -> Option<RequestThrottle> {
    NonZeroU32::new(requests_per_second)
        .map(|rps| Arc::new(RateLimiter::direct(Quota::per_second(rps))))
}

/// Whole seconds until the next request may pass, never less than one.
fn retry_after_secs(wait: Duration) -> u64 {
    let whole = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    whole.max(1)
}

/// Reject the request with 429 once the shared quota is spent.
pub async fn throttle_middleware(
    State(throttle): State<RequestThrottle>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match throttle.check() {
        Ok(()) => next.run(request).await,
        Err(not_until) => {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            let retry_after = retry_after_secs(wait);
            tracing::warn!(path = %request.uri().path(), retry_after, "Request throttled");

            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(EvaluateResponse::error("Too many requests, retry later")),
            )
                .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}

//! Per-IP rate limiting middleware.
//!
//! Every request draws one token from its client IP's bucket. Status is
//! reported in headers:
//! - `X-RateLimit-Limit`: bucket capacity
//! - `X-RateLimit-Remaining`: tokens left after this request
//! - `X-RateLimit-Reset`: Unix time when the bucket is full again
//! - `Retry-After`: seconds to wait (429 only)
//!
//! A limiter failure lets the request through. Proxy headers only pick the
//! bucket when `trust_forwarded` is set.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::RETRY_AFTER, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::ErrorCode;
use crate::ports::{RateLimitDenied, RateLimitKey, RateLimitResult, RateLimitStatus};

pub mod headers {
    use super::HeaderName;

    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.shield.rate_limit {
        return next.run(request).await;
    }

    let Some(ip) = client_ip(
        request.headers(),
        connect_info.as_ref(),
        state.shield.trust_forwarded,
    ) else {
        return next.run(request).await;
    };

    let status = match state.rate_limiter.check(RateLimitKey::ip(&ip)).await {
        Ok(RateLimitResult::Allowed(status)) => Some(status),
        Ok(RateLimitResult::Denied(denied)) => {
            tracing::warn!(client_ip = %ip, retry_after_secs = denied.retry_after_secs, "rate limit exceeded");
            return rate_limited_response(denied);
        }
        Err(e) => {
            tracing::warn!(error = %e, "rate limiter unavailable");
            None
        }
    };

    let mut response = next.run(request).await;
    if let Some(status) = status {
        add_status_headers(response.headers_mut(), &status);
    }
    response
}

/// Client IP used as the bucket key.
///
/// With `trust_forwarded`:
/// 1. X-Forwarded-For (first entry)
/// 2. X-Real-IP
/// 3. ConnectInfo
///
/// Otherwise ConnectInfo alone.
fn client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
    trust_forwarded: bool,
) -> Option<String> {
    let socket_ip = connect_info.map(|ci| ci.0.ip().to_string());
    if !trust_forwarded {
        return socket_ip;
    }

    if let Some(first) = headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return Some(first.to_string());
    }

    if let Some(real_ip) = headers
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return Some(real_ip.to_string());
    }

    socket_ip
}

fn rate_limited_response(denied: RateLimitDenied) -> Response {
    let mut response = ApiError::new(
        StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::RateLimited.to_string(),
        denied.message,
    )
    .into_response();

    let headers = response.headers_mut();
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(denied.limit));
    headers.insert(headers::X_RATELIMIT_REMAINING.clone(), HeaderValue::from(0u32));
    headers.insert(RETRY_AFTER, HeaderValue::from(denied.retry_after_secs));
    response
}

fn add_status_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(status.limit));
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from(status.remaining),
    );
    headers.insert(
        headers::X_RATELIMIT_RESET.clone(),
        HeaderValue::from(status.reset_at.as_unix_secs()),
    );
}

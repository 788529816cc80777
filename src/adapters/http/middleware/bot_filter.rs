//! User-agent bot screening.
//!
//! Known automation clients and requests without a user agent are treated
//! as bots. Search engine crawlers are always allowed. In LIVE mode bots
//! get 403; in DRY_RUN mode they are logged and served.

use axum::{
    extract::{Request, State},
    http::{header::USER_AGENT, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

static SEARCH_ENGINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)googlebot|bingbot|duckduckbot|baiduspider|yandex(bot|images)|slurp|applebot|sogou|exabot|facebot|ia_archiver",
    )
    .expect("search engine pattern is valid")
});

static AUTOMATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(bot|crawler|spider|scraper)\b|curl/|wget/|python-requests|python-urllib|aiohttp|go-http-client|java/|okhttp|libwww-perl|httpie|headlesschrome|phantomjs|scrapy|node-fetch|axios/",
    )
    .expect("automation pattern is valid")
});

/// Outcome of classifying a user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotVerdict {
    Human,
    SearchEngine,
    Bot(String),
}

pub fn classify_user_agent(user_agent: Option<&str>) -> BotVerdict {
    let Some(ua) = user_agent.map(str::trim).filter(|ua| !ua.is_empty()) else {
        return BotVerdict::Bot("missing user agent".to_string());
    };
    if SEARCH_ENGINE.is_match(ua) {
        return BotVerdict::SearchEngine;
    }
    match AUTOMATED.find(ua) {
        Some(m) => BotVerdict::Bot(m.as_str().to_lowercase()),
        None => BotVerdict::Human,
    }
}

pub async fn bot_filter_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|h| h.to_str().ok());

    if let BotVerdict::Bot(reason) = classify_user_agent(user_agent) {
        if state.shield.block_bots {
            tracing::warn!(reason = %reason, path = %request.uri().path(), "bot blocked");
            return ApiError::new(StatusCode::FORBIDDEN, "BOT_DETECTED", "Bot detected")
                .into_response();
        }
        tracing::info!(reason = %reason, path = %request.uri().path(), "bot detected (dry run)");
    }

    next.run(request).await
}

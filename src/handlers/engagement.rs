use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use worker::*;

use super::response::HttpReply;
use crate::config::ScraperConfig;
use crate::engagement::{format_rate, truncated_mean, EngagementStats, FALLBACK_RATE};
use crate::error::{ApiError, INVALID_JSON, NO_DATA, NO_FOLLOWERS, NO_POSTS, USERNAME_REQUIRED};
use crate::scraper::client::WorkerUpstream;
use crate::scraper::{scrape_profile, Upstream};
use crate::utils::username::normalize_username;

/// Validated request: a normalized username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementRequest {
    pub username: String,
}

impl EngagementRequest {
    /// Parses and validates a raw request body.
    pub fn from_body(body: &[u8]) -> std::result::Result<Self, ApiError> {
        if body.is_empty() {
            return Err(ApiError::Validation(NO_DATA));
        }
        let json: Value =
            serde_json::from_slice(body).map_err(|_| ApiError::Validation(INVALID_JSON))?;

        json.get("username")
            .and_then(Value::as_str)
            .and_then(normalize_username)
            .map(|username| EngagementRequest { username })
            .ok_or(ApiError::Validation(USERNAME_REQUIRED))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementResponse {
    pub username: String,
    pub followers: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    pub engagement_rate: String,
}

/// Validates the body, scrapes the profile and computes the response.
pub async fn evaluate<U>(
    body: &[u8],
    upstream: &U,
    config: &ScraperConfig,
) -> std::result::Result<EngagementResponse, ApiError>
where
    U: Upstream + ?Sized,
{
    let request = EngagementRequest::from_body(body)?;
    let scraped = scrape_profile(upstream, &request.username, config).await;

    if scraped.followers < 1 {
        return Err(ApiError::UpstreamUnavailable(NO_FOLLOWERS));
    }
    if scraped.likes.is_empty() || scraped.comments.is_empty() {
        return Err(ApiError::UpstreamUnavailable(NO_POSTS));
    }

    let engagement_rate =
        EngagementStats::from_samples(scraped.followers, &scraped.likes, &scraped.comments)
            .map(|stats| format_rate(stats.engagement_rate))
            .unwrap_or_else(|| FALLBACK_RATE.to_string());

    Ok(EngagementResponse {
        username: request.username,
        followers: scraped.followers,
        avg_likes: truncated_mean(&scraped.likes),
        avg_comments: truncated_mean(&scraped.comments),
        engagement_rate,
    })
}

/// `POST /`
pub async fn handle(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let config = ScraperConfig::from_env(&ctx.env);

    let outcome = match req.bytes().await {
        Ok(body) => evaluate(&body, &WorkerUpstream::new(&config), &config).await,
        Err(e) => Err(ApiError::from(e)),
    };

    reply_for(outcome)?.into_response()
}

/// Turns the evaluation outcome into the reply sent to the caller.
pub fn reply_for(outcome: std::result::Result<EngagementResponse, ApiError>) -> Result<HttpReply> {
    match outcome {
        Ok(response) => {
            info!(
                target: "gramrate::handlers",
                username = %response.username,
                followers = response.followers,
                rate = %response.engagement_rate,
                "engagement computed"
            );
            HttpReply::json(200, &response)
        }
        Err(err) => {
            warn!(target: "gramrate::handlers", status = err.status(), error = %err, "request rejected");
            HttpReply::json(err.status(), &err.body())
        }
    }
}

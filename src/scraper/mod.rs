pub mod client;
pub mod endpoints;
pub mod normalize;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ScraperConfig;

use self::endpoints::{feed_url, profile_url};
use self::normalize::{feed_user, primary_user, snapshot, UserLookup};
use self::types::{ScrapeResult, UpstreamResponse};

/// Transport-level failure of a single request. Never leaves this module.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Network seam of the scraper.
#[async_trait(?Send)]
pub trait Upstream {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, ScrapeError>;
    async fn sleep(&self, duration: Duration);
}

/// Why an attempt produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    Status(u16),
    MalformedBody,
    /// The media feed answered 200 with a body that is not JSON.
    MalformedFeed,
    NoUser,
    NoFollowers,
    NoEngagement { likes: usize, comments: usize },
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Status(code) => write!(f, "upstream returned {code}"),
            AttemptFailure::MalformedBody => f.write_str("response body is not JSON"),
            AttemptFailure::MalformedFeed => f.write_str("media feed body is not JSON"),
            AttemptFailure::NoUser => f.write_str("no user object in response"),
            AttemptFailure::NoFollowers => f.write_str("follower count missing or zero"),
            AttemptFailure::NoEngagement { likes, comments } => write!(
                f,
                "incomplete engagement sample (likes={likes}, comments={comments})"
            ),
        }
    }
}

impl AttemptFailure {
    /// Wait before the next attempt. A missing user or follower count is
    /// retried straight away; a broken feed body waits like a transport error.
    pub fn retry_delay(&self, config: &ScraperConfig, attempt: u32) -> Duration {
        match self {
            AttemptFailure::NoUser | AttemptFailure::NoFollowers => Duration::ZERO,
            AttemptFailure::MalformedFeed => config.error_delay,
            AttemptFailure::Status(_)
            | AttemptFailure::MalformedBody
            | AttemptFailure::NoEngagement { .. } => backoff(config.backoff_base, attempt),
        }
    }
}

/// Scrapes follower count and recent engagement for `username`.
///
/// Makes up to `max_retries` attempts. Failed attempts wait
/// [`AttemptFailure::retry_delay`]; transport errors wait `error_delay`.
/// Nothing is slept after the last attempt. Returns the zero-result when no
/// attempt yields followers plus non-empty like and comment samples.
pub async fn scrape_profile<U>(upstream: &U, username: &str, config: &ScraperConfig) -> ScrapeResult
where
    U: Upstream + ?Sized,
{
    for attempt in 0..config.max_retries {
        let is_last = attempt + 1 >= config.max_retries;

        let delay = match run_attempt(upstream, username, config).await {
            Ok(Ok(result)) => {
                info!(
                    target: "gramrate::scraper",
                    username,
                    attempt = attempt + 1,
                    followers = result.followers,
                    likes = result.likes.len(),
                    comments = result.comments.len(),
                    "scrape succeeded"
                );
                return result;
            }
            Ok(Err(failure)) => {
                debug!(target: "gramrate::scraper", username, attempt = attempt + 1, %failure, "attempt failed");
                failure.retry_delay(config, attempt)
            }
            Err(e) => {
                warn!(target: "gramrate::scraper", username, attempt = attempt + 1, error = %e, "attempt errored");
                config.error_delay
            }
        };

        if !is_last && !delay.is_zero() {
            upstream.sleep(delay).await;
        }
    }

    warn!(target: "gramrate::scraper", username, attempts = config.max_retries, "all attempts failed");
    ScrapeResult::empty()
}

/// One pass over the primary endpoint, plus the media feed when needed.
async fn run_attempt<U>(
    upstream: &U,
    username: &str,
    config: &ScraperConfig,
) -> Result<Result<ScrapeResult, AttemptFailure>, ScrapeError>
where
    U: Upstream + ?Sized,
{
    let primary = upstream.get(&profile_url(config, username)?).await?;
    let body = match parse_ok_body(&primary) {
        Ok(body) => body,
        Err(failure) => return Ok(Err(failure)),
    };

    let feed_body;
    let user = match primary_user(&body) {
        UserLookup::Found(user) => user,
        UserLookup::Missing => return Ok(Err(AttemptFailure::NoUser)),
        UserLookup::NeedsFeed => {
            debug!(target: "gramrate::scraper", username, "empty user in profile response, trying media feed");
            let feed = upstream.get(&feed_url(config, username)?).await?;
            feed_body = match parse_ok_body(&feed) {
                Ok(body) => body,
                Err(AttemptFailure::MalformedBody) => return Ok(Err(AttemptFailure::MalformedFeed)),
                Err(_) => return Ok(Err(AttemptFailure::NoUser)),
            };
            match feed_user(&feed_body) {
                Some(user) => user,
                None => return Ok(Err(AttemptFailure::NoUser)),
            }
        }
    };

    let profile = snapshot(user, config.post_limit);
    if profile.followers == 0 {
        return Ok(Err(AttemptFailure::NoFollowers));
    }

    let (likes, comments) = profile.samples();
    if likes.is_empty() || comments.is_empty() {
        return Ok(Err(AttemptFailure::NoEngagement {
            likes: likes.len(),
            comments: comments.len(),
        }));
    }

    Ok(Ok(ScrapeResult {
        followers: profile.followers,
        likes,
        comments,
    }))
}

fn parse_ok_body(response: &UpstreamResponse) -> Result<Value, AttemptFailure> {
    if response.status != 200 {
        return Err(AttemptFailure::Status(response.status));
    }
    serde_json::from_str(&response.body).map_err(|_| AttemptFailure::MalformedBody)
}

/// `base * 2^attempt`, saturating.
fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

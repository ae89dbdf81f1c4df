use url::Url;

use crate::config::ScraperConfig;

/// Web profile info: `{base}/users/web_profile_info/?username={username}`.
pub fn profile_url(config: &ScraperConfig, username: &str) -> Result<Url, url::ParseError> {
    let base = format!("{}/users/web_profile_info/", config.api_base);
    Url::parse_with_params(&base, &[("username", username)])
}

/// Media feed: `{base}/feed/user/{username}/username/`.
pub fn feed_url(config: &ScraperConfig, username: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.api_base)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(["feed", "user", username, "username", ""]);
    Ok(url)
}

/// Headers sent with every upstream request.
pub fn request_headers(config: &ScraperConfig) -> [(&'static str, &str); 4] {
    [
        ("User-Agent", config.user_agent.as_str()),
        ("Accept", "application/json"),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("X-IG-App-ID", config.app_id.as_str()),
    ]
}

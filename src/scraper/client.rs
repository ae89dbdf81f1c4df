use std::time::Duration;

use async_trait::async_trait;
use futures::future::{select, Either};
use futures::pin_mut;
use tracing::debug;
use url::Url;
use worker::{AbortController, AbortSignal, Delay, Fetch, Headers, Method, Request, RequestInit};

use super::endpoints::request_headers;
use super::types::UpstreamResponse;
use super::{ScrapeError, Upstream};
use crate::config::ScraperConfig;

/// [`Upstream`] backed by the worker runtime's `fetch`.
pub struct WorkerUpstream<'a> {
    config: &'a ScraperConfig,
}

impl<'a> WorkerUpstream<'a> {
    pub fn new(config: &'a ScraperConfig) -> Self {
        WorkerUpstream { config }
    }

    fn build_request(&self, url: &Url) -> worker::Result<Request> {
        let headers = Headers::new();
        for (name, value) in request_headers(self.config) {
            headers.set(name, value)?;
        }

        let mut init = RequestInit::new();
        init.with_method(Method::Get).with_headers(headers);

        Request::new_with_init(url.as_str(), &init)
    }

    async fn send(request: Request, signal: &AbortSignal) -> worker::Result<UpstreamResponse> {
        let mut resp = Fetch::Request(request).send_with_signal(signal).await?;
        let status = resp.status_code();
        let body = resp.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}

#[async_trait(?Send)]
impl Upstream for WorkerUpstream<'_> {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, ScrapeError> {
        let timeout = self.config.request_timeout;
        let request = self
            .build_request(url)
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        let controller = AbortController::default();
        let signal = controller.signal();
        let fetch = Self::send(request, &signal);
        let deadline = Delay::from(timeout);
        pin_mut!(fetch, deadline);

        match select(fetch, deadline).await {
            Either::Left((Ok(response), _)) => {
                debug!(
                    target: "gramrate::scraper",
                    url = %url,
                    status = response.status,
                    len = response.body.len(),
                    "upstream responded"
                );
                Ok(response)
            }
            Either::Left((Err(e), _)) => Err(ScrapeError::Transport(e.to_string())),
            Either::Right(((), _)) => {
                controller.abort();
                Err(ScrapeError::Timeout(timeout))
            }
        }
    }

    async fn sleep(&self, duration: Duration) {
        Delay::from(duration).await;
    }
}

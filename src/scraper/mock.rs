use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use super::types::UpstreamResponse;
use super::{ScrapeError, Upstream};

#[derive(Debug, Clone)]
pub enum Reply {
    Response(UpstreamResponse),
    Error(String),
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Reply::Response(UpstreamResponse::new(200, body.to_string()))
    }

    pub fn status(status: u16, body: &str) -> Self {
        Reply::Response(UpstreamResponse::new(status, body))
    }

    pub fn error(message: &str) -> Self {
        Reply::Error(message.to_string())
    }
}

/// Scripted in-memory upstream for scraper and handler tests.
///
/// Replies are consumed in order per endpoint; the last one repeats.
#[derive(Default)]
pub struct MockUpstream {
    profile: RefCell<VecDeque<Reply>>,
    feed: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<String>>,
    sleeps: RefCell<Vec<Duration>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_profile(self, reply: Reply) -> Self {
        self.profile.borrow_mut().push_back(reply);
        self
    }

    pub fn on_feed(self, reply: Reply) -> Self {
        self.feed.borrow_mut().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn profile_calls(&self) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|u| u.contains("/users/web_profile_info/"))
            .count()
    }

    pub fn feed_calls(&self) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|u| u.contains("/feed/user/"))
            .count()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    fn next(queue: &RefCell<VecDeque<Reply>>) -> Reply {
        let mut queue = queue.borrow_mut();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Reply::status(404, "{}"))
        }
    }
}

#[async_trait(?Send)]
impl Upstream for MockUpstream {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, ScrapeError> {
        self.requests.borrow_mut().push(url.to_string());
        let reply = if url.path().contains("/feed/user/") {
            Self::next(&self.feed)
        } else {
            Self::next(&self.profile)
        };
        match reply {
            Reply::Response(response) => Ok(response),
            Reply::Error(message) => Err(ScrapeError::Transport(message)),
        }
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// Web profile response in the graph shape.
pub fn graph_body(followers: u64, posts: &[(u64, u64)]) -> Value {
    let edges: Vec<Value> = posts
        .iter()
        .map(|(likes, comments)| {
            json!({
                "node": {
                    "edge_liked_by": { "count": likes },
                    "edge_media_to_comment": { "count": comments }
                }
            })
        })
        .collect();

    json!({
        "status": "ok",
        "data": {
            "user": {
                "edge_followed_by": { "count": followers },
                "edge_owner_to_timeline_media": { "edges": edges }
            }
        }
    })
}

/// Media feed response in the flat shape.
pub fn feed_body(followers: u64, posts: &[(u64, u64)]) -> Value {
    let items: Vec<Value> = posts
        .iter()
        .map(|(likes, comments)| json!({ "like_count": likes, "comment_count": comments }))
        .collect();

    json!({
        "status": "ok",
        "user": {
            "follower_count": followers,
            "items": items
        }
    })
}

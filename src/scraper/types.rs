/// Output of one scrape: follower count plus positive per-post samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeResult {
    pub followers: u64,
    pub likes: Vec<u64>,
    pub comments: Vec<u64>,
}

impl ScrapeResult {
    /// The zero-result returned once every attempt has failed.
    pub fn empty() -> Self {
        ScrapeResult::default()
    }
}

/// Counters of a single post, after shape normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostCounts {
    pub likes: u64,
    pub comments: u64,
}

/// Canonical profile record. Both upstream payload variants reduce to this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub followers: u64,
    pub posts: Vec<PostCounts>,
}

impl ProfileSnapshot {
    /// Collects the positive like and comment counts of the snapshot's posts.
    pub fn samples(&self) -> (Vec<u64>, Vec<u64>) {
        let likes = self.posts.iter().map(|p| p.likes).filter(|&n| n > 0).collect();
        let comments = self
            .posts
            .iter()
            .map(|p| p.comments)
            .filter(|&n| n > 0)
            .collect();
        (likes, comments)
    }
}

/// HTTP status and body of an upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        UpstreamResponse {
            status,
            body: body.into(),
        }
    }
}

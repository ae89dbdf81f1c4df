use serde_json::Value;

use super::types::{PostCounts, ProfileSnapshot};

/// A counter as found in the payload.
///
/// The web profile endpoint uses edge wrappers (`edge_followed_by.count`),
/// the media feed uses flat fields (`follower_count`, `like_count`). Every
/// counter is read through this type so nothing downstream needs to know
/// which variant it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Flat field, e.g. `"like_count": 12`.
    Direct(u64),
    /// Edge wrapper, e.g. `"edge_liked_by": {"count": 12}`.
    Edge(u64),
    /// Field present but not a count (`null`, `"lots"`, an object).
    Invalid,
    Absent,
}

impl Counter {
    /// Reads `direct_key`, falling back to `edge_key.count` only when the
    /// direct key is missing.
    pub fn read(obj: &Value, direct_key: &str, edge_key: &str) -> Self {
        if let Some(direct) = obj.get(direct_key) {
            return parse_count(direct).map_or(Counter::Invalid, Counter::Direct);
        }
        let Some(edge) = obj.get(edge_key) else {
            return Counter::Absent;
        };
        if !edge.is_object() {
            return Counter::Invalid;
        }
        match edge.get("count") {
            Some(count) => parse_count(count).map_or(Counter::Invalid, Counter::Edge),
            None => Counter::Absent,
        }
    }

    pub fn is_invalid(self) -> bool {
        self == Counter::Invalid
    }

    pub fn value(self) -> u64 {
        match self {
            Counter::Direct(n) | Counter::Edge(n) => n,
            Counter::Invalid | Counter::Absent => 0,
        }
    }
}

/// The post list of a user object: graph edges from the web profile
/// endpoint, or the flat `items` list from the media feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostList<'a> {
    /// `edge_owner_to_timeline_media.edges`, entries wrapped in `node`.
    Timeline(&'a [Value]),
    /// `items`, entries are the posts themselves.
    Feed(&'a [Value]),
    Empty,
}

impl<'a> PostList<'a> {
    pub fn read(user: &'a Value) -> Self {
        let edges = user
            .get("edge_owner_to_timeline_media")
            .and_then(|m| m.get("edges"))
            .and_then(Value::as_array)
            .filter(|edges| !edges.is_empty());
        if let Some(edges) = edges {
            return PostList::Timeline(edges);
        }

        match user.get("items").and_then(Value::as_array) {
            Some(items) if !items.is_empty() => PostList::Feed(items),
            _ => PostList::Empty,
        }
    }

    pub fn entries(self) -> &'a [Value] {
        match self {
            PostList::Timeline(entries) | PostList::Feed(entries) => entries,
            PostList::Empty => &[],
        }
    }
}

/// Where the user object of a primary response lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserLookup<'a> {
    Found(&'a Value),
    /// Status was `ok` but `data.user` is empty; the media feed has to be asked.
    NeedsFeed,
    Missing,
}

/// Locates the user object in a web profile response.
pub fn primary_user(body: &Value) -> UserLookup<'_> {
    let user = body
        .get("data")
        .and_then(|d| d.get("user"))
        .filter(|u| is_usable_user(u));
    let status_ok = body.get("status").and_then(Value::as_str) == Some("ok");

    match (user, status_ok) {
        (Some(user), _) => UserLookup::Found(user),
        (None, true) => UserLookup::NeedsFeed,
        (None, false) => UserLookup::Missing,
    }
}

/// Locates the user object in a media feed response.
pub fn feed_user(body: &Value) -> Option<&Value> {
    body.get("user").filter(|u| is_usable_user(u))
}

/// Reduces either payload variant to the canonical [`ProfileSnapshot`],
/// keeping at most `post_limit` posts. Entries that are not objects, or
/// that carry an unreadable counter, are dropped.
pub fn snapshot(user: &Value, post_limit: usize) -> ProfileSnapshot {
    let followers = Counter::read(user, "follower_count", "edge_followed_by").value();

    let posts = PostList::read(user)
        .entries()
        .iter()
        .take(post_limit)
        .filter_map(post_counts)
        .collect();

    ProfileSnapshot { followers, posts }
}

fn post_counts(entry: &Value) -> Option<PostCounts> {
    let node = entry.get("node").unwrap_or(entry);
    if !node.is_object() {
        return None;
    }
    let likes = Counter::read(node, "like_count", "edge_liked_by");
    let comments = Counter::read(node, "comment_count", "edge_media_to_comment");
    if likes.is_invalid() || comments.is_invalid() {
        return None;
    }
    Some(PostCounts {
        likes: likes.value(),
        comments: comments.value(),
    })
}

fn is_usable_user(user: &Value) -> bool {
    user.as_object().is_some_and(|obj| !obj.is_empty())
}

/// Accepts JSON numbers (floats truncated, negatives read as zero) and
/// numeric strings.
fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| if f < 0.0 { 0 } else { f.trunc() as u64 })
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

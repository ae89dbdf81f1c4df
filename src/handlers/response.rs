use serde::Serialize;
use worker::*;

/// Permissive CORS headers attached to every reply.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Status, headers and body of a reply before it becomes a worker `Response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpReply {
    /// JSON reply with the given status and CORS headers.
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Result<Self> {
        let body = serde_json::to_string(payload)
            .map_err(|e| Error::RustError(format!("JSON serialization error: {e}")))?;

        let mut headers = cors_headers();
        headers.push(("Content-Type", "application/json".to_string()));

        Ok(HttpReply {
            status,
            headers,
            body: Some(body),
        })
    }

    /// Empty 200 reply carrying only the CORS headers.
    pub fn empty() -> Self {
        HttpReply {
            status: 200,
            headers: cors_headers(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn into_response(self) -> Result<Response> {
        let headers = Headers::new();
        for (name, value) in &self.headers {
            headers.set(name, value)?;
        }

        let response = match self.body {
            Some(body) => Response::ok(body)?,
            None => Response::empty()?,
        };
        Ok(response.with_status(self.status).with_headers(headers))
    }
}

fn cors_headers() -> Vec<(&'static str, String)> {
    CORS_HEADERS
        .iter()
        .map(|(name, value)| (*name, value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_cors(reply: &HttpReply) {
        assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(reply.header("Access-Control-Allow-Methods"), Some("POST, OPTIONS"));
        assert_eq!(reply.header("Access-Control-Allow-Headers"), Some("Content-Type"));
    }

    #[test]
    fn json_reply_carries_cors_and_content_type() {
        let reply = HttpReply::json(400, &json!({ "error": "Username is required" })).unwrap();
        assert_eq!(reply.status, 400);
        assert_cors(&reply);
        assert_eq!(reply.header("content-type"), Some("application/json"));
        assert_eq!(reply.body.as_deref(), Some(r#"{"error":"Username is required"}"#));
    }

    #[test]
    fn empty_reply_is_ok_without_body() {
        let reply = HttpReply::empty();
        assert_eq!(reply.status, 200);
        assert_cors(&reply);
        assert_eq!(reply.header("Content-Type"), None);
        assert!(reply.body.is_none());
    }

    #[test]
    fn header_lookup_misses_unknown_names() {
        assert_eq!(HttpReply::empty().header("X-Ig-App-Id"), None);
    }
}

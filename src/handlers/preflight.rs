use tracing::debug;
use worker::*;

use super::response::HttpReply;
use crate::error::ErrorBody;

const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// `OPTIONS /`: CORS preflight, empty body.
pub fn handle(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    preflight_reply().into_response()
}

/// Any other method on `/`.
pub fn method_not_allowed(req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    debug!(target: "gramrate::handlers", method = ?req.method(), "method not allowed");
    method_not_allowed_reply()?.into_response()
}

pub fn preflight_reply() -> HttpReply {
    HttpReply::empty()
}

pub fn method_not_allowed_reply() -> Result<HttpReply> {
    HttpReply::json(
        405,
        &ErrorBody {
            error: METHOD_NOT_ALLOWED.to_string(),
        },
    )
}

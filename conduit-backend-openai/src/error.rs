//! Internal error helpers for mapping HTTP/reqwest errors to [`BackendFault`].

use conduit_core::BackendFault;

/// Map a non-success HTTP status to a [`BackendFault`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> BackendFault {
    match status.as_u16() {
        401 | 403 => BackendFault::AuthFailed(body.to_string()),
        429 => BackendFault::RateLimited(body.to_string()),
        _ => BackendFault::RequestFailed(format!("HTTP {status}: {body}")),
    }
}

/// Map a [`reqwest::Error`] to a [`BackendFault`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> BackendFault {
    if err.is_timeout() {
        BackendFault::RequestFailed(format!("timed out: {err}"))
    } else if err.is_decode() {
        BackendFault::InvalidResponse(err.to_string())
    } else {
        BackendFault::RequestFailed(err.to_string())
    }
}

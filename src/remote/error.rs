//! Normalization of gallery API failures.
//!
//! Every HTTP failure is folded into the crate error taxonomy here so the
//! store and controller only ever see `Unauthenticated`, `NotFound`,
//! `Remote` or `Network`.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::ArtifyError;

/// Error body returned by the gallery API.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best-effort parse; non-JSON bodies are used verbatim when short.
    pub fn parse(raw: &str) -> Self {
        if let Ok(body) = serde_json::from_str::<ErrorBody>(raw) {
            return body;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 200 {
            return ErrorBody::default();
        }
        ErrorBody {
            message: Some(trimmed.to_string()),
            error: None,
        }
    }

    fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Map a non-2xx status to the crate error.
///
/// `entity` is the identifier the request was about, used for `NotFound`
/// on single-record endpoints. List endpoints pass `None` so a 404 there
/// stays a plain remote error.
pub fn status_error(status: StatusCode, body: &ErrorBody, entity: Option<&str>) -> ArtifyError {
    let message = body
        .text()
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

    match (status.as_u16(), entity) {
        (401 | 403, _) => ArtifyError::Unauthenticated(message),
        (404, Some(id)) => ArtifyError::NotFound(id.to_string()),
        (code, _) => ArtifyError::Remote {
            status: code,
            message,
        },
    }
}

/// Map a transport failure.
///
/// Anything that never produced a response is a network error; a response
/// whose body could not be decoded is reported as such.
pub fn transport_error(err: reqwest::Error) -> ArtifyError {
    if err.is_decode() {
        return ArtifyError::Decode(err.to_string());
    }
    if err.is_timeout() {
        return ArtifyError::Network(format!("request timed out: {err}"));
    }
    if let Some(status) = err.status() {
        return status_error(status, &ErrorBody::default(), None);
    }
    ArtifyError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_message() {
        let body = ErrorBody::parse(r#"{"message":"Artwork not yours"}"#);
        assert_eq!(body.text(), Some("Artwork not yours"));

        let body = ErrorBody::parse(r#"{"error":"bad token"}"#);
        assert_eq!(body.text(), Some("bad token"));
    }

    #[test]
    fn test_parse_plain_text_and_empty() {
        assert_eq!(ErrorBody::parse("Bad Gateway").text(), Some("Bad Gateway"));
        assert_eq!(ErrorBody::parse("").text(), None);
        assert_eq!(ErrorBody::parse(&"x".repeat(500)).text(), None);
    }

    #[test]
    fn test_status_mapping() {
        let body = ErrorBody::default();
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, &body, None),
            ArtifyError::Unauthenticated(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, &body, Some("a1")),
            ArtifyError::Unauthenticated(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, &body, Some("a1")),
            ArtifyError::NotFound(ref id) if id == "a1"
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, &body, None),
            ArtifyError::Remote { status: 404, .. }
        ));
    }

    #[test]
    fn test_status_message_falls_back_to_reason() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, &ErrorBody::default(), None);
        match err {
            ArtifyError::Remote { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

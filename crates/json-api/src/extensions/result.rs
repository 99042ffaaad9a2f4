//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{error, warn};

/// Map handler-side failures onto HTTP errors.
pub(crate) trait ResultExt<T> {
    /// Log at error level and answer 500 without exposing the cause.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Log at warn level and answer 400, carrying the error text as the brief.
    fn or_400(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            warn!("{context}: {error}");

            StatusError::bad_request().brief(error.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_400_carries_the_reason() {
        let result: Result<(), &str> = Err("limit must be an integer between 1 and 100");

        let error = result.or_400("invalid query").err();

        assert_eq!(error.as_ref().map(|e| e.code), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            error.map(|e| e.brief),
            Some("limit must be an integer between 1 and 100".to_string())
        );
    }

    #[test]
    fn or_500_hides_the_reason() {
        let result: Result<(), &str> = Err("connection refused");

        let error = result.or_500("failed").err();

        assert_eq!(error.as_ref().map(|e| e.code), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(
            error.is_some_and(|e| !e.brief.contains("connection refused")),
            "store detail must not leak"
        );
    }
}

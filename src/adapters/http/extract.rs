//! Request extractors with envelope-shaped rejections.

use std::str::FromStr;

use axum::extract::FromRequest;

use super::error::ApiError;

/// `axum::Json` whose rejection is a 400 envelope instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Parses an identifier taken from the path.
///
/// A malformed id is a client error, never a lookup miss.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} id: {}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SubscriptionId;
    use axum::http::StatusCode;

    #[test]
    fn parse_id_accepts_uuid() {
        let id = SubscriptionId::new();
        let parsed: SubscriptionId = parse_id(&id.to_string(), "subscription").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_id_rejects_garbage_with_bad_request() {
        let err = parse_id::<SubscriptionId>("not-a-uuid", "subscription").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid subscription id: not-a-uuid");
    }
}

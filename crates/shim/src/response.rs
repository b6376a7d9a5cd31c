//! Invocation response

use serde::{Deserialize, Serialize};

/// Result of one chaincode call as seen by the caller.
///
/// Failures carry a human-readable message only; the caller surfaces it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub payload: Option<Vec<u8>>,
}

impl Response {
    pub const OK: i32 = 200;
    pub const ERROR: i32 = 500;

    /// Successful response with an optional payload
    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Self::OK,
            message: String::new(),
            payload,
        }
    }

    /// Failed response carrying `message`
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR,
            message: message.into(),
            payload: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }

    /// Payload decoded as UTF-8, if any
    pub fn payload_str(&self) -> Option<&str> {
        self.payload
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_without_payload() {
        let response = Response::success(None);
        assert!(response.is_ok());
        assert!(response.message.is_empty());
        assert_eq!(response.payload_str(), None);
    }

    #[test]
    fn test_success_with_payload() {
        let response = Response::success(Some(b"80".to_vec()));
        assert_eq!(response.payload_str(), Some("80"));
    }

    #[test]
    fn test_error_keeps_message() {
        let response = Response::error("Account b not found");
        assert!(!response.is_ok());
        assert_eq!(response.status, Response::ERROR);
        assert_eq!(response.message, "Account b not found");
    }

    #[test]
    fn test_json_shape() {
        let response = Response::error("boom");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], 500);
        assert_eq!(json["message"], "boom");
        assert!(json["payload"].is_null());
    }
}

//! Bundle submission seam.
//!
//! Abstracts the block-engine transport so the strategy can be tested
//! without a network. A response payload carrying an `"error"` key is
//! a hard failure of that submission attempt; retry policy belongs to
//! the caller, never to this layer.

use std::pin::Pin;
use std::sync::Arc;

use crate::bundle::Bundle;
use crate::error::{JitoError, JitoResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Transport for submitting assembled bundles.
pub trait BundleSender: Send + Sync {
    /// Submit a bundle, resolving to the engine-assigned bundle id.
    fn submit(&self, bundle: Bundle) -> BoxFuture<'_, JitoResult<String>>;
}

/// Arc wrapper for BundleSender trait objects.
pub type DynBundleSender = Arc<dyn BundleSender>;

/// Parse a block-engine JSON response into a bundle id.
///
/// `{"result": "<id>"}` succeeds; any payload with an `"error"` key
/// fails hard with `Rejected`; everything else is malformed.
pub fn parse_submit_response(body: &str) -> JitoResult<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| JitoError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(error) = value.get("error") {
        return Err(JitoError::Rejected(error.to_string()));
    }

    match value.get("result").and_then(|r| r.as_str()) {
        Some(id) => Ok(id.to_string()),
        None => Err(JitoError::MalformedResponse(
            "response has neither result nor error".into(),
        )),
    }
}

/// Mock sender for tests; records submitted bundles.
#[derive(Debug, Default)]
pub struct MockBundleSender {
    submissions: parking_lot::Mutex<Vec<Bundle>>,
    next_response: parking_lot::Mutex<Option<String>>,
}

impl MockBundleSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw JSON response body for the next submission.
    /// Defaults to a successful response when unset.
    pub fn set_next_response(&self, body: impl Into<String>) {
        *self.next_response.lock() = Some(body.into());
    }

    /// Bundles submitted so far.
    pub fn submissions(&self) -> Vec<Bundle> {
        self.submissions.lock().clone()
    }
}

impl BundleSender for MockBundleSender {
    fn submit(&self, bundle: Bundle) -> BoxFuture<'_, JitoResult<String>> {
        Box::pin(async move {
            self.submissions.lock().push(bundle);
            let body = self
                .next_response
                .lock()
                .take()
                .unwrap_or_else(|| r#"{"result": "bundle-1"}"#.to_string());
            parse_submit_response(&body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::build_bundle;

    #[test]
    fn test_parse_success_response() {
        let id = parse_submit_response(r#"{"result": "abc123"}"#).unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_error_key_is_hard_failure() {
        let err =
            parse_submit_response(r#"{"error": {"code": -32000, "message": "rate limited"}}"#)
                .unwrap_err();
        assert!(matches!(err, JitoError::Rejected(_)));
    }

    #[test]
    fn test_malformed_response() {
        assert!(matches!(
            parse_submit_response("not json"),
            Err(JitoError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_submit_response(r#"{"unexpected": true}"#),
            Err(JitoError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_sender_round_trip() {
        let sender = MockBundleSender::new();
        let bundle = build_bundle(&["a".to_string()], "tip".to_string()).unwrap();

        let id = sender.submit(bundle.clone()).await.unwrap();
        assert_eq!(id, "bundle-1");
        assert_eq!(sender.submissions(), vec![bundle]);
    }

    #[tokio::test]
    async fn test_mock_sender_rejection() {
        let sender = MockBundleSender::new();
        sender.set_next_response(r#"{"error": "simulation failed"}"#);

        let bundle = build_bundle(&["a".to_string()], "tip".to_string()).unwrap();
        let err = sender.submit(bundle).await.unwrap_err();
        assert!(matches!(err, JitoError::Rejected(_)));
    }
}

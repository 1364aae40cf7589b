//! Outbound call trigger
//!
//! Validates the destination number and asks the provider to place a call
//! answered by the IVR welcome route. Exactly one placement attempt per
//! invocation; duplicate trigger requests produce duplicate calls.

use std::sync::Arc;

use regex::Regex;
use tracing::info;

use crate::provider::{CallProvider, PlaceCallRequest, PlacedCall};
use crate::{Error, Result};

/// Outbound call trigger
pub struct CallTrigger {
    provider: Arc<dyn CallProvider>,
    from_number: String,
    answer_url: String,
    e164: Regex,
}

impl CallTrigger {
    pub fn new(provider: Arc<dyn CallProvider>, from_number: &str, server_url: &str) -> Self {
        Self {
            provider,
            from_number: from_number.to_string(),
            answer_url: format!("{}/ivr/welcome", server_url.trim_end_matches('/')),
            e164: Regex::new(r"^\+[1-9]\d{1,14}$").unwrap(),
        }
    }

    /// Validate the destination and place exactly one call.
    pub async fn trigger(&self, to_number: Option<&str>) -> Result<PlacedCall> {
        let to_number = to_number
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::Validation("Missing required field: to_number".to_string()))?;

        if !self.e164.is_match(to_number) {
            return Err(Error::Validation(
                "Invalid phone number format. Use E.164 format (e.g., +1234567890)".to_string(),
            ));
        }

        info!(to = %to_number, "Initiating call");

        let request = PlaceCallRequest {
            from: self.from_number.clone(),
            to: to_number.to_string(),
            answer_url: self.answer_url.clone(),
            answer_method: "GET".to_string(),
        };

        let placed = self.provider.place_call(&request).await?;

        info!(
            call_uuid = %placed.request_uuid,
            api_id = %placed.api_id,
            "Call initiated"
        );

        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::{ProviderError, ProviderResult};

    struct RecordingProvider {
        calls: Mutex<Vec<PlaceCallRequest>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn recorded(&self) -> Vec<PlaceCallRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CallProvider for RecordingProvider {
        async fn place_call(&self, request: &PlaceCallRequest) -> ProviderResult<PlacedCall> {
            self.calls.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(ProviderError::Api {
                    status: 401,
                    message: "invalid credentials".to_string(),
                });
            }
            Ok(PlacedCall {
                request_uuid: "uuid-1".to_string(),
                api_id: "api-1".to_string(),
                message: "call fired".to_string(),
            })
        }
    }

    fn trigger_with(provider: Arc<RecordingProvider>) -> CallTrigger {
        CallTrigger::new(provider, "+15550009999", "https://ivr.example.com")
    }

    #[tokio::test]
    async fn places_call_with_welcome_answer_url() {
        let provider = RecordingProvider::new();
        let trigger = trigger_with(provider.clone());

        let placed = trigger.trigger(Some("+14155551234")).await.unwrap();
        assert_eq!(placed.request_uuid, "uuid-1");
        assert_eq!(placed.api_id, "api-1");

        let calls = provider.recorded();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].from, "+15550009999");
        assert_eq!(calls[0].to, "+14155551234");
        assert_eq!(calls[0].answer_url, "https://ivr.example.com/ivr/welcome");
        assert_eq!(calls[0].answer_method, "GET");
    }

    #[tokio::test]
    async fn rejects_missing_number_without_side_effect() {
        let provider = RecordingProvider::new();
        let trigger = trigger_with(provider.clone());

        let err = trigger.trigger(None).await.unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("to_number")));
        assert!(provider.recorded().is_empty());
    }

    #[tokio::test]
    async fn treats_empty_number_as_missing() {
        let provider = RecordingProvider::new();
        let trigger = trigger_with(provider.clone());

        let err = trigger.trigger(Some("")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("Missing required field")));
        assert!(provider.recorded().is_empty());
    }

    #[tokio::test]
    async fn rejects_malformed_numbers_without_side_effect() {
        let provider = RecordingProvider::new();
        let trigger = trigger_with(provider.clone());

        for bad in [
            "14155551234",       // no leading plus
            "+04155551234",      // leading zero
            "+1415555123456789", // more than 15 digits
            "+1415abc1234",      // letters
            "+",                 // no digits
        ] {
            let err = trigger.trigger(Some(bad)).await.unwrap_err();
            assert!(
                matches!(err, Error::Validation(msg) if msg.contains("E.164")),
                "expected validation failure for {bad}"
            );
        }
        assert!(provider.recorded().is_empty());
    }

    #[tokio::test]
    async fn propagates_provider_failure() {
        let provider = RecordingProvider::failing();
        let trigger = trigger_with(provider.clone());

        let err = trigger.trigger(Some("+14155551234")).await.unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
        assert_eq!(provider.recorded().len(), 1);
    }
}

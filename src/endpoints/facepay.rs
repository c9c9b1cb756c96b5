//! Face-recognition payment.

use super::{execute, Endpoint};
use crate::context::Context;
use crate::errors::Result;
use crate::transport::Transport;
use crate::types::{FacepayRequest, FacepayResponse};
use std::sync::Arc;

/// Charges a payer identified by a face recognition code.
#[derive(Clone)]
pub struct Facepay {
    context: Arc<Context>,
    transport: Arc<dyn Transport>,
}

impl Facepay {
    /// Creates the wrapper over a shared context and transport.
    pub fn new(context: Arc<Context>, transport: Arc<dyn Transport>) -> Self {
        Self { context, transport }
    }

    /// Submits a face-pay charge.
    pub async fn pay(&self, mut request: FacepayRequest) -> Result<FacepayResponse> {
        request.mchid = self.context.mchid.clone();
        execute(&self.context, self.transport.as_ref(), Endpoint::Facepay, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::*;
    use crate::errors::PayJsError;
    use serde_json::json;

    #[tokio::test]
    async fn test_pay_success_with_string_total_fee() {
        let transport = Arc::new(RecordingTransport::replying(&signed(json!({
            "return_code": 1,
            "return_msg": "SUCCESS",
            "payjs_order_id": "2019040287654321",
            "out_trade_no": "FACE1",
            "total_fee": "250",
        }))));
        let facepay = Facepay::new(Arc::new(context()), transport.clone());

        let response = facepay
            .pay(FacepayRequest::new(250, "FACE1", "o7LFAwUGxxxx", "face-code-123"))
            .await
            .unwrap();

        assert_eq!(response.total_fee, "250");
        assert_eq!(response.total_fee_cents().unwrap(), 250);

        let (url, payload) = transport.last_call();
        assert_eq!(url, "https://payjs.cn/api/facepay");
        assert_eq!(payload["face_code"], "face-code-123");
        assert_eq!(payload["mchid"], "1900000001");
        assert!(payload.get("notify_url").is_none());
    }

    #[tokio::test]
    async fn test_pay_failure_uses_return_msg() {
        let transport = Arc::new(RecordingTransport::replying(&json!({
            "return_code": 0,
            "return_msg": "face_code expired",
        })));
        let facepay = Facepay::new(Arc::new(context()), transport);

        let err = facepay
            .pay(FacepayRequest::new(250, "FACE1", "o7LFAwUGxxxx", "stale"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("face_code expired"));
        assert!(matches!(err, PayJsError::GatewayError { .. }));
    }
}

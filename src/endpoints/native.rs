//! Native (QR code) payment.

use super::{execute, Endpoint};
use crate::context::Context;
use crate::errors::Result;
use crate::transport::Transport;
use crate::types::{NativeRequest, NativeResponse};
use std::sync::Arc;

/// Requests a payment QR code for an order.
#[derive(Clone)]
pub struct Native {
    context: Arc<Context>,
    transport: Arc<dyn Transport>,
}

impl Native {
    /// Creates the wrapper over a shared context and transport.
    pub fn new(context: Arc<Context>, transport: Arc<dyn Transport>) -> Self {
        Self { context, transport }
    }

    /// Creates a QR code payment.
    ///
    /// The merchant id always comes from the context; the context's notification
    /// URL is used when the request does not carry one.
    pub async fn create_qrcode(&self, mut request: NativeRequest) -> Result<NativeResponse> {
        request.mchid = self.context.mchid.clone();
        if request.notify_url.is_none() {
            request.notify_url = self.context.notify_url.clone();
        }

        execute(&self.context, self.transport.as_ref(), Endpoint::Native, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::*;
    use crate::errors::PayJsError;
    use serde_json::json;

    fn wrapper(transport: Arc<RecordingTransport>) -> Native {
        Native::new(Arc::new(context()), transport)
    }

    #[tokio::test]
    async fn test_create_qrcode_success() {
        let transport = Arc::new(RecordingTransport::replying(&signed(json!({
            "return_code": 1,
            "return_msg": "SUCCESS",
            "payjs_order_id": "2019040212345678",
            "out_trade_no": "ORDER1",
            "total_fee": 100,
            "qrcode": "https://payjs.cn/qrcode/d2VpeGluOi8vd3hwYXk=",
            "code_url": "weixin://wxpay/bizpayurl?pr=abc",
        }))));

        let response = wrapper(transport.clone())
            .create_qrcode(NativeRequest::new(100, "ORDER1").with_body("Coffee"))
            .await
            .unwrap();

        assert_eq!(response.payjs_order_id, "2019040212345678");
        assert_eq!(response.total_fee, 100);
        assert_eq!(response.code_url, "weixin://wxpay/bizpayurl?pr=abc");

        let (url, payload) = transport.last_call();
        assert_eq!(url, "https://payjs.cn/api/native");
        assert_eq!(payload["mchid"], "1900000001");
        assert_eq!(payload["notify_url"], "https://shop.example.com/notify");
        assert_eq!(payload["body"], "Coffee");
        assert!(context().signer().verify(&payload, payload["sign"].as_str().unwrap()).unwrap());
    }

    #[tokio::test]
    async fn test_request_notify_url_wins() {
        let transport = Arc::new(RecordingTransport::replying(&signed(json!({
            "return_code": 1,
            "out_trade_no": "ORDER2",
            "total_fee": 1,
        }))));

        wrapper(transport.clone())
            .create_qrcode(
                NativeRequest::new(1, "ORDER2").with_notify_url("https://other.example.com/cb"),
            )
            .await
            .unwrap();

        let (_, payload) = transport.last_call();
        assert_eq!(payload["notify_url"], "https://other.example.com/cb");
    }

    #[tokio::test]
    async fn test_tampered_total_fee_rejected() {
        let mut body = signed(json!({
            "return_code": 1,
            "out_trade_no": "ORDER1",
            "total_fee": 100,
            "qrcode": "https://payjs.cn/qrcode/abc",
        }));
        body["total_fee"] = json!(1);
        let transport = Arc::new(RecordingTransport::replying(&body));

        let err = wrapper(transport)
            .create_qrcode(NativeRequest::new(100, "ORDER1"))
            .await
            .unwrap_err();

        assert!(matches!(err, PayJsError::IntegrityError));
    }

    #[tokio::test]
    async fn test_wrong_key_rejected() {
        let mut body = json!({
            "return_code": 1,
            "out_trade_no": "ORDER1",
            "total_fee": 100,
        });
        body["sign"] = json!(crate::signer::Signer::new("otherkey").sign(&body).unwrap());
        let transport = Arc::new(RecordingTransport::replying(&body));

        let err = wrapper(transport)
            .create_qrcode(NativeRequest::new(100, "ORDER1"))
            .await
            .unwrap_err();

        assert!(matches!(err, PayJsError::IntegrityError));
    }
}

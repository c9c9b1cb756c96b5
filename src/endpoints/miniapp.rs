//! Mini-app order descriptors.
//!
//! No request is sent from here: the signed descriptor goes to the front-end,
//! which hands it to the gateway itself.

use super::sign_request;
use crate::context::Context;
use crate::errors::Result;
use crate::types::OrderInfo;
use crate::utils::generate_nonce;
use std::sync::Arc;

/// Builds signed order descriptors for a mini-app front-end.
#[derive(Clone, Debug)]
pub struct MiniApp {
    context: Arc<Context>,
}

impl MiniApp {
    /// Creates the wrapper over a shared context.
    pub fn new(context: Arc<Context>) -> Self {
        Self { context }
    }

    /// Fills in merchant defaults and signs the descriptor.
    ///
    /// A random nonce is generated when `order.nonce` is empty.
    pub fn order_info(&self, mut order: OrderInfo) -> Result<OrderInfo> {
        order.mch_id = self.context.mchid.clone();
        if order.notify_url.is_none() {
            order.notify_url = self.context.notify_url.clone();
        }
        if order.nonce.is_empty() {
            order.nonce = generate_nonce();
        }

        sign_request(&self.context, &mut order)?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::*;

    #[test]
    fn test_order_info_signed() {
        let mini_app = MiniApp::new(Arc::new(context()));
        let order = mini_app
            .order_info(OrderInfo::new(300, "MINI1").with_body("Tea").with_nonce("abc123"))
            .unwrap();

        assert_eq!(order.mch_id, "1900000001");
        assert_eq!(order.nonce, "abc123");
        assert_eq!(order.notify_url.as_deref(), Some("https://shop.example.com/notify"));

        let mut unsigned = order.clone();
        unsigned.sign.clear();
        assert_eq!(order.sign, context().signer().sign(&unsigned).unwrap());
    }

    #[test]
    fn test_nonce_generated_when_missing() {
        let mini_app = MiniApp::new(Arc::new(context()));
        let first = mini_app.order_info(OrderInfo::new(300, "MINI1")).unwrap();
        let second = mini_app.order_info(OrderInfo::new(300, "MINI1")).unwrap();

        assert_eq!(first.nonce.len(), 32);
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.sign, second.sign);
    }
}

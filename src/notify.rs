//! Asynchronous payment notifications.
//!
//! After a payment completes the gateway POSTs the order's outcome to the
//! merchant's `notify_url`. The callback is signed like any response, over every
//! field it carries, so verification runs on the raw field set rather than on a
//! fixed struct.

use crate::context::Context;
use crate::errors::{PayJsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A verified payment notification.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PaymentNotification {
    /// 1 when the payment succeeded
    pub return_code: i64,

    /// Amount in fen
    pub total_fee: u64,

    /// Merchant order number
    pub out_trade_no: String,

    /// PayJS order id
    pub payjs_order_id: String,

    /// WeChat transaction id
    pub transaction_id: String,

    /// Payment completion time, `YYYY-MM-DD HH:MM:SS`
    pub time_end: String,

    /// Payer openid
    pub openid: String,

    /// Custom data supplied with the order
    pub attach: String,

    /// Merchant id
    pub mchid: String,

    /// Notification signature
    pub sign: String,
}

impl PaymentNotification {
    /// Verifies a form-encoded callback given as name/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use payjs::context::Context;
    /// use payjs::notify::PaymentNotification;
    ///
    /// let context = Context::new("1900000001", "testkey").unwrap();
    /// let fields = vec![
    ///     ("return_code".to_string(), "1".to_string()),
    ///     ("total_fee".to_string(), "100".to_string()),
    ///     ("out_trade_no".to_string(), "ORDER1".to_string()),
    ///     ("sign".to_string(), "forged".to_string()),
    /// ];
    ///
    /// assert!(PaymentNotification::from_form(&context, fields).is_err());
    /// ```
    pub fn from_form<I>(context: &Context, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let map: Map<String, Value> = fields
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        Self::verify_fields(context, map)
    }

    /// Verifies a JSON-encoded callback body.
    pub fn from_json(context: &Context, body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => Self::verify_fields(context, map),
            _ => Err(PayJsError::InvalidRecord(
                "notification body is not a JSON object".to_string(),
            )),
        }
    }

    fn verify_fields(context: &Context, mut fields: Map<String, Value>) -> Result<Self> {
        let claimed = fields
            .get("sign")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if !context
            .signer()
            .verify_fields(fields.iter().map(|(name, value)| (name.as_str(), value)), &claimed)
        {
            return Err(PayJsError::IntegrityError);
        }

        // Form callbacks carry every value as a string.
        for name in ["return_code", "total_fee"] {
            if let Some(Value::String(raw)) = fields.get(name) {
                let parsed = raw.trim().parse::<u64>().map_err(|_| {
                    PayJsError::InvalidAmount(format!("Cannot parse {} '{}'", name, raw))
                })?;
                fields.insert(name.to_string(), Value::from(parsed));
            }
        }

        let notification: Self = serde_json::from_value(Value::Object(fields))?;

        if notification.return_code != crate::types::RETURN_CODE_SUCCESS {
            return Err(PayJsError::GatewayError {
                return_code: notification.return_code,
                status: 0,
                message: format!("payment {} not successful", notification.out_trade_no),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            out_trade_no = %notification.out_trade_no,
            payjs_order_id = %notification.payjs_order_id,
            "payment notification verified"
        );

        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::new("1900000001", "testkey").unwrap()
    }

    fn form(return_code: &str) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = [
            ("return_code", return_code),
            ("total_fee", "100"),
            ("out_trade_no", "ORDER1"),
            ("payjs_order_id", "2019040212345678"),
            ("transaction_id", "4200000300201904021234567890"),
            ("time_end", "2019-04-02 12:00:00"),
            ("openid", "o7LFAwUGxxxx"),
            ("attach", ""),
            ("mchid", "1900000001"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let values: Vec<(String, Value)> = fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let sign = context()
            .signer()
            .sign_fields(values.iter().map(|(k, v)| (k.as_str(), v)));
        fields.push(("sign".to_string(), sign));
        fields
    }

    #[test]
    fn test_form_notification_verified() {
        let notification = PaymentNotification::from_form(&context(), form("1")).unwrap();
        assert_eq!(notification.total_fee, 100);
        assert_eq!(notification.out_trade_no, "ORDER1");
        assert_eq!(notification.transaction_id, "4200000300201904021234567890");
    }

    #[test]
    fn test_tampered_notification_rejected() {
        let mut fields = form("1");
        fields[1].1 = "1".to_string();
        assert!(matches!(
            PaymentNotification::from_form(&context(), fields),
            Err(PayJsError::IntegrityError)
        ));
    }

    #[test]
    fn test_failed_payment_notification() {
        assert!(matches!(
            PaymentNotification::from_form(&context(), form("0")),
            Err(PayJsError::GatewayError { return_code: 0, .. })
        ));
    }

    #[test]
    fn test_json_notification_verified() {
        let mut body = serde_json::json!({
            "return_code": 1,
            "total_fee": 100,
            "out_trade_no": "ORDER1",
            "mchid": "1900000001",
        });
        body["sign"] = Value::String(context().signer().sign(&body).unwrap());

        let notification =
            PaymentNotification::from_json(&context(), body.to_string().as_bytes()).unwrap();
        assert_eq!(notification.total_fee, 100);
    }

    #[test]
    fn test_json_notification_not_object() {
        assert!(matches!(
            PaymentNotification::from_json(&context(), b"[1,2]"),
            Err(PayJsError::InvalidRecord(_))
        ));
    }
}

//! Request and response shapes of the PayJS gateway.
//!
//! Amounts are integer minor units (fen). Optional request fields are `None`
//! when unset and are left out of both the JSON body and the signature.
//! Response fields default when the gateway omits them, so failure responses
//! still decode.

use crate::errors::{PayJsError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `return_code` value the gateway uses for success.
pub const RETURN_CODE_SUCCESS: i64 = 1;

/// A request that carries its own `sign` field.
pub trait SignedRequest: Serialize {
    /// Stores the computed signature.
    fn set_sign(&mut self, sign: String);

    /// Merchant order number, when the request has one.
    fn out_trade_no(&self) -> Option<&str> {
        None
    }
}

/// A gateway response with a success flag and a signature.
pub trait GatewayResponse: Serialize + DeserializeOwned {
    /// Raw `return_code` (1 on success).
    fn return_code(&self) -> i64;

    /// `status` reported alongside a failure, 0 when absent.
    fn status(&self) -> i64 {
        0
    }

    /// Human-readable failure detail.
    fn message(&self) -> &str;

    /// Signature the gateway attached to the response.
    fn sign(&self) -> &str;

    /// Whether the gateway reported success.
    fn is_success(&self) -> bool {
        self.return_code() == RETURN_CODE_SUCCESS
    }
}

/// Picks `msg` when present, `return_msg` otherwise.
fn failure_message<'a>(msg: &'a str, return_msg: &'a str) -> &'a str {
    if msg.is_empty() {
        return_msg
    } else {
        msg
    }
}

/// Native (QR code) payment request.
///
/// # Examples
///
/// ```
/// use payjs::types::NativeRequest;
///
/// let request = NativeRequest::new(100, "ORDER1").with_body("Coffee");
/// assert_eq!(request.total_fee, 100);
/// assert_eq!(request.body.as_deref(), Some("Coffee"));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NativeRequest {
    /// Merchant id, filled from the context
    pub mchid: String,

    /// Amount in fen
    pub total_fee: u64,

    /// Merchant order number
    pub out_trade_no: String,

    /// Order title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Custom data echoed back in the notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach: Option<String>,

    /// Notification URL, defaults to the context's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,

    /// Request signature
    #[serde(default)]
    pub sign: String,
}

impl NativeRequest {
    /// Creates a request for `total_fee` fen under the merchant order `out_trade_no`.
    pub fn new(total_fee: u64, out_trade_no: impl Into<String>) -> Self {
        Self {
            total_fee,
            out_trade_no: out_trade_no.into(),
            ..Default::default()
        }
    }

    /// Sets the order title.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the custom data echoed back in the notification.
    pub fn with_attach(mut self, attach: impl Into<String>) -> Self {
        self.attach = Some(attach.into());
        self
    }

    /// Overrides the context's notification URL for this order.
    pub fn with_notify_url(mut self, notify_url: impl Into<String>) -> Self {
        self.notify_url = Some(notify_url.into());
        self
    }
}

impl SignedRequest for NativeRequest {
    fn set_sign(&mut self, sign: String) {
        self.sign = sign;
    }

    fn out_trade_no(&self) -> Option<&str> {
        Some(&self.out_trade_no)
    }
}

/// Native (QR code) payment response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NativeResponse {
    /// 1 on success, 0 on failure
    pub return_code: i64,

    /// Present on failure
    pub status: i64,

    /// Failure message
    pub msg: String,

    /// Gateway message
    pub return_msg: String,

    /// PayJS order id
    pub payjs_order_id: String,

    /// Merchant order number, echoed
    pub out_trade_no: String,

    /// Amount in fen
    pub total_fee: u64,

    /// QR code image URL
    pub qrcode: String,

    /// Payment URL to render as a QR code
    pub code_url: String,

    /// Response signature
    pub sign: String,
}

impl GatewayResponse for NativeResponse {
    fn return_code(&self) -> i64 {
        self.return_code
    }

    fn status(&self) -> i64 {
        self.status
    }

    fn message(&self) -> &str {
        failure_message(&self.msg, &self.return_msg)
    }

    fn sign(&self) -> &str {
        &self.sign
    }
}

/// Face-recognition payment request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FacepayRequest {
    /// Merchant id, filled from the context
    pub mchid: String,

    /// Amount in fen
    pub total_fee: u64,

    /// Merchant order number
    pub out_trade_no: String,

    /// Order title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Custom data echoed back in the notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach: Option<String>,

    /// Payer openid
    pub openid: String,

    /// Face recognition code
    pub face_code: String,

    /// Request signature
    #[serde(default)]
    pub sign: String,
}

impl FacepayRequest {
    /// Creates a face-pay request.
    pub fn new(
        total_fee: u64,
        out_trade_no: impl Into<String>,
        openid: impl Into<String>,
        face_code: impl Into<String>,
    ) -> Self {
        Self {
            total_fee,
            out_trade_no: out_trade_no.into(),
            openid: openid.into(),
            face_code: face_code.into(),
            ..Default::default()
        }
    }

    /// Sets the order title.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the custom data echoed back in the notification.
    pub fn with_attach(mut self, attach: impl Into<String>) -> Self {
        self.attach = Some(attach.into());
        self
    }
}

impl SignedRequest for FacepayRequest {
    fn set_sign(&mut self, sign: String) {
        self.sign = sign;
    }

    fn out_trade_no(&self) -> Option<&str> {
        Some(&self.out_trade_no)
    }
}

/// Face-recognition payment response.
///
/// The gateway sends `total_fee` as a string on this endpoint only; it is kept
/// as sent so the signature checks out, and [`FacepayResponse::total_fee_cents`]
/// normalizes it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FacepayResponse {
    /// 1 on success, 0 on failure
    pub return_code: i64,

    /// Present on failure
    pub status: i64,

    /// Failure message
    pub msg: String,

    /// Gateway message
    pub return_msg: String,

    /// PayJS order id
    pub payjs_order_id: String,

    /// Merchant order number, echoed
    pub out_trade_no: String,

    /// Amount in fen, as a decimal string
    pub total_fee: String,

    /// Response signature
    pub sign: String,
}

impl FacepayResponse {
    /// Parses `total_fee` into fen.
    pub fn total_fee_cents(&self) -> Result<u64> {
        self.total_fee
            .trim()
            .parse()
            .map_err(|_| PayJsError::InvalidAmount(format!("Cannot parse '{}' as fen", self.total_fee)))
    }
}

impl GatewayResponse for FacepayResponse {
    fn return_code(&self) -> i64 {
        self.return_code
    }

    fn status(&self) -> i64 {
        self.status
    }

    fn message(&self) -> &str {
        failure_message(&self.msg, &self.return_msg)
    }

    fn sign(&self) -> &str {
        &self.sign
    }
}

/// Order descriptor handed to a mini-app front-end, which completes payment itself.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OrderInfo {
    /// Merchant id, filled from the context
    pub mch_id: String,

    /// Amount in fen
    pub total_fee: u64,

    /// Merchant order number
    pub out_trade_no: String,

    /// Order title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Custom data echoed back in the notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach: Option<String>,

    /// Notification URL, defaults to the context's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,

    /// Random string, generated when left empty
    #[serde(default)]
    pub nonce: String,

    /// Descriptor signature
    #[serde(default)]
    pub sign: String,
}

impl OrderInfo {
    /// Creates a descriptor for `total_fee` fen under the merchant order `out_trade_no`.
    pub fn new(total_fee: u64, out_trade_no: impl Into<String>) -> Self {
        Self {
            total_fee,
            out_trade_no: out_trade_no.into(),
            ..Default::default()
        }
    }

    /// Sets the order title.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the custom data echoed back in the notification.
    pub fn with_attach(mut self, attach: impl Into<String>) -> Self {
        self.attach = Some(attach.into());
        self
    }

    /// Overrides the context's notification URL.
    pub fn with_notify_url(mut self, notify_url: impl Into<String>) -> Self {
        self.notify_url = Some(notify_url.into());
        self
    }

    /// Uses a caller-chosen nonce instead of a random one.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }
}

impl SignedRequest for OrderInfo {
    fn set_sign(&mut self, sign: String) {
        self.sign = sign;
    }

    fn out_trade_no(&self) -> Option<&str> {
        Some(&self.out_trade_no)
    }
}

/// User info lookup request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserInfoRequest {
    /// Merchant id, filled from the context
    pub mchid: String,

    /// openid of a user who has paid through PayJS
    pub openid: String,

    /// Request signature
    #[serde(default)]
    pub sign: String,
}

impl SignedRequest for UserInfoRequest {
    fn set_sign(&mut self, sign: String) {
        self.sign = sign;
    }
}

/// User info lookup response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UserInfoResponse {
    /// 1 on success, 0 on failure
    pub return_code: i64,

    /// Gateway message
    pub return_msg: String,

    /// JSON-encoded [`UserInfo`]
    pub user: String,

    /// Response signature
    pub sign: String,
}

impl UserInfoResponse {
    /// Decodes the embedded `user` document.
    pub fn user_info(&self) -> Result<UserInfo> {
        Ok(serde_json::from_str(&self.user)?)
    }
}

impl GatewayResponse for UserInfoResponse {
    fn return_code(&self) -> i64 {
        self.return_code
    }

    fn message(&self) -> &str {
        &self.return_msg
    }

    fn sign(&self) -> &str {
        &self.sign
    }
}

/// WeChat user profile returned by the user info lookup.
///
/// Scalar fields the gateway sends either as numbers or strings are kept as
/// strings; `tagid_list` holds the JSON text of the tag array.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UserInfo {
    /// "0" when the user does not follow the PayJS account
    #[serde(deserialize_with = "lenient_string")]
    pub subscribe: String,

    /// openid
    pub openid: String,

    /// Nickname
    pub nickname: String,

    /// 1 male, 2 female, 0 unknown
    pub sex: i64,

    /// City
    pub city: String,

    /// Country
    pub country: String,

    /// Province
    pub province: String,

    /// Language, e.g. `zh_CN`
    pub language: String,

    /// Avatar URL
    pub headimgurl: String,

    /// Unix timestamp of the latest subscription
    #[serde(deserialize_with = "lenient_string")]
    pub subscribe_time: String,

    /// Operator remark
    pub remark: String,

    /// Group id
    #[serde(deserialize_with = "lenient_string")]
    pub groupid: String,

    /// Tag id list
    #[serde(deserialize_with = "lenient_string")]
    pub tagid_list: String,

    /// Subscription channel, e.g. `ADD_SCENE_QR_CODE`
    pub subscribe_scene: String,

    /// QR code scene
    #[serde(deserialize_with = "lenient_string")]
    pub qr_scene: String,

    /// QR code scene description
    pub qr_scene_str: String,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

//! Request and response signing for the PayJS protocol.
//!
//! A record is canonicalized into `name=value` pairs joined with `&`, sorted by
//! field name, with the signature field and blank values left out. The secret key
//! is appended as `&key=<secret>` and the digest of that string, rendered as
//! uppercase hex, is the signature.
//!
//! The gateway fixes the digest to MD5. [`Signer`] is generic over the digest so
//! the contract stays the same should the protocol ever change.

use crate::errors::{PayJsError, Result};
use md5::digest::Digest;
use md5::Md5;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Field names that never take part in their own signature.
pub const SIGNATURE_FIELDS: [&str; 2] = ["sign", "signature"];

/// Produces and verifies PayJS signatures with a shared secret key.
///
/// # Examples
///
/// ```
/// use payjs::signer::Signer;
/// use serde_json::json;
///
/// let signer = Signer::new("testkey");
/// let sign = signer
///     .sign(&json!({"mchid": "1900000001", "total_fee": 100, "out_trade_no": "ORDER1"}))
///     .unwrap();
/// assert_eq!(sign, "960164C2FD853D86697FE56F3C5B8A44");
/// ```
pub struct Signer<D = Md5> {
    key: String,
    digest: PhantomData<fn() -> D>,
}

impl Signer<Md5> {
    /// Creates a signer using the gateway's MD5 digest.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_digest(key)
    }
}

impl<D: Digest> Signer<D> {
    /// Creates a signer using an arbitrary digest.
    pub fn with_digest(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            digest: PhantomData,
        }
    }

    /// Signs any record that serializes to a flat JSON object.
    pub fn sign<T: Serialize + ?Sized>(&self, record: &T) -> Result<String> {
        let fields = record_fields(record)?;
        Ok(self.sign_fields(fields.iter().map(|(name, value)| (name.as_str(), value))))
    }

    /// Signs an explicit field mapping.
    pub fn sign_fields<'a, I>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut signable = canonicalize(fields);
        signable.push_str("&key=");
        signable.push_str(&self.key);
        hex::encode_upper(D::digest(signable.as_bytes()))
    }

    /// Recomputes the signature of `record` and compares it with `claimed`.
    pub fn verify<T: Serialize + ?Sized>(&self, record: &T, claimed: &str) -> Result<bool> {
        Ok(self.sign(record)? == claimed)
    }

    /// Same as [`Signer::verify`] over an explicit field mapping.
    pub fn verify_fields<'a, I>(&self, fields: I, claimed: &str) -> bool
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        self.sign_fields(fields) == claimed
    }
}

impl<D> Clone for Signer<D> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Signer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("key", &"<redacted>").finish()
    }
}

/// Returns the canonical `name=value&...` string of a record, without the key suffix.
///
/// Useful when diagnosing a signature mismatch against the gateway.
pub fn canonical_string<T: Serialize + ?Sized>(record: &T) -> Result<String> {
    let fields = record_fields(record)?;
    Ok(canonicalize(
        fields.iter().map(|(name, value)| (name.as_str(), value)),
    ))
}

fn record_fields<T: Serialize + ?Sized>(record: &T) -> Result<serde_json::Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(PayJsError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn canonicalize<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut pairs: Vec<(&str, String)> = fields
        .into_iter()
        .filter(|(name, value)| !SIGNATURE_FIELDS.contains(name) && !is_blank(value))
        .map(|(name, value)| (name, plain_string(value)))
        .collect();

    // Byte order, not locale order.
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) => false,
    }
}

fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Merchant configuration shared by every endpoint wrapper.

use crate::errors::{PayJsError, Result};
use crate::signer::Signer;
use std::fmt;
use url::Url;

/// Default gateway API root.
pub const DEFAULT_BASE_URL: &str = "https://payjs.cn/api/";

/// Merchant credentials and defaults.
///
/// Immutable once built; wrappers share it through an `Arc`.
#[derive(Clone)]
pub struct Context {
    /// Merchant id (`mchid`)
    pub mchid: String,

    /// Shared secret used for signing, never exposed
    key: String,

    /// Default asynchronous notification URL
    pub notify_url: Option<String>,

    /// Gateway API root, always ending in `/`
    pub base_url: Url,
}

impl Context {
    /// Creates a new context for a merchant.
    ///
    /// # Arguments
    ///
    /// * `mchid` - The merchant id issued by PayJS
    /// * `key` - The merchant's communication key
    ///
    /// # Examples
    ///
    /// ```
    /// use payjs::context::Context;
    ///
    /// let context = Context::new("1900000001", "testkey")
    ///     .unwrap()
    ///     .with_notify_url("https://shop.example.com/payjs/notify");
    /// assert_eq!(context.mchid, "1900000001");
    /// ```
    pub fn new(mchid: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let mchid = mchid.into();
        let key = key.into();

        if mchid.is_empty() {
            return Err(PayJsError::ConfigError("merchant id must not be empty".to_string()));
        }
        if key.is_empty() {
            return Err(PayJsError::ConfigError("key must not be empty".to_string()));
        }

        Ok(Self {
            mchid,
            key,
            notify_url: None,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
        })
    }

    /// Creates a context from `PAYJS_MCHID`, `PAYJS_KEY`, and the optional
    /// `PAYJS_NOTIFY_URL` and `PAYJS_BASE_URL` environment variables.
    pub fn from_env() -> Result<Self> {
        let mchid = std::env::var("PAYJS_MCHID").map_err(|_| {
            PayJsError::ConfigError("PAYJS_MCHID environment variable is required".to_string())
        })?;
        let key = std::env::var("PAYJS_KEY").map_err(|_| {
            PayJsError::ConfigError("PAYJS_KEY environment variable is required".to_string())
        })?;

        let mut context = Self::new(mchid, key)?;

        if let Ok(notify_url) = std::env::var("PAYJS_NOTIFY_URL") {
            context = context.with_notify_url(notify_url);
        }
        if let Ok(base_url) = std::env::var("PAYJS_BASE_URL") {
            context = context.with_base_url(&base_url)?;
        }

        Ok(context)
    }

    /// Sets the default notification URL.
    pub fn with_notify_url(mut self, notify_url: impl Into<String>) -> Self {
        let notify_url = notify_url.into();
        self.notify_url = if notify_url.is_empty() {
            None
        } else {
            Some(notify_url)
        };
        self
    }

    /// Points the context at another gateway root (a proxy or a test server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = url;
        Ok(self)
    }

    /// Returns a signer bound to this merchant's key.
    pub fn signer(&self) -> Signer {
        Signer::new(self.key.clone())
    }

    /// Resolves an endpoint path against the gateway root.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("mchid", &self.mchid)
            .field("key", &"<redacted>")
            .field("notify_url", &self.notify_url)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

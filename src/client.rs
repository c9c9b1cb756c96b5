//! Entry point tying a merchant [`Context`] to a [`Transport`].
//!
//! [`PayJs`] is cheap to clone and can be shared across tasks: the context is
//! read-only and each call is independent.

use crate::context::Context;
use crate::endpoints::{Facepay, MiniApp, Native, User};
use crate::errors::Result;
use crate::notify::PaymentNotification;
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;

/// PayJS client.
#[derive(Clone)]
pub struct PayJs {
    context: Arc<Context>,
    transport: Arc<dyn Transport>,
}

impl PayJs {
    /// Creates a client that talks to the gateway over HTTPS.
    ///
    /// # Examples
    ///
    /// ```
    /// use payjs::{client::PayJs, context::Context};
    ///
    /// let context = Context::new("1900000001", "testkey").unwrap();
    /// let payjs = PayJs::new(context);
    /// assert_eq!(payjs.context().mchid, "1900000001");
    /// ```
    pub fn new(context: Context) -> Self {
        Self::with_transport(context, HttpTransport::new())
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(context: Context, transport: impl Transport + 'static) -> Self {
        Self {
            context: Arc::new(context),
            transport: Arc::new(transport),
        }
    }

    /// Creates a client from the `PAYJS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Context::from_env()?))
    }

    /// Returns the merchant context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Native (QR code) payments.
    pub fn native(&self) -> Native {
        Native::new(self.context.clone(), self.transport.clone())
    }

    /// Face-recognition payments.
    pub fn facepay(&self) -> Facepay {
        Facepay::new(self.context.clone(), self.transport.clone())
    }

    /// Mini-app order descriptors.
    pub fn mini_app(&self) -> MiniApp {
        MiniApp::new(self.context.clone())
    }

    /// User profile lookups.
    pub fn user(&self) -> User {
        User::new(self.context.clone(), self.transport.clone())
    }

    /// Verifies a form-encoded payment notification.
    pub fn verify_notification<I>(&self, fields: I) -> Result<PaymentNotification>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        PaymentNotification::from_form(&self.context, fields)
    }
}

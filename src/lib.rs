//! # payjs-rs
//!
//! A Rust client for the PayJS payment gateway.
//!
//! Every request is signed with the merchant's key and every response is checked
//! against the signature the gateway attaches to it. A call either returns a fully
//! verified response or an error; nothing unverified ever reaches the caller.
//!
//! ## Features
//!
//! - **Native payments**: QR code payments for desktop checkouts
//! - **Face payments**: charges identified by a face recognition code
//! - **Mini-app orders**: signed order descriptors for a mini-app front-end
//! - **User lookups**: WeChat profile of a paying user
//! - **Notifications**: verification of asynchronous payment callbacks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use payjs::{client::PayJs, context::Context, types::NativeRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let context = Context::new("1900000001", "your-key")?
//!     .with_notify_url("https://shop.example.com/payjs/notify");
//! let payjs = PayJs::new(context);
//!
//! let payment = payjs
//!     .native()
//!     .create_qrcode(NativeRequest::new(100, "ORDER1").with_body("Coffee"))
//!     .await?;
//! println!("Scan: {}", payment.code_url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Signature Algorithm
//!
//! 1. Drop the `sign` field and every blank value (empty string, zero, null)
//! 2. Sort the remaining fields by name, byte-wise
//! 3. Join them as `name=value` with `&`, then append `&key=<merchant key>`
//! 4. MD5 the result and render it as uppercase hex
//!
//! The gateway dictates MD5; [`signer::Signer`] keeps the digest pluggable.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod context;
pub mod endpoints;
pub mod errors;
pub mod notify;
pub mod signer;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use client::PayJs;
pub use context::Context;
pub use errors::{PayJsError, Result};
pub use signer::Signer;
pub use transport::{HttpTransport, Transport};
pub use types::{
    FacepayRequest, FacepayResponse, NativeRequest, NativeResponse, OrderInfo, UserInfo,
    UserInfoResponse,
};

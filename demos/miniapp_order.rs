//! Example mini-app order descriptor.
//!
//! Builds and signs the order a mini-app front-end hands to PayJS. Nothing is
//! sent over the network.
//!
//! Run with:
//! ```bash
//! cargo run --example miniapp_order
//! ```

use payjs::{context::Context, types::OrderInfo, PayJs};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let context = Context::from_env().or_else(|_| {
        println!("⚠️  PAYJS_MCHID / PAYJS_KEY not set, using a demo merchant");
        Context::new("1900000001", "demo-key")
    })?;
    let payjs = PayJs::new(context);

    let order = payjs
        .mini_app()
        .order_info(OrderInfo::new(100, "MINI-DEMO-1").with_body("payjs-rs demo"))?;

    println!("📦 Signed order descriptor:");
    println!("{}", serde_json::to_string_pretty(&order)?);

    Ok(())
}

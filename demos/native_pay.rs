//! Example native (QR code) payment.
//!
//! Run with:
//! ```bash
//! cargo run --example native_pay
//! ```
//!
//! Environment variables (a `.env` file works too):
//! - PAYJS_MCHID: Your merchant id
//! - PAYJS_KEY: Your merchant key
//! - PAYJS_NOTIFY_URL: Where PayJS posts the payment result (optional)
//! - ORDER_FEE: Amount in fen (defaults to 1)

use payjs::{types::NativeRequest, PayJs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let payjs = PayJs::from_env()?;

    let total_fee: u64 = std::env::var("ORDER_FEE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let out_trade_no = format!("DEMO{}", payjs::utils::generate_nonce());

    println!("🧾 PayJS native payment");
    println!("   Merchant: {}", payjs.context().mchid);
    println!("   Order:    {}", out_trade_no);
    println!("   Amount:   {} fen", total_fee);
    println!();

    let request = NativeRequest::new(total_fee, &out_trade_no).with_body("payjs-rs demo");

    match payjs.native().create_qrcode(request).await {
        Ok(payment) => {
            println!("✅ Verified response");
            println!("   PayJS order: {}", payment.payjs_order_id);
            println!("   QR image:    {}", payment.qrcode);
            println!("   Code URL:    {}", payment.code_url);
        }
        Err(e) => {
            println!("❌ Payment request failed: {}", e);
        }
    }

    Ok(())
}

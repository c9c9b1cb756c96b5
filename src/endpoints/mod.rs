//! Gateway endpoint wrappers.
//!
//! Every networked endpoint runs the same sequence: sign the request, POST it,
//! decode the response, check `return_code`, then verify the response signature.
//! Nothing is retried and nothing is returned unless every step succeeds.

pub mod facepay;
pub mod miniapp;
pub mod native;
pub mod user;

pub use facepay::Facepay;
pub use miniapp::MiniApp;
pub use native::Native;
pub use user::User;

use crate::context::Context;
use crate::errors::{PayJsError, Result};
use crate::transport::Transport;
use crate::types::{GatewayResponse, SignedRequest};

/// Gateway endpoints reached over the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Native (QR code) payment
    Native,
    /// Face-recognition payment
    Facepay,
    /// User info lookup
    User,
}

impl Endpoint {
    /// Path relative to the gateway root.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Native => "native",
            Endpoint::Facepay => "facepay",
            Endpoint::User => "user",
        }
    }
}

/// Signs `request` in place.
pub(crate) fn sign_request<Req: SignedRequest>(context: &Context, request: &mut Req) -> Result<()> {
    let sign = context.signer().sign(&*request)?;
    request.set_sign(sign);
    Ok(())
}

/// Runs one signed round trip against `endpoint`.
pub(crate) async fn execute<Req, Resp>(
    context: &Context,
    transport: &dyn Transport,
    endpoint: Endpoint,
    mut request: Req,
) -> Result<Resp>
where
    Req: SignedRequest,
    Resp: GatewayResponse,
{
    sign_request(context, &mut request)?;

    let url = context.endpoint_url(endpoint.path())?;
    let payload = serde_json::to_value(&request)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        endpoint = endpoint.path(),
        out_trade_no = request.out_trade_no().unwrap_or_default(),
        "sending signed request"
    );

    let body = transport.post_json(url.as_str(), &payload).await?;
    let response: Resp = serde_json::from_slice(&body)?;

    if !response.is_success() {
        return Err(PayJsError::GatewayError {
            return_code: response.return_code(),
            status: response.status(),
            message: response.message().to_string(),
        });
    }

    if !context.signer().verify(&response, response.sign())? {
        return Err(PayJsError::IntegrityError);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(endpoint = endpoint.path(), "response verified");

    Ok(response)
}

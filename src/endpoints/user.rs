//! User profile lookup by openid.

use super::{execute, Endpoint};
use crate::context::Context;
use crate::errors::Result;
use crate::transport::Transport;
use crate::types::{UserInfo, UserInfoRequest, UserInfoResponse};
use std::sync::Arc;

/// Looks up the WeChat profile of a user who has paid through PayJS.
#[derive(Clone)]
pub struct User {
    context: Arc<Context>,
    transport: Arc<dyn Transport>,
}

impl User {
    /// Creates the wrapper over a shared context and transport.
    pub fn new(context: Arc<Context>, transport: Arc<dyn Transport>) -> Self {
        Self { context, transport }
    }

    /// Returns the verified lookup response; `user` is still JSON-encoded.
    pub async fn get_user_info(&self, openid: impl Into<String>) -> Result<UserInfoResponse> {
        let request = UserInfoRequest {
            mchid: self.context.mchid.clone(),
            openid: openid.into(),
            sign: String::new(),
        };
        execute(&self.context, self.transport.as_ref(), Endpoint::User, request).await
    }

    /// Looks up and decodes the user profile.
    pub async fn get_user_profile(&self, openid: impl Into<String>) -> Result<UserInfo> {
        self.get_user_info(openid).await?.user_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_user_profile() {
        let user = json!({
            "subscribe": 1,
            "openid": "o7LFAwUGxxxx",
            "nickname": "Alice",
            "sex": 2,
            "city": "Hangzhou",
            "tagid_list": [],
        })
        .to_string();
        let transport = Arc::new(RecordingTransport::replying(&signed(json!({
            "return_code": 1,
            "return_msg": "SUCCESS",
            "user": user,
        }))));
        let lookup = User::new(Arc::new(context()), transport.clone());

        let profile = lookup.get_user_profile("o7LFAwUGxxxx").await.unwrap();
        assert_eq!(profile.nickname, "Alice");
        assert_eq!(profile.city, "Hangzhou");
        assert_eq!(profile.tagid_list, "[]");

        let (url, payload) = transport.last_call();
        assert_eq!(url, "https://payjs.cn/api/user");
        assert_eq!(payload["openid"], "o7LFAwUGxxxx");
    }

    #[tokio::test]
    async fn test_get_user_info_failure() {
        let transport = Arc::new(RecordingTransport::replying(&json!({
            "return_code": 0,
            "return_msg": "openid has no payment record",
        })));
        let lookup = User::new(Arc::new(context()), transport);

        let err = lookup.get_user_info("unknown").await.unwrap_err();
        assert!(err.to_string().contains("openid has no payment record"));
    }
}

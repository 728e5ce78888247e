//! Platform client implementation.

use platform_core::{
    async_trait, CallPlatform, ChannelMessage, ChatPlatform, ChatUser, PlatformError,
    RealtimeSession,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::StreamConfig;
use crate::signature::verify_signature;
use crate::token::create_user_token;

/// Platform calls are created under a single call type.
const CALL_TYPE: &str = "default";
/// Post-meeting Q&A channels live under this channel type.
const CHANNEL_TYPE: &str = "messaging";

/// HTTP client for the video/chat platform.
pub struct StreamClient {
    client: Client,
    config: StreamConfig,
    /// Server-side token sent on every request.
    server_token: String,
}

impl StreamClient {
    /// Create a new client with the given configuration.
    pub fn new(config: StreamConfig) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PlatformError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let server_token = create_user_token(&config.api_secret, "server")?;

        info!(base_url = %config.base_url, "StreamClient initialized");

        Ok(Self {
            client,
            config,
            server_token,
        })
    }

    /// Create a client from environment variables.
    ///
    /// See [`StreamConfig::from_env`] for the variable list.
    pub fn from_env() -> Result<Self, PlatformError> {
        Self::new(StreamConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}?api_key={}",
            self.config.base_url, path, self.config.api_key
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", &self.server_token)
            .header("stream-auth-type", "jwt")
    }

    async fn check(&self, response: Response) -> Result<Response, PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PlatformError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Response, PlatformError> {
        let response = self
            .authorized(self.client.post(self.url(path)).json(body))
            .send()
            .await
            .map_err(|e| PlatformError::Http(e.to_string()))?;
        self.check(response).await
    }
}

#[async_trait]
impl CallPlatform for StreamClient {
    fn verify_webhook(&self, body: &[u8], signature: &str) -> bool {
        verify_signature(&self.config.api_secret, body, signature)
    }

    async fn end_call(&self, call_id: &str) -> Result<(), PlatformError> {
        debug!(call_id = %call_id, "Ending call");
        self.post_json(
            &format!("/video/call/{CALL_TYPE}/{call_id}/mark_ended"),
            &serde_json::json!({}),
        )
        .await?;
        Ok(())
    }

    async fn connect_agent(
        &self,
        call_id: &str,
        agent_user_id: &str,
    ) -> Result<Box<dyn RealtimeSession>, PlatformError> {
        info!(call_id = %call_id, agent_user_id = %agent_user_id, "Connecting AI agent to call");
        self.post_json(
            &format!("/video/call/{CALL_TYPE}/{call_id}/agents"),
            &serde_json::json!({ "agent_user_id": agent_user_id }),
        )
        .await?;

        Ok(Box::new(StreamRealtimeSession {
            client: self.client.clone(),
            url: self.url(&format!(
                "/video/call/{CALL_TYPE}/{call_id}/agents/{agent_user_id}"
            )),
            server_token: self.server_token.clone(),
        }))
    }

    async fn upsert_users(&self, users: &[ChatUser]) -> Result<(), PlatformError> {
        let mut map = serde_json::Map::new();
        for user in users {
            map.insert(
                user.id.clone(),
                serde_json::json!({ "id": user.id, "name": user.name, "role": "user" }),
            );
        }
        self.post_json("/users", &serde_json::json!({ "users": map }))
            .await?;
        Ok(())
    }

    async fn create_token(&self, user_id: &str) -> Result<String, PlatformError> {
        create_user_token(&self.config.api_secret, user_id)
    }
}

/// Live AI session handle returned by [`CallPlatform::connect_agent`].
struct StreamRealtimeSession {
    client: Client,
    url: String,
    server_token: String,
}

#[async_trait]
impl RealtimeSession for StreamRealtimeSession {
    async fn update_instructions(&self, instructions: &str) -> Result<(), PlatformError> {
        let response = self
            .client
            .patch(&self.url)
            .header("Authorization", &self.server_token)
            .header("stream-auth-type", "jwt")
            .json(&serde_json::json!({ "instructions": instructions }))
            .send()
            .await
            .map_err(|e| PlatformError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ChannelMessagesResponse {
    #[serde(default)]
    messages: Vec<ChannelMessageBody>,
}

#[derive(Debug, Deserialize)]
struct ChannelMessageBody {
    #[serde(default)]
    user: Option<MessageUser>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageUser {
    id: String,
}

#[async_trait]
impl ChatPlatform for StreamClient {
    async fn upsert_user(&self, user: &ChatUser) -> Result<(), PlatformError> {
        CallPlatform::upsert_users(self, std::slice::from_ref(user)).await
    }

    async fn recent_messages(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<ChannelMessage>, PlatformError> {
        let url = format!(
            "{}&limit={limit}",
            self.url(&format!("/channels/{CHANNEL_TYPE}/{channel_id}/messages"))
        );
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| PlatformError::Http(e.to_string()))?;
        let response = self.check(response).await?;

        let body: ChannelMessagesResponse = response
            .json()
            .await
            .map_err(|e| PlatformError::Http(format!("invalid channel body: {}", e)))?;

        Ok(body
            .messages
            .into_iter()
            .map(|m| ChannelMessage {
                sender_id: m.user.map(|u| u.id).unwrap_or_default(),
                text: m.text.unwrap_or_default(),
            })
            .collect())
    }

    async fn send_message(
        &self,
        channel_id: &str,
        text: &str,
        as_user: &ChatUser,
    ) -> Result<(), PlatformError> {
        debug!(channel_id = %channel_id, sender = %as_user.id, "Posting channel message");
        self.post_json(
            &format!("/channels/{CHANNEL_TYPE}/{channel_id}/message"),
            &serde_json::json!({
                "message": { "text": text, "user_id": as_user.id }
            }),
        )
        .await?;
        Ok(())
    }

    async fn create_token(&self, user_id: &str) -> Result<String, PlatformError> {
        create_user_token(&self.config.api_secret, user_id)
    }
}

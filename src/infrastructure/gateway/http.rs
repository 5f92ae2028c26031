#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Gateway;
use crate::domain::models::Message;
use crate::domain::models::TrainingProgram;
use crate::domain::services::CredentialStore;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SendMessageRequest {
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SendMessageResponse {
    content: Option<String>,
}

/// Talks to the assistant service over HTTP. The bearer token is looked up for every
/// request, so a login from another process is picked up without restarting.
pub struct HttpGateway {
    url: String,
    token: String,
    credentials: CredentialStore,
    client: reqwest::Client,
}

impl Default for HttpGateway {
    fn default() -> HttpGateway {
        return HttpGateway::new(
            Config::get(ConfigKey::ApiBaseURL),
            Config::get(ConfigKey::AuthToken),
            CredentialStore::default(),
        );
    }
}

impl HttpGateway {
    pub fn new(url: String, token: String, credentials: CredentialStore) -> HttpGateway {
        return HttpGateway {
            url,
            token,
            credentials,
            client: reqwest::Client::new(),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{}{path}", self.url.trim_end_matches('/'));
    }

    async fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        if !self.token.is_empty() {
            return Ok(req.bearer_auth(&self.token));
        }

        if let Some(token) = self.credentials.token().await? {
            return Ok(req.bearer_auth(token));
        }

        tracing::debug!("No auth token available, sending request anonymously");
        return Ok(req);
    }

    async fn send(&self, req: RequestBuilder, name: &str) -> Result<Response> {
        let res = self.authorize(req).await?.send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                request = name,
                "Assistant gateway request failed"
            );
            bail!(format!(
                "Assistant gateway request {name} failed with status {}",
                res.status()
            ));
        }

        return Ok(res);
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[allow(clippy::implicit_return)]
    async fn ensure_thread(&self) -> Result<()> {
        let req = self.client.get(self.endpoint("/assistant/threads"));
        self.send(req, "threads").await?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_messages(&self, page: usize) -> Result<Vec<Message>> {
        let mut req = self.client.get(self.endpoint("/assistant/messages"));
        if page > 1 {
            req = req.query(&[("page", page)]);
        }

        let body = self.send(req, "messages").await?.text().await?;
        if body.trim().is_empty() {
            return Ok(vec![]);
        }

        let value: Value = serde_json::from_str(&body)?;
        if !value.is_array() {
            tracing::debug!(body = ?value, "Message history was not a list");
            return Ok(vec![]);
        }

        let messages: Vec<Message> = serde_json::from_value(value)?;
        tracing::debug!(page, count = messages.len(), "Message history response");

        return Ok(messages);
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, content: &str) -> Result<String> {
        let req = self
            .client
            .post(self.endpoint("/assistant/message"))
            .json(&SendMessageRequest {
                content: content.to_string(),
            });

        let res = self
            .send(req, "message")
            .await?
            .json::<SendMessageResponse>()
            .await?;

        match res.content {
            Some(text) if !text.is_empty() => return Ok(text),
            _ => bail!("Assistant reply had no content"),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn training_program(&self) -> Result<Option<TrainingProgram>> {
        let req = self
            .client
            .get(self.endpoint("/assistant/user_train_program"));
        let body = self.send(req, "user_train_program").await?.text().await?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        let program: TrainingProgram = serde_json::from_str(trimmed)?;
        return Ok(Some(program));
    }
}

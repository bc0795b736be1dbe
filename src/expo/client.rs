// Expo push HTTP client.
//
// Two endpoints: POST /--/api/v2/push/send (notifications in, tickets
// out) and POST /--/api/v2/push/getReceipts (receipt ids in, receipts
// out). Both wrap their payload in a {"data": ...} envelope.
//
// API docs: https://docs.expo.dev/push-notifications/sending-notifications/

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::PushGateway;
use super::types::{PushMessage, PushReceipt, PushTicket};

/// Default Expo push service endpoint.
pub const DEFAULT_EXPO_URL: &str = "https://exp.host";

/// HTTP client for the Expo push service.
pub struct ExpoPushClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExpoPushClient {
    /// Create a new push client pointing at the given base URL.
    ///
    /// Defaults to `https://exp.host` — pass a different URL for testing.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("recd-server/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body to a push API path and unwrap the data envelope.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        debug!(path = path, "Expo push API request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Push API request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Push API {path} returned {status}: {body}");
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl PushGateway for ExpoPushClient {
    async fn send_notifications(&self, chunk: &[PushMessage]) -> Result<Vec<PushTicket>> {
        self.post_json("/--/api/v2/push/send", chunk).await
    }

    async fn get_receipts(&self, receipt_ids: &[String]) -> Result<HashMap<String, PushReceipt>> {
        let request = ReceiptRequest { ids: receipt_ids };
        self.post_json("/--/api/v2/push/getReceipts", &request).await
    }
}

// -- Serde types for the push API --

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Serialize)]
struct ReceiptRequest<'a> {
    ids: &'a [String],
}

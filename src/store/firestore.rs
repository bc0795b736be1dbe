// Firestore REST backend for the user store.
//
// Reads documents at users/{uid} and extracts the pushTokens array.
// Firestore's REST representation wraps every value in a typed envelope
// ({"stringValue": ...}, {"arrayValue": ...}); the serde types below
// model just the slice of that format we consume.
//
// API docs: https://firebase.google.com/docs/firestore/use-rest-api

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::traits::UserStore;

/// Default Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

/// Firestore-backed user store.
pub struct FirestoreUserStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
}

impl FirestoreUserStore {
    /// Create a new store for the given project.
    ///
    /// `base_url` defaults to `https://firestore.googleapis.com` — pass
    /// a different URL for testing or the Firestore emulator.
    pub fn new(base_url: &str, project_id: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("recd-server/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
        })
    }
}

#[async_trait]
impl UserStore for FirestoreUserStore {
    async fn push_tokens(&self, uid: &str) -> Result<Option<Vec<String>>> {
        let url = format!(
            "{}/v1/projects/{}/databases/(default)/documents/users/{uid}",
            self.base_url, self.project_id
        );

        debug!(uid = uid, "Fetching user document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("User document request failed for {uid}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Firestore returned {status} for users/{uid}: {body}");
        }

        let document: UserDocument = response
            .json()
            .await
            .with_context(|| format!("Failed to parse user document for {uid}"))?;

        let tokens = document
            .fields
            .and_then(|f| f.push_tokens)
            .map(|array| {
                array
                    .array_value
                    .values
                    .into_iter()
                    .filter_map(|v| v.string_value)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(tokens))
    }
}

// -- Serde types for Firestore's document representation --

#[derive(Deserialize)]
struct UserDocument {
    #[serde(default)]
    fields: Option<UserFields>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserFields {
    #[serde(default)]
    push_tokens: Option<ArrayField>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArrayField {
    array_value: ArrayValue,
}

#[derive(Deserialize)]
struct ArrayValue {
    #[serde(default)]
    values: Vec<TokenValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenValue {
    #[serde(default)]
    string_value: Option<String>,
}

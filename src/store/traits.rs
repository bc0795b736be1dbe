use anyhow::Result;
use async_trait::async_trait;

/// Read access to user documents.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the stored push tokens for a user.
    ///
    /// Returns `Ok(None)` when the user document does not exist — a
    /// normal condition (the recipient may never have signed in on a
    /// device), not an error.
    async fn push_tokens(&self, uid: &str) -> Result<Option<Vec<String>>>;
}

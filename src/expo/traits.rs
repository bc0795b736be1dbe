// Push gateway trait — the swap-ready abstraction.
//
// Production uses ExpoPushClient; tests substitute recording mocks and
// shrink the chunk sizes to exercise batching without hundreds of tokens.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use super::types::{PushMessage, PushReceipt, PushTicket, PUSH_CHUNK_LIMIT, RECEIPT_CHUNK_LIMIT};

/// Interface to a push delivery service. Implementations must be async
/// because delivery always involves HTTP calls.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Maximum notifications accepted per send request.
    fn push_chunk_size(&self) -> usize {
        PUSH_CHUNK_LIMIT
    }

    /// Maximum receipt ids accepted per receipt query.
    fn receipt_chunk_size(&self) -> usize {
        RECEIPT_CHUNK_LIMIT
    }

    /// Submit one chunk of notifications, returning one ticket per
    /// message in the same order.
    async fn send_notifications(&self, chunk: &[PushMessage]) -> Result<Vec<PushTicket>>;

    /// Fetch delivery receipts for one chunk of receipt ids.
    ///
    /// Ids whose receipts don't exist yet (or have expired) are simply
    /// absent from the returned map.
    async fn get_receipts(&self, receipt_ids: &[String]) -> Result<HashMap<String, PushReceipt>>;
}

// Wire types for the Expo push API, plus the batching and token-format
// rules the Expo server SDK publishes.
//
// Ticket/receipt shapes follow the push API response format:
// a ticket acknowledges enqueueing one notification and carries a receipt
// id on success; the receipt, fetched later, carries the delivery outcome.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Maximum notifications per send request.
pub const PUSH_CHUNK_LIMIT: usize = 100;

/// Maximum receipt ids per getReceipts request.
pub const RECEIPT_CHUNK_LIMIT: usize = 300;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

/// Format-conformance check for Expo push tokens.
///
/// Valid tokens look like `ExponentPushToken[xxxxxxxx]` (or the older
/// `ExpoPushToken[...]` form). This only checks shape — a well-formed
/// token can still belong to an uninstalled app, which surfaces later
/// as a receipt error.
pub fn is_expo_push_token(token: &str) -> bool {
    let re = TOKEN_RE.get_or_init(|| {
        Regex::new(r"^Expo(nent)?PushToken\[[^\]]+\]$").expect("token pattern is valid")
    });
    re.is_match(token)
}

/// Split `items` into ordered chunks of at most `size` elements.
///
/// Order is preserved: concatenating the chunks yields the input.
pub fn chunked<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(size).collect());
    }
    chunks
}

/// One notification to be delivered to one device.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    /// The destination push token.
    pub to: String,
    pub sound: PushSound,
    pub body: String,
    pub data: MessageData,
}

impl PushMessage {
    pub fn new(to: String, body: String) -> Self {
        Self {
            to,
            sound: PushSound::Default,
            body,
            data: MessageData::default(),
        }
    }
}

/// Notification sound. Only the platform default is used.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushSound {
    Default,
}

/// Auxiliary payload attached to every notification.
///
/// A closed struct rather than an open map so the wire contract stays
/// checkable; serializes as `{"withSome":"data"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub with_some: String,
}

impl Default for MessageData {
    fn default() -> Self {
        Self {
            with_some: "data".to_string(),
        }
    }
}

/// Shared status discriminant for tickets and receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Ok,
    Error,
}

/// Acknowledgment for one submitted notification.
///
/// `id` is the receipt id, present only when the notification was
/// enqueued; tickets for notifications that could not be enqueued carry
/// error information and no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTicket {
    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// Delivery outcome for one notification, keyed by receipt id.
///
/// Receipts become available once the push service has handed the
/// notification to Apple or Google — usually quickly, up to ~30 minutes
/// under load — and expire server-side after about a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushReceipt {
    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// Error detail payload on failed tickets and receipts.
/// `error` holds the service's error code (e.g. "DeviceNotRegistered").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

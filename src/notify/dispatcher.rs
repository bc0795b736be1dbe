// Notification dispatch — the send half of the pipeline.
//
// Tokens are validated and turned into push messages, chunked to the
// gateway's batch limit, and submitted one chunk at a time. Sending one
// chunk at a time spreads the load out rather than maximizing
// throughput. A failed chunk costs only its own tickets; the rest of the
// batch still goes out.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::expo::traits::PushGateway;
use crate::expo::types::{chunked, is_expo_push_token, PushMessage, PushTicket};
use crate::notify::receipts;

/// Derive the notification body from the sender name and optional message.
///
/// An absent or empty message means the sender shared a recommendation
/// without commentary.
pub fn notification_body(sender: &str, message: Option<&str>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!("{sender}: {m}"),
        _ => format!("{sender} sent you a recommendation"),
    }
}

/// Build one push message per valid token, preserving token order.
///
/// Tokens that fail the format check are logged and skipped — a bad
/// token never aborts the batch.
pub fn build_messages(sender: &str, message: Option<&str>, tokens: &[String]) -> Vec<PushMessage> {
    let mut messages = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !is_expo_push_token(token) {
            error!(token = token.as_str(), "Push token is not a valid Expo push token");
            continue;
        }
        messages.push(PushMessage::new(
            token.clone(),
            notification_body(sender, message),
        ));
    }
    messages
}

/// Submit messages in gateway-sized chunks, sequentially, and collect
/// the returned tickets in submission order.
///
/// A chunk that fails to submit is logged and skipped; later chunks are
/// still sent. Partial success is expected and acceptable.
pub async fn send_in_chunks(gateway: &dyn PushGateway, messages: Vec<PushMessage>) -> Vec<PushTicket> {
    let mut tickets = Vec::with_capacity(messages.len());
    for chunk in chunked(messages, gateway.push_chunk_size()) {
        let chunk_len = chunk.len();
        match gateway.send_notifications(&chunk).await {
            Ok(mut chunk_tickets) => {
                debug!(count = chunk_tickets.len(), "Notification chunk accepted");
                tickets.append(&mut chunk_tickets);
            }
            Err(e) => {
                error!(error = %e, count = chunk_len, "Failed to submit notification chunk");
            }
        }
    }
    tickets
}

/// Dispatch a recommendation notification to a set of device tokens.
///
/// Fire-and-forget: outcomes are logged, tickets are handed to the
/// receipt reconciler as a detached task, and nothing is reported back
/// to the caller.
pub async fn dispatch(
    gateway: Arc<dyn PushGateway>,
    sender: &str,
    message: Option<&str>,
    tokens: &[String],
) {
    let messages = build_messages(sender, message, tokens);
    if messages.is_empty() {
        debug!(tokens = tokens.len(), "No valid push tokens, nothing to send");
        return;
    }

    info!(
        recipients = messages.len(),
        skipped = tokens.len() - messages.len(),
        "Dispatching push notifications"
    );

    let tickets = send_in_chunks(gateway.as_ref(), messages).await;
    if tickets.is_empty() {
        return;
    }

    // Reconciliation runs as an independent continuation: its failure is
    // invisible to the dispatcher and to the triggering event.
    tokio::spawn(async move {
        receipts::reconcile(gateway.as_ref(), &tickets).await;
    });
}

/// Launch `dispatch` as a detached background task.
///
/// Returns immediately; the event handler never waits on delivery.
pub fn launch_dispatch(
    gateway: Arc<dyn PushGateway>,
    sender: String,
    message: Option<String>,
    tokens: Vec<String>,
) {
    tokio::spawn(async move {
        dispatch(gateway, &sender, message.as_deref(), &tokens).await;
    });
}

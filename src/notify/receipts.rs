// Receipt reconciliation — the feedback half of the pipeline.
//
// Sending a notification produces a ticket; the ticket's id is a receipt
// id used to fetch the delivery outcome later. Receipts may carry error
// codes from Apple or Google (blocked notifications, uninstalled apps)
// that a sender is expected to act on.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::expo::traits::PushGateway;
use crate::expo::types::{chunked, DeliveryStatus, PushReceipt, PushTicket};

/// Extract the receipt ids from a set of tickets.
///
/// Tickets without an id represent notifications that could not be
/// enqueued — their error is already known from the ticket itself, so
/// they are excluded from reconciliation.
pub fn collect_receipt_ids(tickets: &[PushTicket]) -> Vec<String> {
    tickets
        .iter()
        .filter_map(|t| t.id.clone())
        .filter(|id| !id.is_empty())
        .collect()
}

/// Fetch delivery receipts for the given tickets and log every
/// per-notification delivery error.
///
/// Receipt ids are chunked to the gateway's query limit and fetched
/// sequentially; a failed fetch is logged and does not abort the
/// remaining chunks.
pub async fn reconcile(gateway: &dyn PushGateway, tickets: &[PushTicket]) {
    let receipt_ids = collect_receipt_ids(tickets);
    if receipt_ids.is_empty() {
        return;
    }

    debug!(receipts = receipt_ids.len(), "Reconciling delivery receipts");

    for chunk in chunked(receipt_ids, gateway.receipt_chunk_size()) {
        match gateway.get_receipts(&chunk).await {
            Ok(receipts) => inspect_receipts(&receipts),
            Err(e) => {
                error!(error = %e, count = chunk.len(), "Failed to fetch receipt chunk");
            }
        }
    }
}

/// Log the outcome of each receipt. `ok` receipts need no action.
fn inspect_receipts(receipts: &HashMap<String, PushReceipt>) {
    for (receipt_id, receipt) in receipts {
        if receipt.status == DeliveryStatus::Ok {
            continue;
        }

        error!(
            receipt_id = receipt_id.as_str(),
            message = receipt.message.as_deref().unwrap_or("unknown"),
            "There was an error delivering a notification"
        );

        if let Some(code) = receipt.details.as_ref().and_then(|d| d.error.as_deref()) {
            // Extension point: a "DeviceNotRegistered" code here is where
            // token cleanup would hook in. We currently only report it.
            error!(
                receipt_id = receipt_id.as_str(),
                code = code,
                "Delivery error code"
            );
        }
    }
}

// POST /events/user_recds/{uid}/recd_items/{rid} — recd-item creation
// webhook, the entry point of the notification pipeline.
//
// Fires when a recommendation lands in a user's inbox subtree. Looks up
// the recipient's push tokens and launches the dispatch as a background
// task. This endpoint never fails the trigger: a missing user is a
// silent no-op and a lookup error is logged, both answered with 204.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::notify::dispatcher::launch_dispatch;
use crate::web::AppState;

/// Fields consumed from the created recd-item document.
#[derive(Debug, Deserialize)]
pub struct RecdItem {
    /// Optional note the sender attached to the recommendation.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "senderDisplayName")]
    pub sender_display_name: String,
}

pub async fn recd_item_created(
    State(state): State<AppState>,
    Path((uid, rid)): Path<(String, String)>,
    Json(item): Json<RecdItem>,
) -> Response {
    info!(
        uid = uid.as_str(),
        rid = rid.as_str(),
        sender = item.sender_display_name.as_str(),
        "Recd item created"
    );

    let tokens = match state.store.push_tokens(&uid).await {
        Ok(Some(tokens)) => tokens,
        Ok(None) => {
            debug!(uid = uid.as_str(), "No user document, skipping notification");
            return StatusCode::NO_CONTENT.into_response();
        }
        Err(e) => {
            error!(error = %e, uid = uid.as_str(), "Push token lookup failed");
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    launch_dispatch(
        state.gateway.clone(),
        item.sender_display_name,
        item.message,
        tokens,
    );

    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "message": "Notification dispatch started" })),
    )
        .into_response()
}

//! HTTP handlers for the contact workflows.

use super::AppState;
use crate::domain::ContactId;
use crate::error::{ApiError, ApiResult, StoreError};
use crate::models::{Contact, EditContactView, SaveContactRequest};
use crate::observability::MetricsSnapshot;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

const INDEX_HTML: &str = include_str!("index.html");

/// `GET /`: page shell that lists contacts and re-fetches on every `Update`.
pub async fn index() -> Html<&'static str> {
    info!(at = %Utc::now().format("%H:%M:%S"), "Index page visited");
    Html(INDEX_HTML)
}

/// `GET /contacts`: every contact, ordered by first name.
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<Vec<Contact>>> {
    Ok(Json(state.service.list_contacts().await?))
}

/// `GET /contacts/new`: blank edit form.
pub async fn new_contact(State(state): State<AppState>) -> Json<EditContactView> {
    Json(state.service.new_contact())
}

/// `GET /contacts/{id}`: edit form for an existing contact.
pub async fn edit_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EditContactView>> {
    // An unparseable id cannot name a contact
    let id = id
        .parse::<ContactId>()
        .map_err(|_| ApiError::NotFound(format!("Contact {} not found", id)))?;

    Ok(Json(state.service.edit_contact(id).await?))
}

/// `POST /contacts`: create or replace a contact.
pub async fn save_contact(
    State(state): State<AppState>,
    Json(request): Json<SaveContactRequest>,
) -> ApiResult<Json<Contact>> {
    Ok(Json(state.service.save_contact(request).await?))
}

/// `DELETE /contacts/{id}`: delete a contact.
///
/// Deleting a contact that does not exist is a bad request, not a 404.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = id
        .parse::<ContactId>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    match state.service.delete_contact(id).await {
        Ok(_) => Ok(StatusCode::OK),
        Err(StoreError::NotFound(id)) => {
            Err(ApiError::BadRequest(format!("No contact with id {}", id)))
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /health`: liveness plus the number of connected hub clients.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "connected_clients": state.notifier.connected(),
    }))
}

/// `GET /metrics`: notifier and mutation counters.
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

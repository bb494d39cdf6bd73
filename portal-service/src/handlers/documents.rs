use crate::dtos::ShareLinkResponse;
use crate::models::ServiceDocumentView;
use crate::services::{assemble, record_document_served, record_error, PortalError};
use crate::startup::AppState;
use crate::utils::share_url;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

/// Looks a record up by sharing token and assembles its view.
///
/// `channel` labels the lookup in metrics. The token itself is never logged.
pub(crate) async fn load_document(
    state: &AppState,
    token: &str,
    channel: &'static str,
) -> Result<ServiceDocumentView, PortalError> {
    let token = token.trim();
    if token.is_empty() {
        record_document_served(channel, "invalid");
        return Err(PortalError::InvalidToken);
    }

    match state.store.find_by_sharing_token(token).await {
        Ok(Some(record)) => {
            tracing::info!(document_id = %record.id, channel, "Service document served");
            record_document_served(channel, "ok");
            Ok(assemble(&record))
        }
        Ok(None) => {
            tracing::info!(channel, "No service document for token");
            record_document_served(channel, "not_found");
            Err(PortalError::DocumentNotFound)
        }
        Err(e) => {
            tracing::error!(error = %e, channel, "Error fetching service document");
            record_document_served(channel, "error");
            record_error(e.kind());
            Err(e)
        }
    }
}

pub async fn get_service_document(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ServiceDocumentView>, AppError> {
    let view = load_document(&state, &token, "api").await?;
    Ok(Json(view))
}

/// Public link for a record. The record must exist.
pub async fn get_share_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ShareLinkResponse>, AppError> {
    load_document(&state, &token, "share_link").await?;

    Ok(Json(ShareLinkResponse {
        url: share_url(&state.config.sharing.public_base_url, token.trim()),
    }))
}

//! Document routes

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::RequireAuth;
use super::types::{ReplaceResponse, ReplacementRequest, UploadResponse};

/// POST /documents/upload
async fn upload_document(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut uploaded = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        uploaded = Some((filename, data));
        break;
    }

    let (filename, data) =
        uploaded.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;

    // Extension check only; content is not sniffed. The filename is
    // never used as a path component, only echoed back as metadata.
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::BadRequest(
            "Only PDF files are accepted".to_string(),
        ));
    }

    let document_id = state.documents.put(data).await?;

    info!("User {} uploaded document {}", user.username, document_id);

    Ok(Json(UploadResponse {
        document_id,
        filename,
        uploaded_by: user.username,
    }))
}

/// POST /documents/{id}/replace
async fn replace_text(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(document_id): Path<String>,
    Json(request): Json<ReplacementRequest>,
) -> Result<Json<ReplaceResponse>, ApiError> {
    if !state.documents.exists(&document_id).await? {
        return Err(ApiError::NotFound(format!(
            "Document not found: {}",
            document_id
        )));
    }

    // Content-stream rewriting is not implemented; the mappings are
    // validated against an existing document and echoed back, and the
    // stored bytes are left untouched.
    debug!(
        "User {} requested {} replacement(s) on document {}",
        user.username,
        request.mappings.len(),
        document_id
    );

    Ok(Json(ReplaceResponse {
        status: "accepted".to_string(),
        mappings: request.mappings,
        applied_by: user.username,
    }))
}

/// GET /documents/{id}/download
async fn download_document(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(document_id): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.documents.get(&document_id).await?;

    debug!("User {} downloaded document {}", user.username, document_id);

    let disposition = format!("attachment; filename=\"{}.pdf\"", document_id);

    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).unwrap(),
    );

    Ok(response)
}

/// Create document routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents/upload", post(upload_document))
        .route("/documents/{id}/replace", post(replace_text))
        .route("/documents/{id}/download", get(download_document))
}

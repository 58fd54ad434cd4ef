//! Request/Response DTOs

use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Registration request (form-encoded)
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login request (form-encoded)
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Plain message response
#[derive(Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

/// Token issuance response
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// ==================== Document Types ====================

/// Upload response
#[derive(Serialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub filename: String,
    pub uploaded_by: String,
}

/// A single text replacement mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementMapping {
    pub original_text: String,
    pub replacement_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_hints: Option<Vec<u32>>,
}

/// Replacement request
#[derive(Deserialize)]
pub struct ReplacementRequest {
    pub mappings: Vec<ReplacementMapping>,
}

/// Replacement response, echoing the accepted mappings
#[derive(Serialize)]
pub struct ReplaceResponse {
    pub status: String,
    pub mappings: Vec<ReplacementMapping>,
    pub applied_by: String,
}

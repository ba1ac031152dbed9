//! Thin proxy to the spreadsheet backend.
//!
//! Mirrors the remote action dispatch so the dashboard can talk to one
//! origin; replies are passed through verbatim.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SheetQuery {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, rename = "sheetName")]
    pub sheet_name: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// GET /api/sheets - action-discriminated pass-through.
///
/// `decodeHash` and `getFormTemplate` forward their parameters; any other
/// request is a roster fetch and requires `sheetName`.
pub async fn sheets_get(
    State(state): State<AppState>,
    Query(query): Query<SheetQuery>,
) -> Result<Json<Value>, AppError> {
    match query.action.as_deref() {
        Some("decodeHash") => {
            let hash = query
                .hash
                .ok_or_else(|| AppError::Validation("hash required".to_string()))?;
            let data = state
                .gateway
                .forward_get(&[("action", "decodeHash"), ("hash", &hash)])
                .await?;
            Ok(Json(data))
        }
        Some("getFormTemplate") => {
            let company = query
                .company
                .ok_or_else(|| AppError::Validation("company required".to_string()))?;
            let data = state
                .gateway
                .forward_get(&[("action", "getFormTemplate"), ("company", &company)])
                .await?;
            Ok(Json(data))
        }
        _ => {
            let sheet_name = query
                .sheet_name
                .ok_or_else(|| AppError::Validation("sheetName required".to_string()))?;
            let data = state
                .gateway
                .forward_get(&[("action", "getStudents"), ("sheetName", &sheet_name)])
                .await?;
            Ok(Json(data))
        }
    }
}

/// POST /api/sheets - raw body pass-through (saveResponse, updateStatus, ...).
pub async fn sheets_post(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let data = state.gateway.forward_post(&body).await?;
    Ok(Json(data))
}

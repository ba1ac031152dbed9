//! Token-mapping endpoint backing link preparation.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::HashRequest;
use crate::registry::TokenOutcome;
use crate::AppState;

/// POST /api/hash - Get or create the application token for a
/// (student, company) pair.
pub async fn get_or_create_hash(
    State(state): State<AppState>,
    Json(request): Json<HashRequest>,
) -> ApiResult<TokenOutcome> {
    if request.uid.trim().is_empty() || request.company.trim().is_empty() {
        return error(AppError::Validation(
            "uid and company required".to_string(),
        ));
    }

    match state
        .registry
        .get_or_create(&request.uid, &request.company)
        .await
    {
        Ok(outcome) => success(outcome),
        Err(e) => error(e),
    }
}

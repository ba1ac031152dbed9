//! Dashboard endpoints: roster loading with token preparation and the
//! operator send action. The coordinator send-links page shares these
//! handlers with a coordinator filter.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{LoadOutcome, LoadRosterRequest, SendOutcome, SendRequest, Student};
use crate::AppState;

/// POST /api/dashboard/roster (and /api/send-links/roster) - Load a roster
/// and prepare application tokens, one student at a time.
pub async fn load_roster(
    State(state): State<AppState>,
    Json(request): Json<LoadRosterRequest>,
) -> ApiResult<LoadOutcome> {
    if request.company.trim().is_empty() {
        return error(AppError::Validation("Company name is required".to_string()));
    }

    match state
        .outreach
        .load(&request.company, request.sc_email.as_deref())
        .await
    {
        Ok(outcome) => success(outcome),
        Err(e) => error(e),
    }
}

/// GET /api/dashboard/roster/{company} - Local roster snapshot.
pub async fn roster_snapshot(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> ApiResult<Vec<Student>> {
    match state.outreach.snapshot(&company).await {
        Some(students) => success(students),
        None => error(AppError::NotFound(format!(
            "No roster loaded for {}",
            company
        ))),
    }
}

/// POST /api/dashboard/send (and /api/send-links/send) - Mark one student as
/// sent and build the outbound message and chat link.
pub async fn send_invite(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> ApiResult<SendOutcome> {
    match state
        .outreach
        .send(&request.company, &request.uid, &request.jd)
        .await
    {
        Ok(outcome) => success(outcome),
        Err(e) => error(e),
    }
}

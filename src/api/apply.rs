//! Public apply-by-token flow: resolve a link, describe the form, accept a
//! submission.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::forms::{FormSession, RenderedField};
use crate::models::{ApplySubmission, FormTemplate, Student};
use crate::AppState;

/// Everything the public form page needs to render.
#[derive(Debug, Serialize)]
pub struct ApplyView {
    pub uid: String,
    pub company: String,
    pub name: String,
    pub jd: String,
    pub fields: Vec<RenderedField>,
}

/// GET /api/apply/{hash} - Resolve an application link.
///
/// The token decodes to a (uid, company) pair; the roster entry must exist.
/// A failing form-template fetch degrades to an empty form rather than
/// failing the page.
pub async fn get_apply(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> ApiResult<ApplyView> {
    let (uid, company) = state.registry.decode(&hash).await?;
    let student = find_student(&state, &company, &uid).await?;
    let template = fetch_template_degraded(&state, &company).await;

    let session = FormSession::new(template.fields)?;
    success(ApplyView {
        uid,
        company,
        name: student.name,
        jd: template.jd,
        fields: session.render(),
    })
}

/// POST /api/apply/{hash} - Validate and persist one submission.
///
/// The whole record is validated client-shape first; nothing is saved unless
/// every required field carries an answer.
pub async fn submit_apply(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    Json(submission): Json<ApplySubmission>,
) -> ApiResult<()> {
    let (uid, company) = state.registry.decode(&hash).await?;
    let student = find_student(&state, &company, &uid).await?;
    let template = fetch_template_degraded(&state, &company).await;

    let mut session = FormSession::new(template.fields)?;
    for (question, raw) in &submission.answers {
        session.set_answer(question, raw)?;
    }
    let record = session.submit()?;

    state
        .gateway
        .save_response(&company, &uid, &student.name, &record)
        .await?;

    success(())
}

async fn find_student(state: &AppState, company: &str, uid: &str) -> Result<Student, AppError> {
    let roster = state.gateway.fetch_roster(company).await?;
    roster
        .into_iter()
        .find(|s| s.uid == uid)
        .ok_or_else(|| AppError::NotFound("Student record not found".to_string()))
}

async fn fetch_template_degraded(state: &AppState, company: &str) -> FormTemplate {
    match state.gateway.fetch_form_template(company).await {
        Ok(template) => template,
        Err(err) => {
            tracing::warn!(company, %err, "Form template unavailable, rendering empty form");
            FormTemplate::default()
        }
    }
}

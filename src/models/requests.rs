//! Request and response bodies for the backend's own HTTP surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Student;

/// Request body for `POST /api/auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Response body for `POST /api/auth` (original wire shape, not the envelope).
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Request body for `POST /api/hash`.
#[derive(Debug, Clone, Deserialize)]
pub struct HashRequest {
    pub uid: String,
    pub company: String,
}

/// Request body for loading a roster (dashboard and send-links pages).
#[derive(Debug, Clone, Deserialize)]
pub struct LoadRosterRequest {
    pub company: String,
    /// Restrict token preparation to students assigned to this coordinator
    #[serde(default)]
    pub sc_email: Option<String>,
}

/// Result of a roster load with token preparation.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub students: Vec<Student>,
    /// uid -> token for every student whose link is ready
    pub tokens: BTreeMap<String, String>,
    /// uids whose token preparation failed (skipped, not fatal)
    pub failed: Vec<String>,
    /// Distinct coordinator emails present in the roster
    pub coordinators: Vec<String>,
}

/// Request body for the operator send action.
#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    pub company: String,
    pub uid: String,
    /// Operator-entered job description included in the message
    #[serde(default)]
    pub jd: String,
}

/// Result of a send action: the link plus the composed outbound message.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub uid: String,
    pub form_link: String,
    pub message: String,
    /// Chat-app deep link the operator opens
    pub chat_url: String,
}

/// Request body for a public form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplySubmission {
    #[serde(default)]
    pub answers: BTreeMap<String, serde_json::Value>,
}

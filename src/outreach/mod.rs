//! Dashboard Orchestrator: roster loading, token preparation and the
//! operator send action.
//!
//! Holds the per-company roster snapshot and token map for the duration of an
//! operator session. Token preparation runs strictly sequentially (one
//! outstanding remote call at a time) so progress is deterministic; a send is
//! only allowed once the student's token is known to exist, and the local
//! snapshot is only mutated after the remote status update confirms.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::gateway::SheetGateway;
use crate::models::{LoadOutcome, OutreachStatus, SendOutcome, Student};
use crate::registry::HashRegistry;

struct RosterState {
    students: Vec<Student>,
    /// uid -> prepared application token
    tokens: BTreeMap<String, String>,
}

pub struct Outreach {
    gateway: Arc<SheetGateway>,
    registry: Arc<HashRegistry>,
    public_origin: String,
    rosters: Mutex<HashMap<String, RosterState>>,
}

impl Outreach {
    pub fn new(
        gateway: Arc<SheetGateway>,
        registry: Arc<HashRegistry>,
        public_origin: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            registry,
            public_origin: public_origin.into(),
            rosters: Mutex::new(HashMap::new()),
        }
    }

    /// Load the roster for one company and prepare a token per student.
    ///
    /// With a coordinator filter only that coordinator's students are kept
    /// and prepared. A failure on one student's token step is logged and
    /// skipped, never fatal to the batch.
    pub async fn load(
        &self,
        company: &str,
        coordinator: Option<&str>,
    ) -> Result<LoadOutcome, AppError> {
        let roster = self.gateway.fetch_roster(company).await?;

        let mut coordinators = Vec::new();
        for student in &roster {
            if let Some(email) = &student.sc_email {
                if !email.is_empty() && !coordinators.contains(email) {
                    coordinators.push(email.clone());
                }
            }
        }

        let students: Vec<Student> = match coordinator {
            Some(email) => roster
                .into_iter()
                .filter(|s| {
                    s.sc_email
                        .as_deref()
                        .map_or(false, |sc| sc.eq_ignore_ascii_case(email))
                })
                .collect(),
            None => roster,
        };

        let mut tokens = BTreeMap::new();
        let mut failed = Vec::new();
        for student in &students {
            match self.registry.get_or_create(&student.uid, company).await {
                Ok(outcome) => {
                    tokens.insert(student.uid.clone(), outcome.hash);
                }
                Err(err) => {
                    tracing::warn!(uid = %student.uid, %err, "Token preparation failed, skipping");
                    failed.push(student.uid.clone());
                }
            }
        }

        let mut rosters = self.rosters.lock().await;
        rosters.insert(
            company.to_string(),
            RosterState {
                students: students.clone(),
                tokens: tokens.clone(),
            },
        );

        tracing::info!(
            company,
            students = students.len(),
            prepared = tokens.len(),
            failed = failed.len(),
            "Roster loaded"
        );

        Ok(LoadOutcome {
            students,
            tokens,
            failed,
            coordinators,
        })
    }

    /// Operator-triggered send for one student.
    ///
    /// Refused with `NotReady` when the student's token was never prepared
    /// (or its preparation failed) rather than generating one inline. The
    /// remote status update happens before the local snapshot is touched; on
    /// remote failure the snapshot stays unchanged.
    pub async fn send(&self, company: &str, uid: &str, jd: &str) -> Result<SendOutcome, AppError> {
        if jd.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter the job description first".to_string(),
            ));
        }

        let (hash, name, phone) = {
            let rosters = self.rosters.lock().await;
            let state = rosters.get(company).ok_or_else(|| {
                AppError::NotFound(format!("No roster loaded for {}", company))
            })?;
            let student = state
                .students
                .iter()
                .find(|s| s.uid == uid)
                .ok_or_else(|| AppError::NotFound(format!("Student {} not found", uid)))?;
            let hash = state
                .tokens
                .get(uid)
                .ok_or_else(|| {
                    AppError::NotReady("Application link not ready yet. Please wait.".to_string())
                })?
                .clone();
            (hash, student.name.clone(), student.phone.clone())
        };

        self.gateway
            .update_status(company, uid, OutreachStatus::Sent)
            .await?;

        let mut rosters = self.rosters.lock().await;
        if let Some(state) = rosters.get_mut(company) {
            if let Some(student) = state.students.iter_mut().find(|s| s.uid == uid) {
                student.status = OutreachStatus::Sent;
            }
        }

        let form_link = format!(
            "{}/apply/{}",
            self.public_origin.trim_end_matches('/'),
            hash
        );
        let message = compose_invite(&name, company, jd, &form_link);
        let chat_url = chat_link(&phone, &message)?;

        Ok(SendOutcome {
            uid: uid.to_string(),
            form_link,
            message,
            chat_url,
        })
    }

    /// Current local roster view for one company.
    pub async fn snapshot(&self, company: &str) -> Option<Vec<Student>> {
        let rosters = self.rosters.lock().await;
        rosters.get(company).map(|state| state.students.clone())
    }
}

/// The outbound invite message, verbatim template from the sheet workflow.
pub fn compose_invite(name: &str, company: &str, jd: &str, form_link: &str) -> String {
    format!(
        "Hi *{}*! \u{1F44B}\n\n\
         Sharing an internship opportunity from *{}* that can add strong value \
         to your learning and career journey.\n\n\
         *Job Details:*\n{}\n\n\
         *Apply here:* {}",
        name, company, jd, form_link
    )
}

/// Chat-app deep link carrying the url-encoded message.
pub fn chat_link(phone: &str, message: &str) -> Result<String, AppError> {
    let query = serde_urlencoded::to_string([("text", message)])
        .map_err(|e| AppError::Internal(format!("Message encoding failed: {}", e)))?;
    Ok(format!("https://wa.me/{}?{}", phone, query))
}

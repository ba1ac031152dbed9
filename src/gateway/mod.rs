//! Sheet Gateway: typed operations against the spreadsheet-automation endpoint.
//!
//! The remote store exposes one HTTP endpoint discriminated by an `action`
//! parameter (GET query or POST body) and replies with ad hoc JSON. This
//! module translates those replies into typed results and normalizes every
//! transport failure, non-2xx status, malformed body or remote-reported error
//! field into [`AppError::Gateway`] (or `NotFound` where the remote reply
//! means exactly that).

use serde_json::{json, Value};

use crate::errors::AppError;
use crate::forms::parse_template;
use crate::models::{AnswerRecord, FormTemplate, OutreachStatus, Student};

/// Request/response adapter for the remote spreadsheet backend.
#[derive(Debug, Clone)]
pub struct SheetGateway {
    client: reqwest::Client,
    base_url: String,
}

impl SheetGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get(&self, query: &[(&str, &str)]) -> Result<Value, AppError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<Value>().await?)
    }

    async fn post(&self, body: &Value) -> Result<Value, AppError> {
        let resp = self
            .client
            .post(&self.base_url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<Value>().await?)
    }

    /// Pull the remote-reported error field out of a reply, if any.
    fn remote_error(value: &Value) -> Option<String> {
        value
            .get("error")
            .map(|e| e.as_str().map_or_else(|| e.to_string(), String::from))
    }

    /// Fetch the roster for one sheet/company.
    pub async fn fetch_roster(&self, sheet_name: &str) -> Result<Vec<Student>, AppError> {
        let data = self
            .get(&[("action", "getStudents"), ("sheetName", sheet_name)])
            .await?;

        if let Some(err) = Self::remote_error(&data) {
            return Err(AppError::NotFound(format!("Sheet not found: {}", err)));
        }

        let students: Vec<Student> = serde_json::from_value(data)?;
        Ok(students)
    }

    /// Fetch the form template and job description for a company.
    ///
    /// The template may arrive as an embedded JSON string needing a second
    /// decode. Callers rendering the public form degrade any error to
    /// [`FormTemplate::default`] rather than failing the page.
    pub async fn fetch_form_template(&self, company: &str) -> Result<FormTemplate, AppError> {
        let data = self
            .get(&[("action", "getFormTemplate"), ("company", company)])
            .await?;

        if let Some(err) = Self::remote_error(&data) {
            return Err(AppError::Gateway(format!("Form template error: {}", err)));
        }

        let fields = match data.get("template") {
            Some(template) => parse_template(template)?,
            None => Vec::new(),
        };
        let jd = match data.get("jd") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Ok(FormTemplate { fields, jd })
    }

    /// Persist one complete answer record.
    pub async fn save_response(
        &self,
        sheet_name: &str,
        uid: &str,
        name: &str,
        record: &AnswerRecord,
    ) -> Result<(), AppError> {
        let data = self
            .post(&json!({
                "action": "saveResponse",
                "sheetName": sheet_name,
                "uid": uid,
                "name": name,
                "response": record,
            }))
            .await?;

        Self::expect_success(&data, "save response")
    }

    /// Write the outreach status back for one student.
    pub async fn update_status(
        &self,
        sheet_name: &str,
        uid: &str,
        status: OutreachStatus,
    ) -> Result<(), AppError> {
        let data = self
            .post(&json!({
                "action": "updateStatus",
                "sheetName": sheet_name,
                "uid": uid,
                "status": status.as_str(),
            }))
            .await?;

        Self::expect_success(&data, "update status")
    }

    /// Look up an existing token for a (uid, company) pair.
    pub async fn get_hash(&self, uid: &str, company: &str) -> Result<Option<String>, AppError> {
        let data = self
            .get(&[("action", "getHash"), ("uid", uid), ("company", company)])
            .await?;

        if data.get("exists").and_then(Value::as_bool) == Some(true) {
            if let Some(hash) = data.get("hash").and_then(Value::as_str) {
                return Ok(Some(hash.to_string()));
            }
        }
        Ok(None)
    }

    /// Persist a freshly generated token mapping.
    pub async fn store_hash(&self, hash: &str, uid: &str, company: &str) -> Result<(), AppError> {
        let data = self
            .post(&json!({
                "action": "storeHash",
                "hash": hash,
                "uid": uid,
                "company": company,
            }))
            .await?;

        Self::expect_success(&data, "store hash")
    }

    /// Reverse-lookup a token into its (uid, company) pair.
    pub async fn decode_hash(&self, hash: &str) -> Result<(String, String), AppError> {
        let data = self.get(&[("action", "decodeHash"), ("hash", hash)]).await?;

        if Self::remote_error(&data).is_some() {
            return Err(AppError::NotFound("Unknown application link".to_string()));
        }

        let uid = data.get("uid").and_then(Value::as_str);
        let company = data.get("company").and_then(Value::as_str);
        match (uid, company) {
            (Some(uid), Some(company)) => Ok((uid.to_string(), company.to_string())),
            _ => Err(AppError::Gateway(
                "Malformed decodeHash reply".to_string(),
            )),
        }
    }

    /// Raw GET pass-through for the thin `/api/sheets` proxy.
    pub async fn forward_get(&self, query: &[(&str, &str)]) -> Result<Value, AppError> {
        self.get(query).await
    }

    /// Raw POST pass-through for the thin `/api/sheets` proxy.
    pub async fn forward_post(&self, body: &Value) -> Result<Value, AppError> {
        self.post(body).await
    }

    fn expect_success(data: &Value, what: &str) -> Result<(), AppError> {
        if data.get("success").and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            Err(AppError::Gateway(format!(
                "Remote refused to {}: {}",
                what, data
            )))
        }
    }
}

//! Student roster model matching the spreadsheet row layout.

use serde::{Deserialize, Deserializer, Serialize};

/// Outreach status of a single student.
///
/// The sheet stores this as free text; anything other than `"Sent"` (including
/// a missing or empty cell) reads as `Pending`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum OutreachStatus {
    #[default]
    Pending,
    Sent,
}

impl OutreachStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutreachStatus::Pending => "Pending",
            OutreachStatus::Sent => "Sent",
        }
    }
}

impl<'de> Deserialize<'de> for OutreachStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("Sent") => OutreachStatus::Sent,
            _ => OutreachStatus::Pending,
        })
    }
}

/// One roster entry. Owned by the external store; the backend only reads a
/// snapshot per roster load and writes the status field back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub uid: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub status: OutreachStatus,
    /// Assigning-coordinator email, when the sheet carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sc_email: Option<String>,
    /// Profile completion percentage column from the sheet
    #[serde(
        default,
        rename = "completion%",
        skip_serializing_if = "Option::is_none"
    )]
    pub completion: Option<f64>,
}

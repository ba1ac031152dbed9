//! Form schema and answer models.
//!
//! A form template is an ordered list of field descriptors supplied by the
//! spreadsheet backend; question labels double as answer-record keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Type tag of a single form field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    ShortText,
    LongText,
    Number,
    Email,
    Url,
    Phone,
    Radio,
    Dropdown,
    MultiSelect,
    Checkbox,
    /// File-reference URL (a pasted drive link, not an upload)
    File,
    Date,
    /// Bounded numeric scale, fixed 1..=10
    Range,
}

impl FieldType {
    /// Choice types must carry a non-empty options list.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldType::Radio | FieldType::Dropdown | FieldType::MultiSelect
        )
    }
}

/// One entry of a form schema describing a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub question: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
}

/// A form template together with the job description it was stored with.
#[derive(Debug, Clone, Default)]
pub struct FormTemplate {
    pub fields: Vec<FormField>,
    pub jd: String,
}

/// A submitted answer value. Shape depends on the field type: boolean for
/// checkbox, list for multi-select, string for everything else (range and
/// number as numeric strings).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Many(Vec<String>),
    Text(String),
}

/// The submitted mapping from question label to answer value.
pub type AnswerRecord = BTreeMap<String, AnswerValue>;

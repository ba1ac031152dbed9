//! Form Schema Interpreter.
//!
//! Takes an ordered list of field descriptors and produces the rendered
//! control descriptions for the public form, collects and coerces answer
//! values, applies per-field validation at submit time, and assembles the
//! final answer record. Pure per-field logic; no I/O.

use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{AnswerRecord, AnswerValue, FieldType, FormField};

/// Fixed bounds of the `range` field type.
pub const RANGE_MIN: i64 = 1;
pub const RANGE_MAX: i64 = 10;
/// Midpoint default; a range field always carries a value.
pub const RANGE_DEFAULT: i64 = 5;

/// Decode a form template as delivered by the spreadsheet backend: either a
/// JSON array of field descriptors or a string containing one.
pub fn parse_template(value: &Value) -> Result<Vec<FormField>, AppError> {
    let fields: Vec<FormField> = match value {
        Value::Null => Vec::new(),
        Value::String(embedded) => serde_json::from_str(embedded)
            .map_err(|e| AppError::Validation(format!("Bad form template: {}", e)))?,
        other => serde_json::from_value(other.clone())
            .map_err(|e| AppError::Validation(format!("Bad form template: {}", e)))?,
    };
    validate_schema(&fields)?;
    Ok(fields)
}

/// Schema invariants: question labels are unique (they key the answer
/// record), and choice types carry a non-empty options list.
pub fn validate_schema(fields: &[FormField]) -> Result<(), AppError> {
    let mut seen = std::collections::HashSet::new();
    for field in fields {
        if !seen.insert(field.question.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate question label: {}",
                field.question
            )));
        }
        if field.field_type.is_choice()
            && field.options.as_ref().map_or(true, |opts| opts.is_empty())
        {
            return Err(AppError::Validation(format!(
                "Question {:?} needs at least one option",
                field.question
            )));
        }
    }
    Ok(())
}

/// Current value of one field, resolved to its type-specific shape once at
/// session creation and carried through validation and assembly.
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Text(String),
    Flag(bool),
    Many(Vec<String>),
    Scale(i64),
}

impl FieldValue {
    fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Checkbox => FieldValue::Flag(false),
            FieldType::MultiSelect => FieldValue::Many(Vec::new()),
            FieldType::Range => FieldValue::Scale(RANGE_DEFAULT),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// Rendered control description for one field, consumed by the form page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum RenderedControl {
    TextInput {
        input_type: &'static str,
        value: String,
    },
    TextArea {
        rows: u32,
        value: String,
    },
    Checkbox {
        checked: bool,
    },
    RadioGroup {
        options: Vec<String>,
        selected: String,
    },
    /// Dropdown with an explicit empty placeholder entry distinct from any
    /// real choice.
    Select {
        placeholder: String,
        options: Vec<String>,
        selected: String,
    },
    MultiSelect {
        options: Vec<String>,
        selected: Vec<String>,
    },
    FileLink {
        placeholder: String,
        value: String,
    },
    Slider {
        min: i64,
        max: i64,
        value: i64,
    },
}

/// One rendered field: label, required marker and its input control.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedField {
    pub question: String,
    pub required: bool,
    #[serde(flatten)]
    pub control: RenderedControl,
}

/// One in-flight form: the schema plus a current value per field.
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: Vec<FormField>,
    values: Vec<FieldValue>,
}

impl FormSession {
    /// Validate the schema and seed every field with its default value.
    pub fn new(fields: Vec<FormField>) -> Result<Self, AppError> {
        validate_schema(&fields)?;
        let values = fields
            .iter()
            .map(|f| FieldValue::default_for(f.field_type))
            .collect();
        Ok(Self { fields, values })
    }

    fn position(&self, question: &str) -> Result<usize, AppError> {
        self.fields
            .iter()
            .position(|f| f.question == question)
            .ok_or_else(|| AppError::Validation(format!("Unknown question: {}", question)))
    }

    fn options(&self, index: usize) -> &[String] {
        self.fields[index].options.as_deref().unwrap_or_default()
    }

    /// Coerce a raw JSON value into the field's value shape and store it.
    pub fn set_answer(&mut self, question: &str, raw: &Value) -> Result<(), AppError> {
        let index = self.position(question)?;
        let field_type = self.fields[index].field_type;

        let value = match field_type {
            FieldType::Checkbox => match raw {
                Value::Bool(flag) => FieldValue::Flag(*flag),
                _ => return Err(Self::shape_error(question, "a boolean")),
            },
            FieldType::MultiSelect => {
                let Value::Array(items) = raw else {
                    return Err(Self::shape_error(question, "a list of options"));
                };
                let mut selected = Vec::with_capacity(items.len());
                for item in items {
                    let Some(option) = item.as_str() else {
                        return Err(Self::shape_error(question, "a list of options"));
                    };
                    if !self.options(index).iter().any(|o| o == option) {
                        return Err(AppError::Validation(format!(
                            "{:?} is not an option for {}",
                            option, question
                        )));
                    }
                    selected.push(option.to_string());
                }
                FieldValue::Many(selected)
            }
            FieldType::Radio | FieldType::Dropdown => {
                let Some(choice) = raw.as_str() else {
                    return Err(Self::shape_error(question, "an option"));
                };
                // Empty string is the explicit no-selection state.
                if !choice.is_empty() && !self.options(index).iter().any(|o| o == choice) {
                    return Err(AppError::Validation(format!(
                        "{:?} is not an option for {}",
                        choice, question
                    )));
                }
                FieldValue::Text(choice.to_string())
            }
            FieldType::Range => {
                let parsed = match raw {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                let Some(n) = parsed else {
                    return Err(Self::shape_error(question, "a number"));
                };
                FieldValue::Scale(n.clamp(RANGE_MIN, RANGE_MAX))
            }
            _ => {
                let Some(text) = raw.as_str() else {
                    return Err(Self::shape_error(question, "text"));
                };
                FieldValue::Text(text.to_string())
            }
        };

        self.values[index] = value;
        Ok(())
    }

    /// Multi-select membership toggle: selecting an already-selected option
    /// removes it.
    pub fn toggle_option(&mut self, question: &str, option: &str) -> Result<(), AppError> {
        let index = self.position(question)?;
        if self.fields[index].field_type != FieldType::MultiSelect {
            return Err(AppError::Validation(format!(
                "{} is not a multi-select question",
                question
            )));
        }
        if !self.options(index).iter().any(|o| o == option) {
            return Err(AppError::Validation(format!(
                "{:?} is not an option for {}",
                option, question
            )));
        }

        let FieldValue::Many(selected) = &mut self.values[index] else {
            unreachable!("multi-select field holds a list value");
        };
        match selected.iter().position(|o| o == option) {
            Some(pos) => {
                selected.remove(pos);
            }
            None => selected.push(option.to_string()),
        }
        Ok(())
    }

    /// First required field still at an empty value, in schema order.
    /// Checkbox and range fields always carry a value and are never reported.
    pub fn first_unanswered(&self) -> Option<&str> {
        self.fields
            .iter()
            .zip(&self.values)
            .find(|(field, value)| {
                field.required
                    && match value {
                        FieldValue::Text(text) => text.is_empty(),
                        FieldValue::Many(selected) => selected.is_empty(),
                        FieldValue::Flag(_) | FieldValue::Scale(_) => false,
                    }
            })
            .map(|(field, _)| field.question.as_str())
    }

    /// Validate every field in schema order and assemble the answer record.
    /// Entered values are untouched on failure; no data is lost.
    pub fn submit(&self) -> Result<AnswerRecord, AppError> {
        if let Some(question) = self.first_unanswered() {
            return Err(AppError::Validation(format!(
                "Please answer: {}",
                question
            )));
        }

        let record = self
            .fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| {
                let answer = match value {
                    FieldValue::Text(text) => AnswerValue::Text(text.clone()),
                    FieldValue::Flag(flag) => AnswerValue::Flag(*flag),
                    FieldValue::Many(selected) => AnswerValue::Many(selected.clone()),
                    // Range travels as a numeric string, like number fields.
                    FieldValue::Scale(n) => AnswerValue::Text(n.to_string()),
                };
                (field.question.clone(), answer)
            })
            .collect();
        Ok(record)
    }

    /// Produce the input-collection UI description, one control per field.
    pub fn render(&self) -> Vec<RenderedField> {
        self.fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| {
                let control = match (field.field_type, value) {
                    (FieldType::LongText, FieldValue::Text(text)) => RenderedControl::TextArea {
                        rows: 4,
                        value: text.clone(),
                    },
                    (FieldType::Checkbox, FieldValue::Flag(flag)) => {
                        RenderedControl::Checkbox { checked: *flag }
                    }
                    (FieldType::Radio, FieldValue::Text(text)) => RenderedControl::RadioGroup {
                        options: self.options_of(field),
                        selected: text.clone(),
                    },
                    (FieldType::Dropdown, FieldValue::Text(text)) => RenderedControl::Select {
                        placeholder: "Select an option".to_string(),
                        options: self.options_of(field),
                        selected: text.clone(),
                    },
                    (FieldType::MultiSelect, FieldValue::Many(selected)) => {
                        RenderedControl::MultiSelect {
                            options: self.options_of(field),
                            selected: selected.clone(),
                        }
                    }
                    (FieldType::File, FieldValue::Text(text)) => RenderedControl::FileLink {
                        placeholder: "Paste Google Drive link here".to_string(),
                        value: text.clone(),
                    },
                    (FieldType::Range, FieldValue::Scale(n)) => RenderedControl::Slider {
                        min: RANGE_MIN,
                        max: RANGE_MAX,
                        value: *n,
                    },
                    (field_type, FieldValue::Text(text)) => RenderedControl::TextInput {
                        input_type: match field_type {
                            FieldType::Number => "number",
                            FieldType::Email => "email",
                            FieldType::Url => "url",
                            FieldType::Phone => "tel",
                            FieldType::Date => "date",
                            _ => "text",
                        },
                        value: text.clone(),
                    },
                    // Value shapes are fixed per type at construction.
                    _ => unreachable!("field value matches its type"),
                };
                RenderedField {
                    question: field.question.clone(),
                    required: field.required,
                    control,
                }
            })
            .collect()
    }

    fn options_of(&self, field: &FormField) -> Vec<String> {
        field.options.clone().unwrap_or_default()
    }

    fn shape_error(question: &str, expected: &str) -> AppError {
        AppError::Validation(format!("{} expects {}", question, expected))
    }
}

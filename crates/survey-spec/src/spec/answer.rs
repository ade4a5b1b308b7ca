use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::Question;

/// A recorded answer. The same shape travels over `GET/POST/PUT /answers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: i64,
    /// Snapshot of the question text at the time of answering.
    #[serde(rename = "question")]
    pub question_text: String,
    #[serde(rename = "answer")]
    pub value: String,
    pub timestamp: DateTime<Utc>,
}

impl Answer {
    pub fn new(question: &Question, value: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            question_id: question.id,
            question_text: question.text.clone(),
            value: value.into(),
            timestamp,
        }
    }
}

/// Joins the two composite-name parts with a single space.
pub fn join_full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim())
}

/// Splits a joined full name on the first space.
pub fn split_full_name(value: &str) -> (String, String) {
    match value.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (value.to_string(), String::new()),
    }
}

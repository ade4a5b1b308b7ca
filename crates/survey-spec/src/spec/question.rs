use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Question type labels used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Choice,
    /// Full-name question answered as first name then last name.
    Name,
}

/// Question record as served by `GET /questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionRecord {
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    Choice { options: Vec<String> },
    CompositeName,
}

impl QuestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Choice { .. } => "choice",
            QuestionKind::CompositeName => "name",
        }
    }
}

/// A single catalog entry, read-only for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn text(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::Text,
        }
    }

    pub fn choice<I, S>(id: i64, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::Choice {
                options: options.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn composite_name(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::CompositeName,
        }
    }

    pub fn is_composite_name(&self) -> bool {
        matches!(self.kind, QuestionKind::CompositeName)
    }

    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Choice { options } => options,
            _ => &[],
        }
    }

    /// Converts a wire record. `name_question_id` re-tags a text question as
    /// the composite-name question for stores that only emit `text|choice`.
    pub(crate) fn from_record(record: QuestionRecord, name_question_id: Option<i64>) -> Self {
        let kind = match record.kind {
            QuestionType::Choice => QuestionKind::Choice {
                options: record.options.unwrap_or_default(),
            },
            QuestionType::Name => QuestionKind::CompositeName,
            QuestionType::Text if name_question_id == Some(record.id) => {
                QuestionKind::CompositeName
            }
            QuestionType::Text => QuestionKind::Text,
        };
        Self {
            id: record.id,
            text: record.text,
            kind,
        }
    }

    pub fn to_record(&self) -> QuestionRecord {
        let (kind, options) = match &self.kind {
            QuestionKind::Text => (QuestionType::Text, None),
            QuestionKind::Choice { options } => (QuestionType::Choice, Some(options.clone())),
            QuestionKind::CompositeName => (QuestionType::Name, None),
        };
        QuestionRecord {
            id: self.id,
            text: self.text.clone(),
            kind,
            options,
        }
    }
}

use thiserror::Error;
use tracing::debug;

use crate::spec::question::{Question, QuestionRecord};
use crate::validate::{CatalogIssue, validate_questions, validate_records};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("invalid question catalog: {}", summarize(.0))]
    Invalid(Vec<CatalogIssue>),
}

impl CatalogError {
    pub fn issues(&self) -> &[CatalogIssue] {
        match self {
            CatalogError::Invalid(issues) => issues,
        }
    }
}

fn summarize(issues: &[CatalogIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered question list fetched once at session start.
///
/// The order is the presentation order given by the store and is never
/// re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let issues = validate_questions(&questions);
        if !issues.is_empty() {
            return Err(CatalogError::Invalid(issues));
        }
        Ok(Self { questions })
    }

    pub fn from_records(
        records: Vec<QuestionRecord>,
        name_question_id: Option<i64>,
    ) -> Result<Self, CatalogError> {
        let mut issues = validate_records(&records);
        let questions = records
            .into_iter()
            .map(|record| Question::from_record(record, name_question_id))
            .collect::<Vec<_>>();
        issues.extend(validate_questions(&questions));
        if !issues.is_empty() {
            return Err(CatalogError::Invalid(issues));
        }
        debug!(questions = questions.len(), "question catalog loaded");
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn find(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == question_id)
    }

    pub fn position(&self, question_id: i64) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| question.id == question_id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

use std::collections::BTreeSet;

use thiserror::Error;

use crate::spec::question::{Question, QuestionKind, QuestionRecord, QuestionType};

/// A single problem found while checking a question catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("catalog has no questions")]
    Empty,
    #[error("question id {0} appears more than once")]
    DuplicateId(i64),
    #[error("choice question {0} has no options")]
    MissingOptions(i64),
    #[error("question {0} lists options but is not a choice question")]
    UnexpectedOptions(i64),
    #[error("questions {first} and {second} are both full-name questions")]
    MultipleCompositeName { first: i64, second: i64 },
}

/// Returns the trimmed input, or `None` when nothing but whitespace was given.
pub fn non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Checks wire records for shape problems that the domain type cannot express.
pub fn validate_records(records: &[QuestionRecord]) -> Vec<CatalogIssue> {
    records
        .iter()
        .filter(|record| {
            !matches!(record.kind, QuestionType::Choice)
                && record
                    .options
                    .as_ref()
                    .is_some_and(|options| !options.is_empty())
        })
        .map(|record| CatalogIssue::UnexpectedOptions(record.id))
        .collect()
}

pub fn validate_questions(questions: &[Question]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    if questions.is_empty() {
        issues.push(CatalogIssue::Empty);
        return issues;
    }

    let mut seen = BTreeSet::new();
    let mut composite: Option<i64> = None;
    for question in questions {
        if !seen.insert(question.id) {
            issues.push(CatalogIssue::DuplicateId(question.id));
        }
        match &question.kind {
            QuestionKind::Choice { options } if options.is_empty() => {
                issues.push(CatalogIssue::MissingOptions(question.id));
            }
            QuestionKind::CompositeName => match composite {
                Some(first) => issues.push(CatalogIssue::MultipleCompositeName {
                    first,
                    second: question.id,
                }),
                None => composite = Some(question.id),
            },
            _ => {}
        }
    }

    issues
}

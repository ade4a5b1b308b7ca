//! In-process answer store for tests and offline runs.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use survey_spec::{Answer, QuestionRecord};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::AnswerStore;

#[derive(Debug, Default)]
pub struct MemoryAnswerStore {
    questions: Vec<QuestionRecord>,
    answers: RwLock<Vec<Answer>>,
    failing: AtomicBool,
}

impl MemoryAnswerStore {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn with_answers(self, answers: Vec<Answer>) -> Self {
        Self {
            answers: RwLock::new(answers),
            ..self
        }
    }

    /// While set, every call fails with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn answers(&self) -> Vec<Answer> {
        self.answers.read().await.clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store set to fail".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AnswerStore for MemoryAnswerStore {
    async fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        self.check_available()?;
        Ok(self.questions.clone())
    }

    async fn fetch_answers(&self) -> Result<Vec<Answer>, StoreError> {
        self.check_available()?;
        Ok(self.answers.read().await.clone())
    }

    async fn upsert_answer(&self, answer: &Answer) -> Result<(), StoreError> {
        self.check_available()?;
        let mut answers = self.answers.write().await;
        match answers
            .iter_mut()
            .find(|existing| existing.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer.clone(),
            None => answers.push(answer.clone()),
        }
        Ok(())
    }

    async fn update_answer(&self, answer: &Answer) -> Result<(), StoreError> {
        self.check_available()?;
        let mut answers = self.answers.write().await;
        let existing = answers
            .iter_mut()
            .find(|existing| existing.question_id == answer.question_id)
            .ok_or_else(|| StoreError::Status {
                status: 404,
                body: format!("no answer for question {}", answer.question_id),
            })?;
        *existing = answer.clone();
        Ok(())
    }
}

use async_trait::async_trait;
use survey_spec::{Answer, Catalog, PersistOp, PersistRequest, QuestionRecord, StoreOutcome};
use tracing::{debug, warn};

use crate::error::{CatalogLoadError, StoreError};

/// Remote mirror of the session's questions and answers.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// `GET /questions`, in presentation order.
    async fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, StoreError>;

    /// `GET /answers`, used to resume a session.
    async fn fetch_answers(&self) -> Result<Vec<Answer>, StoreError>;

    /// `POST /answers`, create-or-replace keyed by question id.
    async fn upsert_answer(&self, answer: &Answer) -> Result<(), StoreError>;

    /// `PUT /answers/{questionId}` for an answer that already exists.
    async fn update_answer(&self, answer: &Answer) -> Result<(), StoreError>;
}

/// Fetches and validates the question catalog.
pub async fn load_catalog(
    store: &dyn AnswerStore,
    name_question_id: Option<i64>,
) -> Result<Catalog, CatalogLoadError> {
    let records = store.fetch_questions().await?;
    Ok(Catalog::from_records(records, name_question_id)?)
}

/// Runs one persist request and reports how it went. Never fails; errors
/// come back inside the outcome.
pub async fn execute(store: &dyn AnswerStore, request: &PersistRequest) -> StoreOutcome {
    let result = match request.op {
        PersistOp::Create => store.upsert_answer(&request.answer).await,
        PersistOp::Update => store.update_answer(&request.answer).await,
    };
    match result {
        Ok(()) => {
            debug!(
                op = request.op.as_str(),
                question_id = request.answer.question_id,
                "store call succeeded"
            );
            StoreOutcome::succeeded(request)
        }
        Err(err) => {
            warn!(
                op = request.op.as_str(),
                question_id = request.answer.question_id,
                error = %err,
                "store call failed"
            );
            StoreOutcome::failed(request, err.user_message())
        }
    }
}

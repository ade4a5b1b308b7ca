//! HTTP+JSON client for the answer store.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use survey_spec::{Answer, QuestionRecord};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::AnswerStore;

#[derive(Debug, Clone)]
pub struct HttpAnswerStore {
    client: Client,
    config: StoreConfig,
}

impl HttpAnswerStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        Url::parse(&config.base_url)
            .map_err(|_| StoreError::InvalidBaseUrl(config.base_url.clone()))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StoreError::Network)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let url = self.config.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(StoreError::Network)?;
        let bytes = ensure_success(response)
            .await?
            .bytes()
            .await
            .map_err(StoreError::Network)?;
        serde_json::from_slice(&bytes).map_err(StoreError::Decode)
    }

    async fn send_answer(
        &self,
        method: Method,
        path: &str,
        answer: &Answer,
    ) -> Result<(), StoreError> {
        let url = self.config.endpoint(path);
        debug!(%method, %url, question_id = answer.question_id, "sending answer");
        let response = self
            .client
            .request(method, &url)
            .json(answer)
            .send()
            .await
            .map_err(StoreError::Network)?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl AnswerStore for HttpAnswerStore {
    async fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        self.get_json("/questions").await
    }

    async fn fetch_answers(&self) -> Result<Vec<Answer>, StoreError> {
        self.get_json("/answers").await
    }

    async fn upsert_answer(&self, answer: &Answer) -> Result<(), StoreError> {
        self.send_answer(Method::POST, "/answers", answer).await
    }

    async fn update_answer(&self, answer: &Answer) -> Result<(), StoreError> {
        let path = format!("/answers/{}", answer.question_id);
        self.send_answer(Method::PUT, &path, answer).await
    }
}

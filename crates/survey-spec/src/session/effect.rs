use serde::{Deserialize, Serialize};

use crate::spec::answer::Answer;

/// Which store call an answer should be mirrored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistOp {
    /// `POST /answers`, create-or-replace.
    Create,
    /// `PUT /answers/{questionId}`, used when saving an edit.
    Update,
}

impl PersistOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersistOp::Create => "create",
            PersistOp::Update => "update",
        }
    }
}

/// A store call issued by a transition. `run` identifies the session run
/// that produced it so late outcomes can be matched up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistRequest {
    pub run: u64,
    pub op: PersistOp,
    pub answer: Answer,
}

/// Side effects the driver must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Persist(PersistRequest),
    /// The respondent left; the session has been reset and the run is over.
    EndOfRun,
}

/// Result of applying one intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    pub fn persist_requests(&self) -> impl Iterator<Item = &PersistRequest> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Persist(request) => Some(request),
            Effect::EndOfRun => None,
        })
    }

    pub fn ends_run(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, Effect::EndOfRun))
    }
}

/// Resolution of a [`PersistRequest`], fed back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOutcome {
    pub run: u64,
    pub op: PersistOp,
    pub question_id: i64,
    pub error: Option<String>,
}

impl StoreOutcome {
    pub fn succeeded(request: &PersistRequest) -> Self {
        Self {
            run: request.run,
            op: request.op,
            question_id: request.answer.question_id,
            error: None,
        }
    }

    pub fn failed(request: &PersistRequest, message: impl Into<String>) -> Self {
        Self {
            run: request.run,
            op: request.op,
            question_id: request.answer.question_id,
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

use tracing::warn;

use crate::spec::answer::{Answer, split_full_name};
use crate::spec::catalog::Catalog;
use crate::spec::question::Question;

/// Top-level mode of a survey session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Asking,
    Reviewing,
    /// Editing one answer; nested under the review pass.
    Editing,
    Complete,
    Exiting,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Asking => "asking",
            Mode::Reviewing => "reviewing",
            Mode::Editing => "editing",
            Mode::Complete => "complete",
            Mode::Exiting => "exiting",
        }
    }
}

/// Which half of the full-name question is being prompted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameStage {
    #[default]
    First,
    Last,
}

/// In-progress input. `secondary` and `name_stage` only matter for the
/// composite-name question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffers {
    pub primary: String,
    pub secondary: String,
    pub name_stage: NameStage,
}

impl InputBuffers {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    /// Seeds buffers from a stored answer, splitting the joined value for
    /// the composite-name question.
    pub fn from_answer(question: &Question, answer: &Answer) -> Self {
        if question.is_composite_name() {
            let (first, last) = split_full_name(&answer.value);
            Self {
                primary: first,
                secondary: last,
                name_stage: NameStage::First,
            }
        } else {
            Self {
                primary: answer.value.clone(),
                ..Self::default()
            }
        }
    }

    /// The buffer shown for the current prompt.
    pub fn active(&self) -> &str {
        match self.name_stage {
            NameStage::First => &self.primary,
            NameStage::Last => &self.secondary,
        }
    }
}

/// One respondent's survey session.
///
/// All mutation goes through [`Session::apply`]; store calls are returned as
/// effects and never awaited here.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) catalog: Catalog,
    pub(crate) answers: Vec<Answer>,
    pub(crate) current_index: usize,
    pub(crate) mode: Mode,
    pub(crate) review_index: usize,
    pub(crate) buffers: InputBuffers,
    pub(crate) advisory: Option<String>,
    pub(crate) run: u64,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            answers: Vec::new(),
            current_index: 0,
            mode: Mode::Asking,
            review_index: 0,
            buffers: InputBuffers::default(),
            advisory: None,
            run: 0,
        }
    }

    /// Starts a session pre-seeded with answers fetched from the store.
    ///
    /// Later duplicates for the same question win; answers for questions
    /// that are not in the catalog are dropped.
    pub fn resume(catalog: Catalog, previous: Vec<Answer>) -> Self {
        let mut session = Self::new(catalog);
        for answer in previous {
            if session.catalog.find(answer.question_id).is_none() {
                warn!(
                    question_id = answer.question_id,
                    "dropping stored answer for unknown question"
                );
                continue;
            }
            session.upsert(answer);
        }
        session.rehydrate_buffers();
        session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Position in the catalog; equals the catalog length once complete.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.mode {
            Mode::Asking => self.catalog.get(self.current_index),
            _ => None,
        }
    }

    pub fn review_index(&self) -> usize {
        self.review_index
    }

    pub fn review_answer(&self) -> Option<&Answer> {
        match self.mode {
            Mode::Reviewing | Mode::Editing => self.answers.get(self.review_index),
            _ => None,
        }
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn answer_for(&self, question_id: i64) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|answer| answer.question_id == question_id)
    }

    pub fn buffers(&self) -> &InputBuffers {
        &self.buffers
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    /// Replace-by-questionId, keeping the original position.
    pub(crate) fn upsert(&mut self, answer: Answer) {
        match self
            .answers
            .iter_mut()
            .find(|existing| existing.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }

    /// Seeds buffers for the current question from its stored answer.
    pub(crate) fn rehydrate_buffers(&mut self) {
        self.buffers = self
            .catalog
            .get(self.current_index)
            .and_then(|question| {
                self.answer_for(question.id)
                    .map(|answer| InputBuffers::from_answer(question, answer))
            })
            .unwrap_or_default();
    }

    /// Back to the initial state of a fresh run. Remote answers are left
    /// untouched.
    pub(crate) fn reset(&mut self) {
        self.answers.clear();
        self.current_index = 0;
        self.mode = Mode::Asking;
        self.review_index = 0;
        self.buffers.clear();
        self.advisory = None;
        self.run += 1;
    }
}

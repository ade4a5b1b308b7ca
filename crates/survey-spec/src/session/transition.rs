use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::session::effect::{Effect, PersistOp, PersistRequest, StoreOutcome, Transition};
use crate::session::intent::Intent;
use crate::session::state::{InputBuffers, Mode, NameStage, Session};
use crate::spec::answer::{Answer, join_full_name};
use crate::validate::non_empty;

impl Session {
    /// Applies an intent using the current wall clock.
    pub fn dispatch(&mut self, intent: Intent) -> Transition {
        self.apply(intent, Utc::now())
    }

    /// Applies an intent. Intents whose preconditions do not hold leave the
    /// session untouched and return [`Transition::unchanged`].
    pub fn apply(&mut self, intent: Intent, now: DateTime<Utc>) -> Transition {
        let name = intent.name();
        let transition = match intent {
            Intent::Submit(value) => self.submit(&value, now),
            Intent::GoPrevious => self.go_previous(),
            Intent::EnterReview => self.enter_review(),
            Intent::ReviewNext => self.review_next(),
            Intent::BeginEdit => self.begin_edit(),
            Intent::SaveEdit { value, last } => self.save_edit(&value, last.as_deref(), now),
            Intent::CancelEdit => self.cancel_edit(),
            Intent::Restart(yes) => self.restart(yes),
            Intent::Exit => self.exit(),
            Intent::DismissAdvisory => self.dismiss_advisory(),
        };
        debug!(
            intent = name,
            changed = transition.changed,
            mode = self.mode.as_str(),
            index = self.current_index,
            "intent applied"
        );
        transition
    }

    pub fn submit(&mut self, value: &str, now: DateTime<Utc>) -> Transition {
        if self.mode != Mode::Asking {
            return Transition::unchanged();
        }
        let Some(value) = non_empty(value) else {
            return Transition::unchanged();
        };
        let Some(question) = self.catalog.get(self.current_index) else {
            return Transition::unchanged();
        };

        let value = if question.is_composite_name() {
            match self.buffers.name_stage {
                NameStage::First => {
                    self.buffers.primary = value.to_string();
                    self.buffers.name_stage = NameStage::Last;
                    return Transition::changed();
                }
                NameStage::Last => join_full_name(&self.buffers.primary, value),
            }
        } else {
            value.to_string()
        };

        let answer = Answer::new(question, value, now);
        self.upsert(answer.clone());

        if self.current_index + 1 < self.catalog.len() {
            self.current_index += 1;
            self.rehydrate_buffers();
        } else {
            self.current_index = self.catalog.len();
            self.buffers.clear();
            self.mode = Mode::Complete;
        }

        Transition::with_effect(self.persist(PersistOp::Create, answer))
    }

    pub fn go_previous(&mut self) -> Transition {
        if self.mode != Mode::Asking || self.current_index == 0 {
            return Transition::unchanged();
        }
        self.current_index -= 1;
        self.rehydrate_buffers();
        Transition::changed()
    }

    pub fn enter_review(&mut self) -> Transition {
        if self.mode != Mode::Complete || self.answers.is_empty() {
            return Transition::unchanged();
        }
        self.mode = Mode::Reviewing;
        self.review_index = 0;
        self.buffers.clear();
        Transition::changed()
    }

    /// Moves one step through the review pass; past the last answer the
    /// session returns to [`Mode::Complete`].
    pub fn review_next(&mut self) -> Transition {
        if self.mode != Mode::Reviewing {
            return Transition::unchanged();
        }
        if self.review_index + 1 < self.answers.len() {
            self.review_index += 1;
        } else {
            self.review_index = 0;
            self.mode = Mode::Complete;
        }
        Transition::changed()
    }

    pub fn begin_edit(&mut self) -> Transition {
        if self.mode != Mode::Reviewing {
            return Transition::unchanged();
        }
        let Some(answer) = self.answers.get(self.review_index) else {
            return Transition::unchanged();
        };
        self.buffers = match self.catalog.find(answer.question_id) {
            Some(question) => InputBuffers::from_answer(question, answer),
            None => InputBuffers {
                primary: answer.value.clone(),
                ..InputBuffers::default()
            },
        };
        self.mode = Mode::Editing;
        Transition::changed()
    }

    pub fn save_edit(
        &mut self,
        value: &str,
        last: Option<&str>,
        now: DateTime<Utc>,
    ) -> Transition {
        if self.mode != Mode::Editing {
            return Transition::unchanged();
        }
        let Some(existing) = self.answers.get(self.review_index) else {
            return Transition::unchanged();
        };
        let Some(value) = non_empty(value) else {
            return Transition::unchanged();
        };
        let composite = self
            .catalog
            .find(existing.question_id)
            .is_some_and(|question| question.is_composite_name());
        let value = if composite {
            let Some(last) = last.and_then(non_empty) else {
                return Transition::unchanged();
            };
            join_full_name(value, last)
        } else {
            value.to_string()
        };

        let answer = Answer {
            value,
            timestamp: now,
            ..existing.clone()
        };
        self.answers[self.review_index] = answer.clone();
        self.buffers.clear();
        self.mode = Mode::Reviewing;

        Transition::with_effect(self.persist(PersistOp::Update, answer))
    }

    pub fn cancel_edit(&mut self) -> Transition {
        if self.mode != Mode::Editing {
            return Transition::unchanged();
        }
        self.buffers.clear();
        self.mode = Mode::Reviewing;
        Transition::changed()
    }

    /// `yes` starts a fresh run; otherwise the session moves to
    /// [`Mode::Exiting`].
    pub fn restart(&mut self, yes: bool) -> Transition {
        if self.mode != Mode::Complete {
            return Transition::unchanged();
        }
        if yes {
            self.reset();
        } else {
            self.mode = Mode::Exiting;
        }
        Transition::changed()
    }

    pub fn exit(&mut self) -> Transition {
        if self.mode != Mode::Exiting {
            return Transition::unchanged();
        }
        self.reset();
        Transition::with_effect(Effect::EndOfRun)
    }

    pub fn dismiss_advisory(&mut self) -> Transition {
        if self.advisory.take().is_some() {
            Transition::changed()
        } else {
            Transition::unchanged()
        }
    }

    /// Records how a store call resolved. Failures raise a sticky advisory;
    /// local state is never rolled back. Outcomes from an earlier run are
    /// ignored.
    pub fn record_outcome(&mut self, outcome: StoreOutcome) {
        if outcome.run != self.run {
            debug!(
                run = outcome.run,
                current_run = self.run,
                question_id = outcome.question_id,
                "ignoring store outcome from a previous run"
            );
            return;
        }
        match outcome.error {
            None => debug!(
                op = outcome.op.as_str(),
                question_id = outcome.question_id,
                "answer persisted"
            ),
            Some(error) => {
                warn!(
                    op = outcome.op.as_str(),
                    question_id = outcome.question_id,
                    %error,
                    "answer could not be persisted"
                );
                self.advisory = Some(format!(
                    "Your answer was kept locally but could not be saved: {}",
                    error
                ));
            }
        }
    }

    fn persist(&self, op: PersistOp, answer: Answer) -> Effect {
        Effect::Persist(PersistRequest {
            run: self.run,
            op,
            answer,
        })
    }
}

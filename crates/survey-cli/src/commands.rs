use survey_spec::{Intent, Mode, Question, QuestionKind, Session};

/// What the runner should do with a line typed by the respondent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Apply(Intent),
    /// Ask again, showing the message.
    Reprompt(String),
    /// Input was consumed by the presentation layer itself.
    Nothing,
}

/// Turns typed lines into intents. Holds the UI-only first-name buffer
/// while a full-name answer is being edited.
#[derive(Debug, Default)]
pub struct LineInterpreter {
    edit_first: Option<String>,
}

impl LineInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an edit of the full-name question is waiting for the last
    /// name.
    pub fn editing_last_name(&self) -> bool {
        self.edit_first.is_some()
    }

    pub fn interpret(&mut self, session: &Session, line: &str) -> Action {
        let input = line.trim();
        if input.eq_ignore_ascii_case(":dismiss") {
            return Action::Apply(Intent::DismissAdvisory);
        }

        match session.mode() {
            Mode::Asking => self.asking(session, input),
            Mode::Complete => match input.to_lowercase().as_str() {
                "review" | "r" => Action::Apply(Intent::EnterReview),
                "restart" => Action::Apply(Intent::Restart(true)),
                "quit" | "q" | "exit" => Action::Apply(Intent::Restart(false)),
                _ => Action::Reprompt("Type review, restart or quit.".into()),
            },
            Mode::Reviewing => match input.to_lowercase().as_str() {
                "" | "next" | "n" => Action::Apply(Intent::ReviewNext),
                "edit" | "e" => Action::Apply(Intent::BeginEdit),
                _ => Action::Reprompt("Type next or edit.".into()),
            },
            Mode::Editing => self.editing(session, input),
            Mode::Exiting => Action::Apply(Intent::Exit),
        }
    }

    fn asking(&mut self, session: &Session, input: &str) -> Action {
        if input.eq_ignore_ascii_case(":back") {
            return Action::Apply(Intent::GoPrevious);
        }
        let value = if input.is_empty() {
            session.buffers().active().to_string()
        } else {
            input.to_string()
        };
        match session.current_question() {
            Some(question) => resolve_for(question, value),
            None => Action::Nothing,
        }
    }

    fn editing(&mut self, session: &Session, input: &str) -> Action {
        if input.eq_ignore_ascii_case(":cancel") {
            self.edit_first = None;
            return Action::Apply(Intent::CancelEdit);
        }
        let buffers = session.buffers();
        let question = session
            .review_answer()
            .and_then(|answer| session.catalog().find(answer.question_id));

        if question.is_some_and(Question::is_composite_name) {
            return match self.edit_first.take() {
                None => {
                    let first = or_buffer(input, &buffers.primary);
                    if first.is_empty() {
                        return Action::Reprompt("First name cannot be empty.".into());
                    }
                    self.edit_first = Some(first);
                    Action::Nothing
                }
                Some(first) => Action::Apply(Intent::SaveEdit {
                    value: first,
                    last: Some(or_buffer(input, &buffers.secondary)),
                }),
            };
        }

        let value = or_buffer(input, &buffers.primary);
        match question {
            Some(question) => match resolve_for(question, value) {
                Action::Apply(Intent::Submit(value)) => {
                    Action::Apply(Intent::SaveEdit { value, last: None })
                }
                other => other,
            },
            None => Action::Apply(Intent::SaveEdit { value, last: None }),
        }
    }
}

fn or_buffer(input: &str, buffer: &str) -> String {
    if input.is_empty() {
        buffer.to_string()
    } else {
        input.to_string()
    }
}

/// Builds a submit for `question`, mapping choice input onto an option.
fn resolve_for(question: &Question, value: String) -> Action {
    match &question.kind {
        QuestionKind::Choice { options } if !value.trim().is_empty() => {
            match resolve_choice(options, &value) {
                Some(option) => Action::Apply(Intent::Submit(option)),
                None => Action::Reprompt(format!("Choose one of: {}.", options.join(", "))),
            }
        }
        _ => Action::Apply(Intent::Submit(value)),
    }
}

/// Accepts an option by name (case-insensitive) or by 1-based number.
pub fn resolve_choice(options: &[String], raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Some(option) = options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(raw))
    {
        return Some(option.clone());
    }
    raw.parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| options.get(index))
        .cloned()
}

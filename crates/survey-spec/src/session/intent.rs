/// User intents emitted by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Answer the current question (or the current composite-name part).
    Submit(String),
    GoPrevious,
    EnterReview,
    ReviewNext,
    BeginEdit,
    /// Save the edit buffer. `last` carries the last name for the
    /// composite-name question and is ignored otherwise.
    SaveEdit {
        value: String,
        last: Option<String>,
    },
    CancelEdit,
    /// `true` starts over, `false` leaves the survey.
    Restart(bool),
    Exit,
    DismissAdvisory,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Submit(_) => "submit",
            Intent::GoPrevious => "go_previous",
            Intent::EnterReview => "enter_review",
            Intent::ReviewNext => "review_next",
            Intent::BeginEdit => "begin_edit",
            Intent::SaveEdit { .. } => "save_edit",
            Intent::CancelEdit => "cancel_edit",
            Intent::Restart(_) => "restart",
            Intent::Exit => "exit",
            Intent::DismissAdvisory => "dismiss_advisory",
        }
    }
}

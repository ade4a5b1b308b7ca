use serde_json::{Map, Value, json};

use crate::session::{Mode, NameStage, Session};
use crate::spec::question::QuestionKind;

/// Progress counters exposed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// The question currently being asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPrompt {
    /// 1-based position in the catalog.
    pub position: usize,
    pub question_id: i64,
    pub text: String,
    pub kind: QuestionKind,
    /// Set for the composite-name question.
    pub name_stage: Option<NameStage>,
    /// Prefilled input for the prompt.
    pub value: String,
    pub can_go_back: bool,
}

impl RenderPrompt {
    pub fn label(&self) -> String {
        match self.name_stage {
            Some(NameStage::First) => format!("{} (first name)", self.text),
            Some(NameStage::Last) => format!("{} (last name)", self.text),
            None => self.text.clone(),
        }
    }
}

/// The answer shown during the review pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReview {
    /// 1-based position in the review pass.
    pub position: usize,
    pub total: usize,
    pub question_id: i64,
    pub question_text: String,
    pub value: String,
    pub composite_name: bool,
    /// Edit buffers, present while editing.
    pub edit: Option<(String, String)>,
}

/// Projection of a session used by both text and JSON renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPayload {
    pub mode: Mode,
    pub progress: RenderProgress,
    pub prompt: Option<RenderPrompt>,
    pub review: Option<RenderReview>,
    pub advisory: Option<String>,
}

/// Build the renderer payload from the session.
pub fn build_render_payload(session: &Session) -> RenderPayload {
    let prompt = session.current_question().map(|question| {
        let buffers = session.buffers();
        let name_stage = question.is_composite_name().then_some(buffers.name_stage);
        RenderPrompt {
            position: session.current_index() + 1,
            question_id: question.id,
            text: question.text.clone(),
            kind: question.kind.clone(),
            name_stage,
            value: buffers.active().to_string(),
            can_go_back: session.current_index() > 0,
        }
    });

    let review = session.review_answer().map(|answer| {
        let composite_name = session
            .catalog()
            .find(answer.question_id)
            .is_some_and(|question| question.is_composite_name());
        let edit = (session.mode() == Mode::Editing).then(|| {
            let buffers = session.buffers();
            (buffers.primary.clone(), buffers.secondary.clone())
        });
        RenderReview {
            position: session.review_index() + 1,
            total: session.answers().len(),
            question_id: answer.question_id,
            question_text: answer.question_text.clone(),
            value: answer.value.clone(),
            composite_name,
            edit,
        }
    });

    RenderPayload {
        mode: session.mode(),
        progress: RenderProgress {
            answered: session.answers().len(),
            total: session.catalog().len(),
        },
        prompt,
        review,
        advisory: session.advisory().map(str::to_string),
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let prompt = payload.prompt.as_ref().map(|prompt| {
        let mut map = Map::new();
        map.insert("position".into(), json!(prompt.position));
        map.insert("question_id".into(), json!(prompt.question_id));
        map.insert("text".into(), Value::String(prompt.text.clone()));
        map.insert("type".into(), Value::String(prompt.kind.label().into()));
        if let QuestionKind::Choice { options } = &prompt.kind {
            map.insert("options".into(), json!(options));
        }
        if let Some(stage) = prompt.name_stage {
            map.insert("part".into(), Value::String(stage_label(stage).into()));
        }
        map.insert("value".into(), Value::String(prompt.value.clone()));
        map.insert("can_go_back".into(), Value::Bool(prompt.can_go_back));
        Value::Object(map)
    });

    let review = payload.review.as_ref().map(|review| {
        let mut map = Map::new();
        map.insert("position".into(), json!(review.position));
        map.insert("total".into(), json!(review.total));
        map.insert("question_id".into(), json!(review.question_id));
        map.insert("question".into(), Value::String(review.question_text.clone()));
        map.insert("answer".into(), Value::String(review.value.clone()));
        if let Some((first, last)) = &review.edit {
            let edit = if review.composite_name {
                json!({ "first": first, "last": last })
            } else {
                json!({ "value": first })
            };
            map.insert("edit".into(), edit);
        }
        Value::Object(map)
    });

    json!({
        "mode": payload.mode.as_str(),
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "prompt": prompt,
        "review": review,
        "advisory": payload.advisory,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    if let Some(advisory) = &payload.advisory {
        lines.push(format!("! {}", advisory));
    }

    match payload.mode {
        Mode::Asking => {
            if let Some(prompt) = &payload.prompt {
                lines.push(format!(
                    "{}/{} {}",
                    prompt.position,
                    payload.progress.total,
                    prompt.label()
                ));
                if let QuestionKind::Choice { options } = &prompt.kind {
                    for (index, option) in options.iter().enumerate() {
                        lines.push(format!("  {}. {}", index + 1, option));
                    }
                }
                if !prompt.value.is_empty() {
                    lines.push(format!("  Current: {}", prompt.value));
                }
            }
        }
        Mode::Reviewing | Mode::Editing => {
            if let Some(review) = &payload.review {
                lines.push(format!(
                    "Review {}/{}: {}",
                    review.position, review.total, review.question_text
                ));
                lines.push(format!("  Answer: {}", review.value));
                if payload.mode == Mode::Editing {
                    lines.push("  Editing".to_string());
                }
            }
        }
        Mode::Complete => {
            lines.push(format!(
                "Survey complete ({}/{} answered).",
                payload.progress.answered, payload.progress.total
            ));
        }
        Mode::Exiting => lines.push("Thank you for taking the survey.".to_string()),
    }

    lines.join("\n")
}

fn stage_label(stage: NameStage) -> &'static str {
    match stage {
        NameStage::First => "first",
        NameStage::Last => "last",
    }
}

use std::io::{self, Write};

use clap::ValueEnum;
use survey_spec::{Answer, Mode, RenderPayload, render_json_ui, render_text};

/// Output format for each rendered state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    Text,
    Json,
}

/// Prints session state once the driver has applied an intent.
pub struct SessionPresenter {
    format: RenderMode,
    header_printed: bool,
    show_answers_json: bool,
}

impl SessionPresenter {
    pub fn new(format: RenderMode, show_answers_json: bool) -> Self {
        Self {
            format,
            header_printed: false,
            show_answers_json,
        }
    }

    pub fn show_header<W: Write>(&mut self, out: &mut W, total: usize) -> io::Result<()> {
        if self.header_printed {
            return Ok(());
        }
        writeln!(out, "Survey: {} questions", total)?;
        writeln!(out, "Type :back to return to the previous question.")?;
        self.header_printed = true;
        Ok(())
    }

    pub fn show_state<W: Write>(
        &self,
        out: &mut W,
        payload: &RenderPayload,
        editing_last_name: bool,
    ) -> io::Result<()> {
        match self.format {
            RenderMode::Text => writeln!(out, "{}", render_text(payload))?,
            RenderMode::Json => writeln!(out, "{}", render_json_ui(payload))?,
        }
        if let Some(hint) = hint(payload, editing_last_name) {
            writeln!(out, "{}", hint)?;
        }
        write!(out, "> ")?;
        out.flush()
    }

    pub fn show_message<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", message)
    }

    pub fn show_completion<W: Write>(&self, out: &mut W, answers: &[Answer]) -> io::Result<()> {
        if !self.show_answers_json {
            return Ok(());
        }
        let pretty = serde_json::to_string_pretty(answers).map_err(io::Error::other)?;
        writeln!(out, "{}", pretty)
    }

    /// Prints the closing state without asking for more input.
    pub fn show_farewell<W: Write>(&self, out: &mut W, payload: &RenderPayload) -> io::Result<()> {
        match self.format {
            RenderMode::Text => writeln!(out, "{}", render_text(payload))?,
            RenderMode::Json => writeln!(out, "{}", render_json_ui(payload))?,
        }
        writeln!(out, "Goodbye.")?;
        out.flush()
    }
}

fn hint(payload: &RenderPayload, editing_last_name: bool) -> Option<String> {
    match payload.mode {
        Mode::Asking => None,
        Mode::Complete => Some("Type review, restart or quit.".into()),
        Mode::Reviewing => Some("Type next or edit.".into()),
        Mode::Editing => {
            let composite = payload
                .review
                .as_ref()
                .is_some_and(|review| review.composite_name);
            let current = payload.review.as_ref().and_then(|review| review.edit.as_ref());
            let (label, value) = match (composite, editing_last_name, current) {
                (true, false, Some((first, _))) => ("First name", first.as_str()),
                (true, true, Some((_, last))) => ("Last name", last.as_str()),
                (_, _, Some((value, _))) => ("New answer", value.as_str()),
                (_, _, None) => ("New answer", ""),
            };
            Some(format!(
                "{} [{}] (empty keeps it, :cancel to stop):",
                label, value
            ))
        }
        Mode::Exiting => None,
    }
}

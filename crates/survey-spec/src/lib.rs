#![allow(missing_docs)]

pub mod render;
pub mod session;
pub mod spec;
pub mod validate;

pub use render::{
    RenderPayload, RenderProgress, RenderPrompt, RenderReview, build_render_payload,
    render_json_ui, render_text,
};
pub use session::{
    Effect, InputBuffers, Intent, Mode, NameStage, PersistOp, PersistRequest, Session,
    StoreOutcome, Transition,
};
pub use spec::{
    Answer, Catalog, CatalogError, Question, QuestionKind, QuestionRecord, QuestionType,
    join_full_name, split_full_name,
};
pub use validate::{CatalogIssue, non_empty};

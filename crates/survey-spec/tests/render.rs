use chrono::Utc;

use survey_spec::{
    Catalog, Intent, Mode, NameStage, Question, Session, StoreOutcome, build_render_payload,
    render_json_ui, render_text,
};

fn session() -> Session {
    Session::new(
        Catalog::new(vec![
            Question::composite_name(6, "What is your name?"),
            Question::choice(7, "Preferred contact", ["Email", "Phone"]),
        ])
        .expect("catalog"),
    )
}

#[test]
fn render_text_shows_name_part_and_progress() {
    let mut session = session();
    let payload = build_render_payload(&session);
    assert_eq!(payload.mode, Mode::Asking);
    let prompt = payload.prompt.as_ref().expect("prompt");
    assert_eq!(prompt.name_stage, Some(NameStage::First));
    assert!(!prompt.can_go_back);
    assert!(render_text(&payload).contains("1/2 What is your name? (first name)"));

    session.dispatch(Intent::Submit("Ada".into()));
    let text = render_text(&build_render_payload(&session));
    assert!(text.contains("(last name)"));
}

#[test]
fn render_text_lists_choice_options() {
    let mut session = session();
    session.dispatch(Intent::Submit("Ada".into()));
    session.dispatch(Intent::Submit("Lovelace".into()));
    let text = render_text(&build_render_payload(&session));
    assert!(text.contains("2/2 Preferred contact"));
    assert!(text.contains("  1. Email"));
    assert!(text.contains("  2. Phone"));
}

#[test]
fn render_json_ui_exposes_review_and_edit_buffers() {
    let mut session = session();
    session.dispatch(Intent::Submit("Ada".into()));
    session.dispatch(Intent::Submit("Lovelace".into()));
    session.dispatch(Intent::Submit("Email".into()));
    session.dispatch(Intent::EnterReview);
    session.dispatch(Intent::BeginEdit);

    let ui = render_json_ui(&build_render_payload(&session));
    assert_eq!(ui["mode"], "editing");
    assert_eq!(ui["progress"]["answered"], 2);
    assert!(ui["prompt"].is_null());
    assert_eq!(ui["review"]["question_id"], 6);
    assert_eq!(ui["review"]["answer"], "Ada Lovelace");
    assert_eq!(ui["review"]["edit"]["first"], "Ada");
    assert_eq!(ui["review"]["edit"]["last"], "Lovelace");
}

#[test]
fn advisory_is_rendered_until_dismissed() {
    let mut session = session();
    session.dispatch(Intent::Submit("Ada".into()));
    let transition = session.apply(Intent::Submit("Lovelace".into()), Utc::now());
    let request = transition.persist_requests().next().expect("request").clone();
    session.record_outcome(StoreOutcome::failed(&request, "HTTP 500"));

    let text = render_text(&build_render_payload(&session));
    assert!(text.starts_with("! "));
    assert!(text.contains("HTTP 500"));

    session.dispatch(Intent::DismissAdvisory);
    let ui = render_json_ui(&build_render_payload(&session));
    assert!(ui["advisory"].is_null());
}

#[test]
fn complete_screen_summarises_answers() {
    let mut session = session();
    for value in ["Ada", "Lovelace", "Phone"] {
        session.dispatch(Intent::Submit(value.into()));
    }
    let payload = build_render_payload(&session);
    assert!(payload.prompt.is_none());
    assert_eq!(render_text(&payload), "Survey complete (2/2 answered).");
}

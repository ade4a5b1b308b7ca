use chrono::{DateTime, Utc};

use survey_spec::{
    Answer, Catalog, Intent, Mode, NameStage, PersistOp, Question, Session, Transition,
};

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_557_600 + seconds, 0).expect("timestamp")
}

fn two_question_catalog() -> Catalog {
    Catalog::new(vec![
        Question::text(1, "What brings you here?"),
        Question::choice(2, "Pick one", ["A", "B"]),
    ])
    .expect("catalog")
}

fn survey_catalog() -> Catalog {
    Catalog::new(vec![
        Question::text(1, "Favourite season?"),
        Question::composite_name(6, "What is your name?"),
        Question::choice(7, "How did you hear about us?", ["Friend", "Web", "Other"]),
    ])
    .expect("catalog")
}

fn submit(session: &mut Session, value: &str, seconds: i64) -> Transition {
    session.apply(Intent::Submit(value.into()), at(seconds))
}

fn complete_survey(session: &mut Session) {
    submit(session, "autumn", 0);
    submit(session, "Alice", 1);
    submit(session, "Smith", 2);
    submit(session, "Web", 3);
    assert_eq!(session.mode(), Mode::Complete);
}

#[test]
fn two_question_scenario_completes_and_restarts() {
    let mut session = Session::new(two_question_catalog());

    submit(&mut session, "hello", 0);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.mode(), Mode::Asking);

    submit(&mut session, "A", 1);
    assert_eq!(session.mode(), Mode::Complete);
    let recorded = session
        .answers()
        .iter()
        .map(|answer| (answer.question_id, answer.value.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(recorded, vec![(1, "hello"), (2, "A")]);

    session.apply(Intent::Restart(true), at(2));
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.mode(), Mode::Asking);
    assert!(session.answers().is_empty());
}

#[test]
fn submit_issues_create_with_snapshot() {
    let mut session = Session::new(two_question_catalog());
    let transition = submit(&mut session, "  hello  ", 0);
    let requests = transition.persist_requests().collect::<Vec<_>>();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].op, PersistOp::Create);
    assert_eq!(
        requests[0].answer,
        Answer {
            question_id: 1,
            question_text: "What brings you here?".into(),
            value: "hello".into(),
            timestamp: at(0),
        }
    );
}

#[test]
fn blank_submit_changes_nothing() {
    let mut session = Session::new(survey_catalog());
    submit(&mut session, "autumn", 0);
    let before = (session.current_index(), session.mode(), session.answers().to_vec());

    for blank in ["", "   ", "\t\n"] {
        let transition = submit(&mut session, blank, 1);
        assert_eq!(transition, Transition::unchanged());
        assert_eq!(
            (session.current_index(), session.mode(), session.answers().to_vec()),
            before
        );
        assert_eq!(session.buffers().name_stage, NameStage::First);
    }
}

#[test]
fn blank_last_name_is_ignored() {
    let mut session = Session::new(survey_catalog());
    submit(&mut session, "autumn", 0);
    submit(&mut session, "Alice", 1);
    let transition = submit(&mut session, "  ", 2);
    assert!(!transition.changed);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.buffers().primary, "Alice");
    assert!(session.answer_for(6).is_none());
}

#[test]
fn composite_name_round_trips_through_back_navigation() {
    let mut session = Session::new(survey_catalog());
    submit(&mut session, "autumn", 0);
    submit(&mut session, "Alice", 1);
    let transition = submit(&mut session, "Smith", 2);

    assert_eq!(session.current_index(), 2);
    assert_eq!(session.answer_for(6).map(|a| a.value.as_str()), Some("Alice Smith"));
    assert_eq!(transition.persist_requests().count(), 1);

    session.apply(Intent::GoPrevious, at(3));
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.buffers().primary, "Alice");
    assert_eq!(session.buffers().secondary, "Smith");
    assert_eq!(session.buffers().active(), "Alice");

    submit(&mut session, "Alice", 4);
    assert_eq!(session.buffers().name_stage, NameStage::Last);
    assert_eq!(session.buffers().active(), "Smith");
    submit(&mut session, "Smith", 5);

    assert_eq!(session.current_index(), 2);
    assert_eq!(session.answers().len(), 2);
    assert_eq!(session.answer_for(6).map(|a| a.value.as_str()), Some("Alice Smith"));
}

#[test]
fn go_previous_rehydrates_plain_answer_and_never_touches_answers() {
    let mut session = Session::new(survey_catalog());
    submit(&mut session, "autumn", 0);
    let answers = session.answers().to_vec();

    session.apply(Intent::GoPrevious, at(1));
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.buffers().primary, "autumn");
    assert_eq!(session.answers(), answers.as_slice());

    let transition = session.apply(Intent::GoPrevious, at(2));
    assert!(!transition.changed);
    assert_eq!(session.current_index(), 0);
}

#[test]
fn go_previous_to_unanswered_question_clears_buffers() {
    let mut session = Session::new(survey_catalog());
    submit(&mut session, "autumn", 0);
    submit(&mut session, "Alice", 1);
    session.apply(Intent::GoPrevious, at(2));
    assert_eq!(session.current_index(), 0);
    submit(&mut session, "winter", 3);
    assert_eq!(session.current_index(), 1);
    assert!(session.buffers().is_empty());
    assert_eq!(session.buffers().name_stage, NameStage::First);
}

#[test]
fn resubmitting_replaces_in_place() {
    let mut session = Session::new(survey_catalog());
    submit(&mut session, "autumn", 0);
    session.apply(Intent::GoPrevious, at(1));
    submit(&mut session, "spring", 2);

    let for_question = session
        .answers()
        .iter()
        .filter(|answer| answer.question_id == 1)
        .collect::<Vec<_>>();
    assert_eq!(for_question.len(), 1);
    assert_eq!(for_question[0].value, "spring");
    assert_eq!(for_question[0].timestamp, at(2));
}

#[test]
fn answers_never_exceed_questions() {
    let mut session = Session::new(survey_catalog());
    let script = [
        "a", "b", "c", "<", "<", "d", "e", "f", "<", "g", "h", "i", "j",
    ];
    for (step, input) in script.iter().enumerate() {
        if *input == "<" {
            session.apply(Intent::GoPrevious, at(step as i64));
        } else {
            submit(&mut session, input, step as i64);
        }
        assert!(session.answers().len() <= session.catalog().len());
        let mut ids = session
            .answers()
            .iter()
            .map(|answer| answer.question_id)
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), session.answers().len());
    }
}

#[test]
fn review_pass_takes_exactly_one_step_per_answer() {
    let mut session = Session::new(survey_catalog());
    complete_survey(&mut session);

    session.apply(Intent::EnterReview, at(10));
    assert_eq!(session.mode(), Mode::Reviewing);
    assert_eq!(session.review_index(), 0);

    let total = session.answers().len();
    for step in 0..total {
        assert_eq!(session.mode(), Mode::Reviewing);
        assert!(session.review_index() <= total - 1);
        assert_eq!(session.review_index(), step);
        session.apply(Intent::ReviewNext, at(11));
    }
    assert_eq!(session.mode(), Mode::Complete);
}

#[test]
fn edit_replaces_value_and_keeps_identity() {
    let mut session = Session::new(survey_catalog());
    complete_survey(&mut session);
    session.apply(Intent::EnterReview, at(10));
    session.apply(Intent::BeginEdit, at(11));
    assert_eq!(session.mode(), Mode::Editing);
    assert_eq!(session.buffers().primary, "autumn");

    let transition = session.apply(
        Intent::SaveEdit {
            value: "summer".into(),
            last: None,
        },
        at(12),
    );

    let edited = &session.answers()[0];
    assert_eq!(edited.value, "summer");
    assert_eq!(edited.question_id, 1);
    assert_eq!(edited.question_text, "Favourite season?");
    assert_eq!(edited.timestamp, at(12));
    assert_eq!(session.mode(), Mode::Reviewing);
    assert_eq!(session.review_index(), 0);

    let request = transition.persist_requests().next().expect("update request");
    assert_eq!(request.op, PersistOp::Update);
    assert_eq!(&request.answer, edited);
}

#[test]
fn blank_edit_is_ignored() {
    let mut session = Session::new(survey_catalog());
    complete_survey(&mut session);
    session.apply(Intent::EnterReview, at(10));
    session.apply(Intent::BeginEdit, at(11));
    let transition = session.apply(
        Intent::SaveEdit {
            value: " ".into(),
            last: None,
        },
        at(12),
    );
    assert!(!transition.changed);
    assert_eq!(session.mode(), Mode::Editing);
    assert_eq!(session.answers()[0].value, "autumn");
}

#[test]
fn guards_reject_out_of_mode_intents() {
    let mut session = Session::new(survey_catalog());
    for intent in [
        Intent::EnterReview,
        Intent::ReviewNext,
        Intent::BeginEdit,
        Intent::CancelEdit,
        Intent::Restart(true),
        Intent::Restart(false),
        Intent::Exit,
        Intent::SaveEdit {
            value: "x".into(),
            last: Some("y".into()),
        },
    ] {
        assert_eq!(session.apply(intent, at(0)), Transition::unchanged());
        assert_eq!(session.mode(), Mode::Asking);
    }

    complete_survey(&mut session);
    assert!(!submit(&mut session, "late", 9).changed);
    assert!(!session.apply(Intent::GoPrevious, at(9)).changed);
    assert_eq!(session.answers().len(), 3);
}

#[test]
fn declining_restart_exits_and_exit_resets() {
    let mut session = Session::new(survey_catalog());
    complete_survey(&mut session);
    session.apply(Intent::Restart(false), at(10));
    assert_eq!(session.mode(), Mode::Exiting);

    let transition = session.apply(Intent::Exit, at(11));
    assert!(transition.ends_run());
    assert_eq!(session.mode(), Mode::Asking);
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
}

#[test]
fn restart_issues_no_remote_deletes() {
    // Remote answers survive a local restart; only local state is cleared.
    let mut session = Session::new(survey_catalog());
    complete_survey(&mut session);
    let transition = session.apply(Intent::Restart(true), at(10));
    assert!(transition.changed);
    assert!(transition.effects.is_empty());
}

#[test]
fn resume_seeds_answers_and_rehydrates_first_prompt() {
    let catalog = survey_catalog();
    let previous = vec![
        Answer {
            question_id: 1,
            question_text: "Favourite season?".into(),
            value: "winter".into(),
            timestamp: at(0),
        },
        Answer {
            question_id: 99,
            question_text: "Removed question".into(),
            value: "stale".into(),
            timestamp: at(1),
        },
        Answer {
            question_id: 1,
            question_text: "Favourite season?".into(),
            value: "spring".into(),
            timestamp: at(2),
        },
    ];
    let session = Session::resume(catalog, previous);
    assert_eq!(session.answers().len(), 1);
    assert_eq!(session.answers()[0].value, "spring");
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.mode(), Mode::Asking);
    assert_eq!(session.buffers().primary, "spring");
}

#[test]
fn stale_edit_and_newer_edit_both_issue_updates() {
    // Request ordering is not enforced; each update carries its own value
    // and timestamp and the store keeps whichever arrives last.
    let mut session = Session::new(survey_catalog());
    complete_survey(&mut session);
    session.apply(Intent::EnterReview, at(10));

    let mut issued = Vec::new();
    for (value, seconds) in [("summer", 11), ("spring", 13)] {
        session.apply(Intent::BeginEdit, at(seconds));
        let transition = session.apply(
            Intent::SaveEdit {
                value: value.into(),
                last: None,
            },
            at(seconds + 1),
        );
        issued.extend(transition.persist_requests().cloned());
    }

    assert_eq!(issued.len(), 2);
    assert!(issued.iter().all(|request| request.answer.question_id == 1));
    assert!(issued[0].answer.timestamp < issued[1].answer.timestamp);
    assert_eq!(session.answers()[0].value, "spring");
}

use std::io::{BufRead, Write};
use std::sync::Arc;

use survey_spec::{
    Effect, Intent, Mode, PersistRequest, Session, StoreOutcome, Transition, build_render_payload,
};
use survey_store::{AnswerStore, execute};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::CliResult;
use crate::commands::{Action, LineInterpreter};
use crate::presenter::SessionPresenter;

/// Owns the session and carries out the effects of its transitions.
///
/// Store calls run as background tasks; their outcomes are folded back into
/// the session the next time [`Driver::poll_outcomes`] or
/// [`Driver::settle`] runs. Calls for the same question are not ordered.
pub struct Driver {
    session: Session,
    store: Arc<dyn AnswerStore>,
    pending: JoinSet<()>,
    outcome_tx: UnboundedSender<StoreOutcome>,
    outcome_rx: UnboundedReceiver<StoreOutcome>,
}

impl Driver {
    pub fn new(session: Session, store: Arc<dyn AnswerStore>) -> Self {
        let (outcome_tx, outcome_rx) = unbounded_channel();
        Self {
            session,
            store,
            pending: JoinSet::new(),
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies the intent locally, then issues its store calls without
    /// waiting for them.
    pub fn apply(&mut self, intent: Intent) -> Transition {
        let transition = self.session.dispatch(intent);
        for effect in &transition.effects {
            match effect {
                Effect::Persist(request) => self.spawn_persist(request.clone()),
                Effect::EndOfRun => debug!("run ended"),
            }
        }
        transition
    }

    fn spawn_persist(&mut self, request: PersistRequest) {
        let store = Arc::clone(&self.store);
        let outcome_tx = self.outcome_tx.clone();
        self.pending.spawn(async move {
            let outcome = execute(store.as_ref(), &request).await;
            // The receiver only goes away with the driver.
            let _ = outcome_tx.send(outcome);
        });
    }

    /// Folds every outcome that has already arrived into the session.
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.session.record_outcome(outcome);
        }
        while let Some(result) = self.pending.try_join_next() {
            if let Err(err) = result {
                warn!(error = %err, "store task did not finish");
            }
        }
    }

    /// Waits for every in-flight store call and records its outcome.
    pub async fn settle(&mut self) {
        while let Some(result) = self.pending.join_next().await {
            if let Err(err) = result {
                warn!(error = %err, "store task did not finish");
            }
        }
        self.poll_outcomes();
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

/// Reads lines from `input` and drives the session until the respondent
/// exits or input ends. Outstanding store calls are awaited before
/// returning.
pub async fn run<R, W>(
    driver: &mut Driver,
    mut input: R,
    out: &mut W,
    presenter: &mut SessionPresenter,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    let mut interpreter = LineInterpreter::new();
    presenter.show_header(out, driver.session().catalog().len())?;

    loop {
        driver.poll_outcomes();

        if driver.session().mode() == Mode::Exiting {
            presenter.show_farewell(out, &build_render_payload(driver.session()))?;
            driver.apply(Intent::Exit);
            break;
        }

        let payload = build_render_payload(driver.session());
        presenter.show_state(out, &payload, interpreter.editing_last_name())?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed");
            writeln!(out)?;
            break;
        }

        match interpreter.interpret(driver.session(), &line) {
            Action::Apply(intent) => {
                let was_complete = driver.session().mode() == Mode::Complete;
                let transition = driver.apply(intent);
                if !was_complete && driver.session().mode() == Mode::Complete {
                    presenter.show_completion(out, driver.session().answers())?;
                }
                if transition.ends_run() {
                    break;
                }
            }
            Action::Reprompt(message) => presenter.show_message(out, &message)?,
            Action::Nothing => {}
        }
        tokio::task::yield_now().await;
    }

    debug!(in_flight = driver.in_flight(), "waiting for store calls");
    driver.settle().await;
    Ok(())
}

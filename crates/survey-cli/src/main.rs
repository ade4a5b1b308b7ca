mod commands;
mod logging;
mod presenter;
mod runner;

use std::io::{self, Write};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use logging::{LogConfig, init_logging};
use presenter::{RenderMode, SessionPresenter};
use runner::Driver;
use serde_json::json;
use survey_spec::{Answer, QuestionRecord, Session};
use survey_store::{AnswerStore, HttpAnswerStore, STORE_URL_ENV, StoreConfig, load_catalog};
use tracing::{info, warn};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Text-based survey runner",
    long_about = "Asks the questions served by an answer store one at a time and mirrors every answer back to it"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive survey session.
    Run {
        /// Base URL of the answer store.
        #[arg(long, value_name = "URL", env = STORE_URL_ENV)]
        store_url: Option<String>,
        /// Pre-fill the session with answers already held by the store.
        #[arg(long)]
        resume: bool,
        /// Render output mode for each step.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
        /// Print the collected answers as JSON when the survey completes.
        #[arg(long)]
        answers_json: bool,
        /// Increase log verbosity (-v, -vv, -vvv).
        #[arg(short, long, action = ArgAction::Count)]
        verbose: u8,
    },
    /// Print the question catalog served by the store.
    Questions {
        #[arg(long, value_name = "URL", env = STORE_URL_ENV)]
        store_url: Option<String>,
    },
    /// Print the answers currently held by the store.
    Answers {
        #[arg(long, value_name = "URL", env = STORE_URL_ENV)]
        store_url: Option<String>,
    },
    /// Print JSON Schemas for the question and answer records.
    Schema,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            store_url,
            resume,
            format,
            answers_json,
            verbose,
        } => {
            init_logging(&LogConfig::from_verbosity(verbose));
            run_survey(store_url, resume, format, answers_json).await
        }
        Command::Questions { store_url } => {
            init_logging(&LogConfig::default());
            run_questions(store_url).await
        }
        Command::Answers { store_url } => {
            init_logging(&LogConfig::default());
            run_answers(store_url).await
        }
        Command::Schema => run_schema(),
    }
}

fn connect(store_url: Option<String>) -> CliResult<HttpAnswerStore> {
    let config = StoreConfig::resolve(store_url);
    info!(store = %config.base_url, "using answer store");
    Ok(HttpAnswerStore::new(config)?)
}

async fn run_survey(
    store_url: Option<String>,
    resume: bool,
    format: RenderMode,
    answers_json: bool,
) -> CliResult<()> {
    let store = Arc::new(connect(store_url)?);
    let name_question_id = store.config().name_question_id;
    let catalog = load_catalog(store.as_ref(), name_question_id).await?;

    let session = if resume {
        match store.fetch_answers().await {
            Ok(previous) => Session::resume(catalog, previous),
            Err(err) => {
                warn!(error = %err, "could not fetch stored answers; starting fresh");
                Session::new(catalog)
            }
        }
    } else {
        Session::new(catalog)
    };

    let mut driver = Driver::new(session, store);
    let mut presenter = SessionPresenter::new(format, answers_json);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    runner::run(&mut driver, stdin.lock(), &mut stdout, &mut presenter).await
}

async fn run_questions(store_url: Option<String>) -> CliResult<()> {
    let store = connect(store_url)?;
    let catalog = load_catalog(&store, store.config().name_question_id).await?;
    let records = catalog
        .iter()
        .map(|question| question.to_record())
        .collect::<Vec<QuestionRecord>>();
    print_json(&serde_json::to_value(records)?)
}

async fn run_answers(store_url: Option<String>) -> CliResult<()> {
    let store = connect(store_url)?;
    let answers: Vec<Answer> = store.fetch_answers().await?;
    print_json(&serde_json::to_value(answers)?)
}

fn run_schema() -> CliResult<()> {
    let schemas = json!({
        "question": schemars::schema_for!(QuestionRecord),
        "answer": schemars::schema_for!(Answer),
    });
    print_json(&schemas)
}

fn print_json(value: &serde_json::Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

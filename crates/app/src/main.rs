mod args;
mod input;
mod render;
mod vm;

use std::sync::Arc;

use quiz_core::quiz::{QuizError, QuizState, Step};
use services::{Clock, HostEvent, QuizHost, QuizLoopService, QuizServiceError};
use storage::QuestionCatalog;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::args::{Args, Command, EnvDefaults, print_usage};
use crate::input::{HELP, Input};

fn load_catalog(args: &Args) -> Result<Arc<dyn QuestionCatalog>, Box<dyn std::error::Error>> {
    let catalog = match &args.catalog {
        Some(path) => {
            log::info!("loading question catalog from {}", path.display());
            storage::json::catalog_from_path(path)?
        }
        None => storage::sample::sample_catalog()?,
    };
    Ok(Arc::new(catalog))
}

fn show_intro(host: &QuizHost, language_name: &str) -> Result<(), QuizServiceError> {
    let text = host.with_session(|session| {
        render::intro(&vm::map_intro(session, language_name, host.settings()))
    })?;
    println!("{text}");
    Ok(())
}

fn show_question(host: &QuizHost) -> Result<(), QuizServiceError> {
    let text = host.with_session(|session| {
        vm::map_question(session, host.settings()).map(|question| render::question(&question))
    })?;
    if let Some(text) = text {
        println!("{text}");
    }
    Ok(())
}

fn show_results(host: &QuizHost) -> Result<(), QuizServiceError> {
    let text = host.with_session(|session| {
        render::results(&vm::map_results(session, host.settings()))
    })?;
    println!("{text}");
    Ok(())
}

fn show_current(host: &QuizHost, language_name: &str) -> Result<(), QuizServiceError> {
    match host.progress()?.state {
        QuizState::NotStarted => show_intro(host, language_name),
        QuizState::InProgress => show_question(host),
        QuizState::Completed => show_results(host),
    }
}

/// Apply one input. Returns `false` when the user asked to quit.
async fn handle_input(
    input: Input,
    host: &mut QuizHost,
    service: &QuizLoopService,
    language_name: &str,
) -> Result<bool, QuizServiceError> {
    let outcome = match input {
        Input::Quit => return Ok(false),
        Input::Help => {
            println!("{HELP}");
            Ok(())
        }
        Input::Languages => {
            let languages = service.languages().await?;
            println!("{}", render::languages(&languages));
            Ok(())
        }
        Input::Show => show_current(host, language_name),
        Input::Start => host.start().and_then(|()| show_question(host)),
        Input::Select(option) => host.select_answer(option).and_then(|()| show_question(host)),
        Input::Next if host.with_session(|s| s.is_in_progress() && !s.can_advance())? => {
            println!("! select an answer first");
            Ok(())
        }
        Input::Next => match host.advance() {
            // results are printed when the completion event arrives
            Ok(Step::Completed) => Ok(()),
            Ok(Step::Moved { .. }) => show_question(host),
            Ok(Step::Unchanged) => {
                println!("! the quiz is not running");
                Ok(())
            }
            Err(err) => Err(err),
        },
        Input::Previous => host.retreat().and_then(|_| show_question(host)),
        Input::Filter(filter) => host
            .set_filter(filter)
            .and_then(|()| show_intro(host, language_name)),
        Input::Restart => host.restart().and_then(|()| show_intro(host, language_name)),
    };

    match outcome {
        Ok(()) => Ok(true),
        Err(QuizServiceError::Quiz(QuizError::AlreadyStarted)) => {
            println!("! quiz already in progress; press r to start over");
            Ok(true)
        }
        Err(QuizServiceError::Quiz(err)) => {
            println!("! {err}");
            Ok(true)
        }
        Err(err) => Err(err),
    }
}

fn handle_event(event: HostEvent, host: &QuizHost) -> Result<(), QuizServiceError> {
    match event {
        HostEvent::Tick { remaining_secs } => {
            let urgent = host.settings().urgent_secs();
            let announce = if remaining_secs < urgent {
                remaining_secs % 60 == 0 || remaining_secs == 30 || remaining_secs == 10
            } else {
                remaining_secs % 300 == 0
            };
            if announce && remaining_secs > 0 {
                println!("[time left {}]", vm::format_countdown(remaining_secs));
            }
            Ok(())
        }
        HostEvent::Completed(summary) => {
            log::info!(
                "attempt completed: language={} score={}% elapsed={}s",
                summary.language(),
                summary.score().percentage(),
                summary.elapsed_secs()
            );
            show_results(host)
        }
    }
}

async fn run_quiz(service: QuizLoopService, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let language_name = match service.language(&args.language).await {
        Ok(language) => language.name().to_string(),
        Err(QuizServiceError::Storage(storage::StorageError::NotFound)) => {
            log::warn!("language {} is not in the catalog", args.language);
            args.language.to_string()
        }
        Err(err) => return Err(err.into()),
    };

    let (mut host, mut events) = service.open_host(&args.language, args.filter).await?;
    show_intro(&host, &language_name)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Input::parse(&line) {
                    Ok(input) => {
                        if !handle_input(input, &mut host, &service, &language_name).await? {
                            break;
                        }
                    }
                    Err(err) => println!("! {err}"),
                }
            }
            Some(event) = events.recv() => handle_event(event, &host)?,
            else => break,
        }
    }

    host.close();
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), EnvDefaults::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let catalog = load_catalog(&args)?;
    let service = QuizLoopService::new(Clock::system(), args.settings, catalog);

    match args.command {
        Command::Languages => {
            let languages = service.languages().await?;
            print!("{}", render::languages(&languages));
            Ok(())
        }
        Command::Quiz => run_quiz(service, &args).await,
        Command::Help => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

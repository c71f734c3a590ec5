use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossbeam_channel::Receiver;

use car_trivia::config::{Profile, CAR_CHOICES};
use car_trivia::engine::QuizEngine;
use car_trivia::error::{AppResult, EngineError};
use car_trivia::messaging::{EventBus, QuizEvent};
use car_trivia::questions::QuestionBank;
use car_trivia::scheduler::{AdvanceDue, TimerScheduler};
use car_trivia::stats::StatsStore;
use car_trivia::ui::ConsoleUi;

struct Args {
    questions_path: Option<PathBuf>,
    car: Option<String>,
}

fn parse_args() -> AppResult<Args> {
    let mut args = Args {
        questions_path: None,
        car: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--questions" => {
                let path = iter.next().context("--questions requires a file path")?;
                args.questions_path = Some(PathBuf::from(path));
            }
            "--car" => {
                let glyph = iter.next().context("--car requires a glyph")?;
                args.car = Some(glyph);
            }
            "--help" | "-h" => {
                println!("Usage: car-trivia [--questions <path>] [--car <glyph>]");
                println!("  --questions <path>  Play a custom question file (JSON)");
                println!("  --car <glyph>       Pick your car: {}", CAR_CHOICES.join(" "));
                std::process::exit(0);
            }
            other => {
                anyhow::bail!("Unknown argument: {} (try --help)", other);
            }
        }
    }

    Ok(args)
}

fn initialize_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("car_trivia=info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> AppResult<()> {
    initialize_tracing();

    let args = parse_args()?;

    let mut profile = Profile::load().unwrap_or_else(|e| {
        tracing::warn!("Could not load profile, using defaults: {:#}", e);
        Profile::default()
    });

    if let Some(glyph) = &args.car {
        profile
            .select_car(glyph)
            .with_context(|| format!("valid cars are: {}", CAR_CHOICES.join(" ")))?;
        profile.save().context("failed to save profile")?;
    }

    // A failed load disables the start action: we print the diagnostic
    // and exit instead of entering the round loop.
    let bank = match &args.questions_path {
        Some(path) => QuestionBank::load(path),
        None => QuestionBank::load_embedded(),
    };
    let bank = match bank {
        Ok(bank) => Arc::new(bank),
        Err(e) => {
            tracing::error!("Question load failed: {:#}", anyhow::Error::new(e));
            eprintln!("Failed to load questions. Check the file path or format.");
            std::process::exit(1);
        }
    };

    let stats = StatsStore::open().context("failed to open stats store")?;

    let (tick_tx, tick_rx) = crossbeam_channel::unbounded();
    let bus = EventBus::new();
    let (events, _subscription) = bus.subscribe();

    let ui = ConsoleUi::new(Arc::clone(&bank), profile.selected_car.clone());
    let mut engine = QuizEngine::new(
        bank,
        stats,
        bus,
        Box::new(TimerScheduler::new(tick_tx)),
        Duration::from_millis(profile.reveal_delay_ms),
    );
    drain_events(&events, &ui);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        ui.render_start_screen(engine.stats());
        print!("\nPress Enter to start (q to quit): ");
        io::stdout().flush()?;

        match lines.next() {
            Some(Ok(line)) if line.trim().eq_ignore_ascii_case("q") => break,
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e.into()),
            None => break,
        }

        engine.start()?;
        drain_events(&events, &ui);

        while !engine.state().is_finished() {
            if engine.state().is_awaiting_answer() {
                let count = engine
                    .current_question()
                    .map(|q| q.answers.len())
                    .unwrap_or(0);
                print!("\nYour answer [1-{}]: ", count);
                io::stdout().flush()?;

                let Some(line) = lines.next() else { return Ok(()) };
                let line = line?;

                match line.trim().parse::<usize>() {
                    Ok(n) if n >= 1 => match engine.submit_answer(n - 1) {
                        Ok(_) => drain_events(&events, &ui),
                        Err(EngineError::UnknownAnswer(_)) => {
                            println!("  Pick a number between 1 and {}.", count);
                        }
                        Err(e) => return Err(e.into()),
                    },
                    _ => println!("  Pick a number between 1 and {}.", count),
                }
            } else {
                // Locked: wait out the reveal delay
                match wait_for_tick(&tick_rx) {
                    Some(AdvanceDue) => {
                        engine.advance();
                        drain_events(&events, &ui);
                    }
                    None => return Ok(()),
                }
            }
        }

        print!("\nPlay again? [y/N]: ");
        io::stdout().flush()?;
        match lines.next() {
            Some(Ok(line)) if line.trim().eq_ignore_ascii_case("y") => {
                engine.restart()?;
            }
            _ => break,
        }
    }

    engine.shutdown();
    println!("\nThanks for playing!");
    Ok(())
}

fn wait_for_tick(ticks: &Receiver<AdvanceDue>) -> Option<AdvanceDue> {
    ticks.recv().ok()
}

fn drain_events(events: &Receiver<QuizEvent>, ui: &ConsoleUi) {
    for event in events.try_iter() {
        tracing::debug!("{}", event.description());
        ui.handle_event(&event);
    }
}

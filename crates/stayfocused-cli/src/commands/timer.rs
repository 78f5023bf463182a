use std::io::Write;

use clap::Subcommand;
use stayfocused_core::timer::display;
use stayfocused_core::{
    Cadence, Clock, Config, CountdownEngine, Event, HostSignal, ManualClock, PresetCatalog,
    RunPhase, ValidationError, Visibility,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

#[derive(Subcommand)]
pub enum TimerAction {
    /// List the configured presets
    Presets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a live countdown in the terminal
    Run {
        /// Preset key (defaults to the first configured preset)
        #[arg(long)]
        preset: Option<String>,
        /// Poll at the background cadence from the start
        #[arg(long)]
        background: bool,
    },
    /// Replay a run against simulated time and print the final state as JSON
    Simulate {
        /// Preset key
        #[arg(long)]
        preset: String,
        /// Seconds after start at which the state is sampled
        #[arg(long)]
        elapsed: u64,
        /// Pause at this many seconds after start
        #[arg(long)]
        pause_at: Option<u64>,
        /// Resume at this many seconds after start
        #[arg(long, requires = "pause_at")]
        resume_at: Option<u64>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;

    match action {
        TimerAction::Presets { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                for preset in catalog.iter() {
                    println!(
                        "{:<12} {:<20} {}",
                        preset.key,
                        preset.label,
                        display::format_clock(preset.seconds)
                    );
                }
            }
        }
        TimerAction::Run { preset, background } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_live(&config, catalog, preset, background))?;
        }
        TimerAction::Simulate {
            preset,
            elapsed,
            pause_at,
            resume_at,
        } => {
            let summary = simulate(catalog, &preset, elapsed, pause_at, resume_at)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn check_preset(catalog: &PresetCatalog, key: &str) -> Result<(), ValidationError> {
    if catalog.contains(key) {
        Ok(())
    } else {
        Err(ValidationError::UnknownPreset(key.to_string()))
    }
}

fn simulate(
    catalog: PresetCatalog,
    preset: &str,
    elapsed: u64,
    pause_at: Option<u64>,
    resume_at: Option<u64>,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    check_preset(&catalog, preset)?;
    let marks = [pause_at, resume_at, Some(elapsed)];
    if marks.iter().flatten().zip(marks.iter().flatten().skip(1)).any(|(a, b)| a > b) {
        return Err("--pause-at, --resume-at and --elapsed must be in order".into());
    }

    let clock = ManualClock::new(0);
    let finished = std::rc::Rc::new(std::cell::Cell::new(0u32));
    let counter = std::rc::Rc::clone(&finished);
    let mut engine = CountdownEngine::with_clock(catalog, clock.clone(), move || {
        counter.set(counter.get() + 1);
    });

    let mut events: Vec<Event> = Vec::new();
    events.extend(engine.select_preset(preset));
    events.extend(engine.start());
    if let Some(at) = pause_at {
        clock.set(at.saturating_mul(1000));
        events.extend(engine.stop());
    }
    if let Some(at) = resume_at {
        clock.set(at.saturating_mul(1000));
        events.extend(engine.start());
    }
    clock.set(elapsed.saturating_mul(1000));
    events.extend(engine.tick());

    tracing::debug!(now_ms = clock.now_ms(), events = events.len(), "simulation complete");
    Ok(serde_json::json!({
        "events": events,
        "snapshot": engine.snapshot(),
        "finish_count": finished.get(),
    }))
}

enum Command {
    Toggle,
    Reset,
    Fresh,
    Select(String),
    ToggleVisibility,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let cmd = match parts.next()? {
        "s" | "start" | "stop" => Command::Toggle,
        "r" | "reset" => Command::Reset,
        "f" | "fresh" => Command::Fresh,
        "p" | "preset" => Command::Select(parts.next()?.to_string()),
        "v" | "visibility" => Command::ToggleVisibility,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

fn print_help() {
    eprintln!("commands: s=start/stop  r=reset  f=start fresh  p <key>=preset  v=toggle visibility  q=quit");
}

fn render<C: Clock>(engine: &CountdownEngine<C>) {
    let label = &engine.selected_preset().label;
    let phase = match engine.phase() {
        RunPhase::Idle => "idle",
        RunPhase::Running => "running",
        RunPhase::Paused => "paused",
        RunPhase::Finished => "done",
    };
    let mut out = std::io::stdout();
    let _ = write!(
        out,
        "\r\x1b[2K{}  {}  [{}]",
        display::format_clock(engine.peek_remaining()),
        label,
        phase
    );
    let _ = out.flush();
}

async fn run_live(
    config: &Config,
    catalog: PresetCatalog,
    preset: Option<String>,
    background: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(key) = &preset {
        check_preset(&catalog, key)?;
    }

    let muted = config.sound.muted;
    let mut engine = CountdownEngine::new(catalog, move || {
        if !muted {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    });
    if let Some(key) = &preset {
        engine.select_preset(key);
    }

    let visibility = if background {
        Visibility::Hidden
    } else {
        Visibility::Visible
    };
    let mut cadence: Cadence = config.cadence().with_visibility(visibility);
    let mut ticker = tokio::time::interval(cadence.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    print_help();
    engine.start();
    render(&engine);

    loop {
        let signal = tokio::select! {
            _ = ticker.tick() => HostSignal::Interval,
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    if engine.phase() == RunPhase::Finished {
                        break;
                    }
                    continue;
                };
                match parse_command(&line) {
                    Some(Command::Toggle) => {
                        let event = if engine.needs_ticks() {
                            engine.stop()
                        } else {
                            engine.start()
                        };
                        report(event);
                        HostSignal::Interval
                    }
                    Some(Command::Reset) => {
                        engine.reset();
                        HostSignal::Interval
                    }
                    Some(Command::Fresh) => {
                        engine.start_fresh();
                        HostSignal::Interval
                    }
                    Some(Command::Select(key)) => {
                        match engine.select_preset(&key) {
                            None => eprintln!("\ncannot switch to '{key}' now"),
                            event => report(event),
                        }
                        HostSignal::Interval
                    }
                    Some(Command::ToggleVisibility) => {
                        let next = match cadence.visibility() {
                            Visibility::Visible => Visibility::Hidden,
                            Visibility::Hidden => Visibility::Visible,
                        };
                        HostSignal::VisibilityChanged(next)
                    }
                    Some(Command::Help) => {
                        print_help();
                        HostSignal::Interval
                    }
                    Some(Command::Quit) => break,
                    None => {
                        eprintln!("\nunknown command: {}", line.trim());
                        HostSignal::Interval
                    }
                }
            }
            _ = &mut ctrl_c => break,
        };

        handle(&mut engine, &mut cadence, &mut ticker, signal);
        render(&engine);

        if !stdin_open && engine.phase() == RunPhase::Finished {
            break;
        }
    }

    println!();
    Ok(())
}

/// Re-sync on a host signal, re-arming the ticker when the cadence changes.
fn handle<C: Clock>(
    engine: &mut CountdownEngine<C>,
    cadence: &mut Cadence,
    ticker: &mut tokio::time::Interval,
    signal: HostSignal,
) {
    let before = cadence.interval();
    report(engine.handle_signal(cadence, signal));
    if cadence.interval() != before {
        *ticker = tokio::time::interval(cadence.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    }
}

/// Announce the end of a run, whichever call observed it.
fn report(event: Option<Event>) {
    if let Some(Event::TimerFinished { preset, .. }) = event {
        println!("\r\x1b[2K{preset}: time's up!");
    }
}

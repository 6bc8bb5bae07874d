use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use pomodoro_core::storage::{load_settings, FileStore};
use pomodoro_core::{
    Command, Controller, KeyValueStore, SystemClock, TerminalBell, TimerMode, TimerState,
    WorkerChannel,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

const HELP: &str = "commands: start [focus|short|long] | pause | resume | reset | skip | status | quit";

#[derive(Args)]
pub struct RunArgs {
    /// Start this mode right away (focus, short, long)
    #[arg(long)]
    start: Option<TimerMode>,
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Command(Command),
    Status,
    Help,
    Quit,
    Empty,
}

fn parse_line(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Empty);
    };
    let arg = words.next();

    let input = match verb.to_ascii_lowercase().as_str() {
        "start" | "s" => Input::Command(Command::Start(arg.map(str::parse::<TimerMode>).transpose()?)),
        "pause" | "p" => Input::Command(Command::Pause),
        "resume" | "r" => Input::Command(Command::Resume),
        "reset" => Input::Command(Command::Reset),
        "skip" | "n" => Input::Command(Command::Skip),
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(input)
}

fn describe(state: &TimerState) -> String {
    match (state.mode, state.pending_next_mode) {
        (TimerMode::Idle, Some(next)) => {
            format!("idle, next: {} ({})", next.label(), state.formatted_remaining())
        }
        (TimerMode::Idle, None) => "idle".to_string(),
        (mode, _) => format!(
            "{} {} {}",
            mode.label(),
            state.formatted_remaining(),
            if state.is_running { "running" } else { "paused" }
        ),
    }
}

/// Print transitions, plus the remaining time once a minute.
async fn print_snapshots(mut snapshots: watch::Receiver<TimerState>) {
    let mut last = snapshots.borrow_and_update().clone();
    while snapshots.changed().await.is_ok() {
        let state = snapshots.borrow_and_update().clone();
        let transition = state.mode != last.mode
            || state.is_running != last.is_running
            || state.pending_next_mode != last.pending_next_mode;
        let minute_mark = state.is_running
            && state.time_remaining_seconds != last.time_remaining_seconds
            && state.time_remaining_seconds % 60 == 0;
        if transition || minute_mark {
            println!("{}", describe(&state));
        }
        last = state;
    }
}

async fn drive(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;
    tracing::debug!(dir = %store.dir().display(), "using data directory");
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let settings = load_settings(store.as_ref());
    let controller = Controller::from_store(
        WorkerChannel::new(),
        store,
        Box::new(TerminalBell::from_settings(&settings)),
        Arc::new(SystemClock),
    );
    let snapshots = controller.snapshots();
    let (commands, rx) = mpsc::channel(32);

    let driver = tokio::spawn(controller.run(rx));
    let printer = tokio::spawn(print_snapshots(snapshots.clone()));

    if let Some(mode) = args.start {
        commands.send(Command::Start(Some(mode))).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Input::Command(command)) => {
                if commands.send(command).await.is_err() {
                    break;
                }
            }
            Ok(Input::Status) => {
                let state = snapshots.borrow().clone();
                println!(
                    "{} (completed: {}, cycle: {})",
                    describe(&state),
                    state.completed_focus_count,
                    state.current_cycle_index
                );
            }
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::Quit) => break,
            Ok(Input::Empty) => {}
            Err(message) => eprintln!("{message}\n{HELP}"),
        }
    }

    // The controller may already be gone if the engine failed.
    let _ = commands.send(Command::Shutdown).await;
    driver.await??;
    printer.await?;
    Ok(())
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(args));
    // Stdin reads happen on a blocking thread that may never return.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("start"), Ok(Input::Command(Command::Start(None))));
        assert_eq!(
            parse_line("start long"),
            Ok(Input::Command(Command::Start(Some(TimerMode::LongBreak))))
        );
        assert_eq!(parse_line("  PAUSE "), Ok(Input::Command(Command::Pause)));
        assert_eq!(parse_line("skip"), Ok(Input::Command(Command::Skip)));
        assert_eq!(parse_line("q"), Ok(Input::Quit));
        assert_eq!(parse_line(""), Ok(Input::Empty));
        assert!(parse_line("start nap").is_err());
        assert!(parse_line("jump").is_err());
    }

    #[test]
    fn describes_states() {
        let mut state = TimerState::new();
        assert_eq!(describe(&state), "idle");

        state.pending_next_mode = Some(TimerMode::ShortBreak);
        state.time_remaining_seconds = 300;
        assert!(describe(&state).ends_with("(05:00)"));

        state.mode = TimerMode::Focus;
        state.pending_next_mode = None;
        state.time_remaining_seconds = 1499;
        state.is_running = false;
        assert!(describe(&state).ends_with("24:59 paused"));
    }
}

use std::io::BufRead;
use std::sync::Arc;

use clap::Args;
use robocross_core::announcer::LogSpeaker;
use robocross_core::{
    Announcer, Config, DuckingFlag, Event, PlaybackEngine, PlaybackHandle, PlaybackRunner,
    Routine, RunMode,
};
use tokio::sync::mpsc;

use super::build::{build_routine, print_summary, BuildArgs};

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub build: BuildArgs,
    /// Tick period in milliseconds (1-999)
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// Log announcements instead of speaking them
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    PlayPause,
    Reset,
    Quit,
}

fn parse_key(line: &str) -> Option<Key> {
    match line.trim() {
        "p" | "" => Some(Key::PlayPause),
        "r" => Some(Key::Reset),
        "q" => Some(Key::Quit),
        _ => None,
    }
}

/// Read keys on a plain thread; a blocking stdin read cannot be cancelled.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<Key> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_key(&line) {
                Some(key) => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                None => eprintln!("keys: p = play/pause, r = reset, q = quit"),
            }
        }
    });
    rx
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if let Some(tick_ms) = args.tick_ms {
        config.playback.tick_period_ms = tick_ms;
    }
    config.playback.validate()?;

    let routine = build_routine(&args.build, &config)?;
    print_summary(&routine);

    let announcer = if args.quiet {
        Announcer::new(Arc::new(LogSpeaker))
    } else {
        Announcer::from_config(&config.announcer)
    };
    let engine = PlaybackEngine::new(config.playback.clone(), DuckingFlag::new())?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(play_routine(engine, announcer, routine))
}

async fn play_routine(
    engine: PlaybackEngine,
    announcer: Announcer,
    routine: Routine,
) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, events, task) = PlaybackRunner::spawn(engine, announcer);
    handle.load(routine)?;
    handle.toggle_play_pause()?;

    let result = drive(&handle, events, spawn_stdin_reader()).await;
    let _ = handle.shutdown();
    task.await?;
    result
}

/// Print events until the workout completes or the user quits.
async fn drive(
    handle: &PlaybackHandle,
    mut events: mpsc::UnboundedReceiver<Event>,
    mut keys: mpsc::UnboundedReceiver<Key>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("keys: p = play/pause, r = reset, q = quit");
    let mut segment_count = 0;
    let mut keys_open = true;

    loop {
        tokio::select! {
            key = keys.recv(), if keys_open => match key {
                Some(Key::PlayPause) => handle.toggle_play_pause()?,
                Some(Key::Reset) => handle.reset()?,
                Some(Key::Quit) => return Ok(()),
                // stdin closed; keep playing
                None => keys_open = false,
            },
            event = events.recv() => {
                let Some(event) = event else {
                    return Ok(());
                };
                match event {
                    Event::RoutineLoaded { segment_count: count, message, .. } => {
                        segment_count = count;
                        println!("{message}");
                    }
                    Event::RunModeChanged { mode, .. } => match mode {
                        RunMode::Playing => println!("▶ playing"),
                        RunMode::Paused => println!("⏸ paused"),
                    },
                    Event::SegmentChanged { index, segment, .. } => {
                        println!(
                            "[{}/{}] {} ({}s) {}",
                            index + 1,
                            segment_count,
                            segment.name,
                            segment.duration_secs,
                            segment.description
                        );
                    }
                    Event::NotificationFired { time_key, name, .. } => {
                        println!("{time_key}  {name}");
                    }
                    Event::PlaybackReset { .. } => println!("reset"),
                    Event::WorkoutComplete { total_duration_nice, message, .. } => {
                        println!("{message} ({total_duration_nice})");
                        return Ok(());
                    }
                    Event::SpeechRequested { .. }
                    | Event::SpeechFinished { .. }
                    | Event::StateSnapshot { .. } => {}
                }
            }
        }
    }
}

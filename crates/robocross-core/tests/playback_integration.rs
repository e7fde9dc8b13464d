//! Integration tests for playback.
//!
//! Drives the engine tick by tick through whole routines, and the async
//! runner on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use robocross_core::announcer::LogSpeaker;
use robocross_core::{
    Announcer, Catalog, CoreError, DuckingFlag, Event, PlaybackConfig, PlaybackEngine,
    PlaybackRunner, Routine, RoutineBuilder, RoutineConfig, RoutineParams, RunMode, WorkoutType,
};

fn build(params: RoutineParams) -> Routine {
    let catalog = Catalog::builtin();
    let config = RoutineConfig::default();
    RoutineBuilder::new(&catalog, &config)
        .build(&params, Some(7))
        .unwrap()
}

fn five_minute_routine() -> Routine {
    build(RoutineParams {
        interval_secs: 60,
        workout_length_min: 5,
        minimum_rest_secs: 30,
        workout_type: WorkoutType::Mixed,
        ..RoutineParams::default()
    })
}

fn engine() -> PlaybackEngine {
    PlaybackEngine::new(PlaybackConfig::default(), DuckingFlag::new()).unwrap()
}

/// Acknowledge speech immediately, the way a very fast speaker would.
fn acknowledge(engine: &mut PlaybackEngine, events: &[Event], spoken: &mut Vec<String>) {
    for event in events {
        if let Event::SpeechRequested { text, generation, .. } = event {
            spoken.push(text.clone());
            engine.speech_finished(*generation);
        }
    }
}

#[test]
fn test_full_simulated_playback() {
    let routine = five_minute_routine();
    assert_eq!(routine.len(), 6);
    assert_eq!(routine.actual_rest_secs(), 40);
    assert_eq!(routine.total_secs(), 300);
    let names: Vec<String> = routine.segments().iter().map(|s| s.name.clone()).collect();

    let mut engine = engine();
    engine.load(routine).unwrap();

    let mut all = engine.toggle_play_pause();
    let mut spoken = Vec::new();
    acknowledge(&mut engine, &all, &mut spoken);

    let mut ticks = 0;
    while !engine.is_finished() {
        ticks += 1;
        assert!(ticks <= 6000, "workout did not finish in time");
        let events = engine.tick();
        acknowledge(&mut engine, &events, &mut spoken);
        all.extend(events);
    }
    assert_eq!(ticks, 6000);

    let changes: Vec<usize> = all
        .iter()
        .filter_map(|e| match e {
            Event::SegmentChanged { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![0, 1, 2, 3, 4, 5]);

    let completions: Vec<&Event> = all
        .iter()
        .filter(|e| matches!(e, Event::WorkoutComplete { .. }))
        .collect();
    assert_eq!(completions.len(), 1);
    match completions[0] {
        Event::WorkoutComplete {
            total_duration_nice,
            message,
            ..
        } => {
            assert_eq!(total_duration_nice, "5 minutes");
            assert_eq!(message, "5.00 Minute Workout Complete");
        }
        _ => unreachable!(),
    }

    let fired: Vec<(String, String)> = all
        .iter()
        .filter_map(|e| match e {
            Event::NotificationFired { time_key, name, .. } => Some((time_key.clone(), name.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(fired.len(), 7);
    assert_eq!(fired[0], ("00:00:00".to_string(), names[0].clone()));
    assert_eq!(fired[1], ("00:01:00".to_string(), "rest period".to_string()));
    assert_eq!(fired[6], ("00:05:00".to_string(), "end of workout".to_string()));

    let config = PlaybackConfig::default();
    assert_eq!(
        spoken,
        vec![
            format!("resting for 40 seconds; coming up: {}", names[2]),
            format!("starting {}", names[2]),
            format!("resting for 40 seconds; coming up: {}", names[4]),
            format!("starting {}", names[4]),
            config.cooldown_message.clone(),
            config.complete_announcement.clone(),
        ]
    );

    assert_eq!(engine.run_mode(), RunMode::Paused);
    assert_eq!(engine.elapsed_display(), "00:00:00");
    assert!(!engine.is_ducked());
}

#[test]
fn test_replay_after_completion() {
    let mut engine = engine();
    engine
        .load(build(RoutineParams {
            workout_type: WorkoutType::Test,
            ..RoutineParams::default()
        }))
        .unwrap();

    for _ in 0..2 {
        let mut spoken = Vec::new();
        let events = engine.toggle_play_pause();
        acknowledge(&mut engine, &events, &mut spoken);
        assert_eq!(engine.current_index(), Some(0));

        let mut ticks = 0;
        while !engine.is_finished() {
            ticks += 1;
            let events = engine.tick();
            acknowledge(&mut engine, &events, &mut spoken);
        }
        // 8 + 4 + 8 + 4 seconds at 50ms
        assert_eq!(ticks, 480);
        assert_eq!(
            spoken.first().map(String::as_str),
            Some("resting for 4 seconds; coming up: cool-down stretch")
        );
    }
}

#[derive(Debug, Clone)]
enum Action {
    Toggle,
    Tick(u16),
    Reset,
    Speech,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Toggle),
        6 => (1u16..400).prop_map(Action::Tick),
        1 => Just(Action::Reset),
        2 => Just(Action::Speech),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn playback_state_stays_consistent(actions in proptest::collection::vec(action(), 1..40)) {
        let mut engine = engine();
        engine.load(build(RoutineParams {
            interval_secs: 5,
            workout_length_min: 1,
            minimum_rest_secs: 5,
            workout_type: WorkoutType::FullyRandom,
            ..RoutineParams::default()
        })).unwrap();
        let len = engine.routine().len();

        for action in actions {
            match action {
                Action::Toggle => {
                    let before = engine.run_mode();
                    engine.toggle_play_pause();
                    prop_assert_ne!(before, engine.run_mode());
                }
                Action::Reset => {
                    engine.reset();
                    prop_assert_eq!(engine.run_mode(), RunMode::Paused);
                    prop_assert_eq!(engine.current_index(), None);
                    prop_assert_eq!(engine.elapsed_display(), "00:00:00");
                    prop_assert!(!engine.is_ducked());
                }
                Action::Speech => {
                    let generation = engine.generation();
                    engine.speech_finished(generation);
                    prop_assert!(!engine.is_ducked());
                }
                Action::Tick(n) => {
                    for _ in 0..n {
                        let paused = engine.run_mode() == RunMode::Paused;
                        let elapsed = engine.elapsed_display();
                        let events = engine.tick();
                        if paused {
                            prop_assert!(events.is_empty());
                            prop_assert_eq!(engine.elapsed_display(), elapsed);
                        }
                        let changes = events
                            .iter()
                            .filter(|e| matches!(e, Event::SegmentChanged { .. }))
                            .count();
                        prop_assert!(changes <= 1);
                    }
                }
            }

            let fraction = engine.progress_fraction();
            prop_assert!((0.0..=1.0).contains(&fraction));
            if let Some(index) = engine.current_index() {
                prop_assert!(index < len);
            }
            if engine.run_mode() == RunMode::Playing {
                prop_assert!(engine.current_index().is_some());
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_runner_plays_test_routine_in_virtual_time() {
    let routine = build(RoutineParams {
        workout_type: WorkoutType::Test,
        ..RoutineParams::default()
    });
    let ducking = DuckingFlag::new();
    let engine = PlaybackEngine::new(PlaybackConfig::default(), ducking.clone()).unwrap();
    let announcer = Announcer::new(Arc::new(LogSpeaker));
    let (handle, mut events, task) = PlaybackRunner::spawn(engine, announcer);

    handle.load(routine).unwrap();
    handle.toggle_play_pause().unwrap();

    let collected = tokio::time::timeout(Duration::from_secs(120), async {
        let mut collected = Vec::new();
        while let Some(event) = events.recv().await {
            let done = matches!(event, Event::WorkoutComplete { .. });
            collected.push(event);
            if done {
                break;
            }
        }
        collected
    })
    .await
    .expect("workout should complete in virtual time");

    let changes = collected
        .iter()
        .filter(|e| matches!(e, Event::SegmentChanged { .. }))
        .count();
    assert_eq!(changes, 4);
    assert!(collected
        .iter()
        .any(|e| matches!(e, Event::RoutineLoaded { segment_count: 4, .. })));

    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.is_finished);
    assert_eq!(snapshot.run_mode, RunMode::Paused);
    assert_eq!(snapshot.segment_count, 4);

    handle.shutdown().unwrap();
    task.await.unwrap();
    assert!(matches!(
        handle.snapshot().await,
        Err(CoreError::PlaybackStopped)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_runner_reports_failed_build() {
    let engine = engine();
    let (handle, mut events, task) =
        PlaybackRunner::spawn(engine, Announcer::new(Arc::new(LogSpeaker)));

    let err = robocross_core::BuildError::ZeroSegments {
        interval_secs: 120,
        workout_length_min: 1,
        minimum_rest_secs: 30,
    };
    handle.load_failed(err).unwrap();

    match events.recv().await {
        Some(Event::RoutineLoaded {
            segment_count,
            message,
            ..
        }) => {
            assert_eq!(segment_count, 0);
            assert!(message.starts_with("Workout too short"));
        }
        other => panic!("unexpected event {other:?}"),
    }

    // nothing to play
    handle.toggle_play_pause().unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.run_mode, RunMode::Paused);
    assert_eq!(snapshot.segment, None);

    drop(handle);
    task.await.unwrap();
}

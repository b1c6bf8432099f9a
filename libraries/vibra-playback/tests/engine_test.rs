//! Integration tests for the playback engine
//!
//! Drives the engine through real playback scenarios by scripting the
//! device callbacks the way a platform shell would.

use std::sync::{Arc, Mutex};

use vibra_core::traits::SessionRecorder;
use vibra_core::types::{ArtistId, Track, TrackId};
use vibra_playback::{
    EngineState, NullDevice, PlaybackConfig, PlaybackEngine, PlaybackEvent, Platform, QueuePlan,
    RepeatMode, UnlockGate, UnlockProbe,
};

// ===== Test Helpers =====

type Reports = Arc<Mutex<Vec<(String, u8)>>>;

/// Recorder that captures every report for inspection
struct SpyRecorder {
    reports: Reports,
}

fn spy_recorder() -> (Arc<SpyRecorder>, Reports) {
    let reports = Reports::default();
    let recorder = Arc::new(SpyRecorder {
        reports: Arc::clone(&reports),
    });
    (recorder, reports)
}

impl SessionRecorder for SpyRecorder {
    fn record(&self, track_id: &TrackId, completed_percentage: u8) {
        self.reports
            .lock()
            .unwrap()
            .push((track_id.as_str().to_string(), completed_percentage));
    }
}

/// Recorder whose backend always fails; from the engine's side this is
/// indistinguishable from success, which is exactly the contract
struct DeafRecorder;

impl SessionRecorder for DeafRecorder {
    fn record(&self, _track_id: &TrackId, _completed_percentage: u8) {
        // Network rejected the report; nothing to surface
    }
}

struct LockedProbe;

impl UnlockProbe for LockedProbe {
    fn try_activate(&self) -> bool {
        false
    }
}

fn track(id: &str, duration_secs: u32) -> Track {
    let mut t = Track::new(format!("Track {id}"), ArtistId::new("artist-1"), "Artist");
    t.id = TrackId::new(id);
    t.duration_secs = duration_secs;
    t.media_url = format!("https://cdn.example.com/{id}.mp3");
    t.cover_url = format!("https://cdn.example.com/{id}.jpg");
    t
}

fn abc_plan() -> QueuePlan {
    QueuePlan {
        tracks: vec![track("A", 200), track("B", 150), track("C", 90)],
        start_index: 0,
    }
}

fn engine_with(
    config: PlaybackConfig,
    gate: UnlockGate,
    recorder: Arc<dyn SessionRecorder>,
) -> PlaybackEngine {
    PlaybackEngine::new(config, Box::new(NullDevice::new()), Arc::new(gate), recorder)
}

fn desktop_engine(config: PlaybackConfig) -> PlaybackEngine {
    engine_with(config, UnlockGate::desktop(), Arc::new(DeafRecorder))
}

/// Start playback of the queue's current track and report device readiness
fn start(engine: &mut PlaybackEngine) {
    engine.play().expect("play");
    let generation = engine.generation();
    engine.device_ready(generation);
}

// ===== Auto-advance scenarios =====

#[test]
fn natural_completion_advances_to_next_track() {
    let mut engine = desktop_engine(PlaybackConfig {
        repeat: RepeatMode::All,
        ..Default::default()
    });
    engine.set_queue(abc_plan());
    start(&mut engine);
    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "A");

    engine.device_ended(engine.generation());

    let current = engine.get_current_track().unwrap();
    assert_eq!(current.id.as_str(), "B");
    assert_eq!(engine.get_position(), 0.0);
    assert_eq!(engine.get_duration(), 150.0);
    assert_eq!(engine.get_state(), EngineState::Loading);

    engine.device_ready(engine.generation());
    assert_eq!(engine.get_state(), EngineState::Playing);
}

#[test]
fn repeat_one_restarts_the_same_track() {
    let mut engine = desktop_engine(PlaybackConfig {
        repeat: RepeatMode::One,
        ..Default::default()
    });
    let mut plan = abc_plan();
    plan.start_index = 1;
    engine.set_queue(plan);
    start(&mut engine);
    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "B");

    engine.device_ended(engine.generation());

    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "B");
    assert_eq!(engine.get_position(), 0.0);
    assert_eq!(engine.queue().cursor(), Some(1));
}

#[test]
fn repeat_all_wraps_past_the_last_track() {
    let mut engine = desktop_engine(PlaybackConfig {
        repeat: RepeatMode::All,
        ..Default::default()
    });
    let mut plan = abc_plan();
    plan.start_index = 2;
    engine.set_queue(plan);
    start(&mut engine);

    engine.device_ended(engine.generation());

    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "A");
    assert_eq!(engine.queue().cursor(), Some(0));
}

#[test]
fn repeat_off_stops_after_the_last_track() {
    let mut engine = desktop_engine(PlaybackConfig::default());
    let mut plan = abc_plan();
    plan.start_index = 2;
    engine.set_queue(plan);
    start(&mut engine);
    engine.take_events();

    engine.device_ended(engine.generation());

    assert_eq!(engine.get_state(), EngineState::Idle);
    assert!(engine.get_current_track().is_none());
    // Queue survives exhaustion; a later play() starts over from the cursor
    assert_eq!(engine.queue().len(), 3);

    let events = engine.take_events();
    assert!(events.contains(&PlaybackEvent::QueueExhausted));
}

#[test]
fn position_reaching_duration_counts_as_completion() {
    let mut engine = desktop_engine(PlaybackConfig {
        repeat: RepeatMode::All,
        ..Default::default()
    });
    engine.set_queue(abc_plan());
    start(&mut engine);

    engine.device_position(engine.generation(), 200.0);

    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "B");
}

// ===== Manual transport =====

#[test]
fn manual_next_bypasses_repeat_one() {
    let mut engine = desktop_engine(PlaybackConfig {
        repeat: RepeatMode::One,
        ..Default::default()
    });
    engine.set_queue(abc_plan());
    start(&mut engine);

    engine.next().unwrap();
    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "B");
}

#[test]
fn manual_next_wraps_with_repeat_off() {
    let mut engine = desktop_engine(PlaybackConfig::default());
    let mut plan = abc_plan();
    plan.start_index = 2;
    engine.set_queue(plan);
    start(&mut engine);

    engine.next().unwrap();
    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "A");
}

#[test]
fn previous_wraps_backwards() {
    let mut engine = desktop_engine(PlaybackConfig::default());
    engine.set_queue(abc_plan());
    start(&mut engine);

    engine.previous().unwrap();
    assert_eq!(engine.get_current_track().unwrap().id.as_str(), "C");
}

#[test]
fn transport_on_empty_queue_errors() {
    let mut engine = desktop_engine(PlaybackConfig::default());
    assert!(engine.play().is_err());
    assert!(engine.next().is_err());
    assert!(engine.previous().is_err());
}

#[test]
fn empty_plan_keeps_previous_queue() {
    let mut engine = desktop_engine(PlaybackConfig::default());
    engine.set_queue(abc_plan());

    engine.set_queue(QueuePlan {
        tracks: Vec::new(),
        start_index: 0,
    });

    assert_eq!(engine.queue().len(), 3);
    assert_eq!(engine.queue().cursor(), Some(0));
}

#[test]
fn toggle_play_pause_round_trip() {
    let mut engine = desktop_engine(PlaybackConfig::default());
    engine.set_queue(abc_plan());
    start(&mut engine);
    assert_eq!(engine.get_state(), EngineState::Playing);

    engine.toggle_play_pause().unwrap();
    assert_eq!(engine.get_state(), EngineState::Paused);

    engine.toggle_play_pause().unwrap();
    assert_eq!(engine.get_state(), EngineState::Playing);
}

// ===== Autoplay gate =====

#[test]
fn locked_gate_parks_playback_paused() {
    let gate = UnlockGate::new(Platform::Mobile, Box::new(LockedProbe));
    let mut engine = engine_with(PlaybackConfig::default(), gate, Arc::new(DeafRecorder));
    engine.set_queue(abc_plan());

    engine.play().unwrap();
    engine.device_ready(engine.generation());

    assert_eq!(engine.get_state(), EngineState::Paused);
    let events = engine.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::AutoplayBlocked { track_id } if track_id.as_str() == "A")));
}

#[test]
fn playback_resumes_after_gesture_unlock() {
    let gate = Arc::new(UnlockGate::new(
        Platform::Mobile,
        Box::new(vibra_playback::AlwaysReadyProbe),
    ));
    let mut engine = PlaybackEngine::new(
        PlaybackConfig::default(),
        Box::new(NullDevice::new()),
        Arc::clone(&gate),
        Arc::new(DeafRecorder),
    );
    engine.set_queue(abc_plan());
    engine.play().unwrap();

    // Device becomes ready before any gesture: parked paused
    engine.device_ready(engine.generation());
    assert_eq!(engine.get_state(), EngineState::Paused);

    // First tap unlocks, second transport command starts audio
    let _arm = gate.arm();
    gate.notify_gesture(vibra_playback::GestureKind::TouchEnd);
    assert!(gate.is_unlocked());

    engine.play().unwrap();
    assert_eq!(engine.get_state(), EngineState::Playing);
}

// ===== Session recording =====

#[test]
fn play_start_and_natural_end_are_recorded() {
    let (recorder, reports) = spy_recorder();
    let mut engine = engine_with(
        PlaybackConfig {
            repeat: RepeatMode::All,
            ..Default::default()
        },
        UnlockGate::desktop(),
        recorder,
    );
    engine.set_queue(abc_plan());
    start(&mut engine);

    engine.device_ended(engine.generation());
    engine.device_ready(engine.generation());

    let reports = reports.lock().unwrap();
    // A started, A completed, B started
    assert_eq!(
        *reports,
        vec![
            ("A".to_string(), 0),
            ("A".to_string(), 100),
            ("B".to_string(), 0),
        ]
    );
}

#[test]
fn manual_skip_records_departure_percentage() {
    let (recorder, reports) = spy_recorder();
    let mut engine = engine_with(PlaybackConfig::default(), UnlockGate::desktop(), recorder);
    engine.set_queue(abc_plan());
    start(&mut engine);

    engine.device_position(engine.generation(), 100.0); // halfway through A (200s)
    engine.next().unwrap();

    let reports = reports.lock().unwrap();
    assert!(reports.contains(&("A".to_string(), 50)));
}

#[test]
fn recorder_failure_never_disturbs_playback() {
    let mut engine = engine_with(
        PlaybackConfig::default(),
        UnlockGate::desktop(),
        Arc::new(DeafRecorder),
    );
    engine.set_queue(abc_plan());
    start(&mut engine);

    engine.device_position(engine.generation(), 42.0);

    assert_eq!(engine.get_state(), EngineState::Playing);
    assert_eq!(engine.get_position(), 42.0);
}

// ===== Failure handling =====

#[test]
fn load_failure_does_not_rapid_fire_through_the_queue() {
    let (recorder, reports) = spy_recorder();
    let mut engine = engine_with(PlaybackConfig::default(), UnlockGate::desktop(), recorder);
    engine.set_queue(abc_plan());
    engine.play().unwrap();

    engine.device_failed(engine.generation(), "network error");

    assert_eq!(engine.get_state(), EngineState::Idle);
    assert!(engine.get_current_track().is_none());
    // No playback ever started, so nothing was recorded
    assert!(reports.lock().unwrap().is_empty());
}

#[test]
fn events_describe_the_transition_sequence() {
    let mut engine = desktop_engine(PlaybackConfig::default());
    engine.set_queue(abc_plan());
    engine.play().unwrap();
    engine.device_ready(engine.generation());

    let events = engine.take_events();
    let track_changes: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::TrackChanged { .. }))
        .collect();
    assert_eq!(track_changes.len(), 1);

    assert!(events.contains(&PlaybackEvent::QueueChanged { length: 3 }));
    assert!(events.contains(&PlaybackEvent::StateChanged {
        state: EngineState::Loading
    }));
    assert!(events.contains(&PlaybackEvent::StateChanged {
        state: EngineState::Playing
    }));

    // Draining leaves the buffer empty
    assert!(engine.take_events().is_empty());
}

// End-to-end behavior of the stopwatch through the public API
use stopwatch_core::{
    clock, Action, Controller, ElapsedTime, IdleMarkPolicy, ManualScheduler, RecordingDisplay,
    RunState, StopwatchConfig,
};

type Stopwatch = Controller<ManualScheduler, RecordingDisplay>;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn stopwatch() -> Stopwatch {
    init_logging();
    Controller::new(ManualScheduler::new(), RecordingDisplay::new())
}

/// Let `intervals` tick intervals pass: every timer still armed fires once per interval
fn advance(sw: &mut Stopwatch, intervals: usize) {
    for _ in 0..intervals {
        for handle in sw.scheduler().active_handles() {
            sw.on_tick(handle);
        }
    }
}

#[test]
fn start_ticks_pause_freezes() {
    let mut sw = stopwatch();
    sw.apply(Action::Start).unwrap();
    let timer = sw.active_timer().unwrap();
    advance(&mut sw, 437);
    sw.apply(Action::Pause).unwrap();

    assert_eq!(sw.elapsed().hundredths(), 437);
    assert_eq!(sw.run_state(), RunState::Paused);

    // Ticks already queued by the paused timer must not count.
    for _ in 0..1000 {
        assert!(!sw.on_tick(timer));
    }
    assert_eq!(sw.elapsed().hundredths(), 437);
    assert_eq!(sw.display().time, "00:00:04:37");
}

#[test]
fn continue_resumes_from_frozen_value() {
    let mut sw = stopwatch();
    sw.apply(Action::Toggle).unwrap();
    advance(&mut sw, 50);
    sw.apply(Action::Toggle).unwrap();
    advance(&mut sw, 50);
    sw.apply(Action::Continue).unwrap();
    advance(&mut sw, 50);

    assert_eq!(sw.run_state(), RunState::Running);
    assert_eq!(sw.elapsed().hundredths(), 100);
}

#[test]
fn double_start_does_not_double_cadence() {
    let mut sw = stopwatch();
    sw.apply(Action::Start).unwrap();
    sw.apply(Action::Start).unwrap();
    advance(&mut sw, 200);

    assert_eq!(sw.scheduler().active_handles().len(), 1);
    assert_eq!(sw.elapsed().hundredths(), 200);
}

#[test]
fn marks_are_sequential_snapshots() {
    let mut sw = stopwatch();
    sw.apply(Action::Start).unwrap();

    let mut expected = Vec::new();
    for k in 1..=5 {
        advance(&mut sw, k * 37);
        if k == 3 {
            sw.apply(Action::Pause).unwrap();
        }
        if k == 4 {
            sw.apply(Action::Continue).unwrap();
        }
        expected.push(sw.elapsed());
        sw.apply(Action::Mark).unwrap();
    }

    let marks = sw.marks();
    assert_eq!(marks.len(), 5);
    for (i, mark) in marks.iter().enumerate() {
        assert_eq!(mark.sequence, i + 1);
        assert_eq!(mark.captured, expected[i]);
    }
    assert_eq!(sw.display().marks.len(), 5);
    assert_eq!(
        sw.display().marks[0],
        format!("Mark 1: {}", clock::format(expected[0]))
    );
}

#[test]
fn marks_while_paused_capture_frozen_time() {
    let mut sw = stopwatch();
    sw.apply(Action::Start).unwrap();
    advance(&mut sw, 10);
    sw.apply(Action::Pause).unwrap();
    sw.apply(Action::Mark).unwrap();
    sw.apply(Action::Mark).unwrap();

    let captured: Vec<u64> = sw.marks().iter().map(|m| m.captured.hundredths()).collect();
    assert_eq!(captured, vec![10, 10]);
}

#[test]
fn reset_from_every_state() {
    for state in [RunState::Idle, RunState::Running, RunState::Paused] {
        let mut sw = stopwatch();
        let mut timer = None;
        if state != RunState::Idle {
            sw.apply(Action::Start).unwrap();
            timer = sw.active_timer();
            advance(&mut sw, 321);
            sw.apply(Action::Mark).unwrap();
        }
        if state == RunState::Paused {
            sw.apply(Action::Pause).unwrap();
        }
        assert_eq!(sw.run_state(), state);

        sw.apply(Action::Reset).unwrap();

        assert_eq!(sw.elapsed(), ElapsedTime::ZERO);
        assert!(sw.marks().is_empty());
        assert_eq!(sw.run_state(), RunState::Idle);
        assert_eq!(sw.display().time, "00:00:00:00");
        assert!(sw.display().marks.is_empty());
        assert!(sw.scheduler().active_handles().is_empty());

        if let Some(timer) = timer {
            for _ in 0..10 {
                assert!(!sw.on_tick(timer));
            }
        }
        assert_eq!(sw.elapsed(), ElapsedTime::ZERO);
        assert_eq!(sw.display().time, "00:00:00:00");
    }
}

#[test]
fn ticks_from_before_reset_are_dropped_after_restart() {
    let mut sw = stopwatch();
    sw.apply(Action::Start).unwrap();
    let old = sw.active_timer().unwrap();
    advance(&mut sw, 10);
    sw.apply(Action::Reset).unwrap();

    assert!(!sw.on_tick(old));
    assert_eq!(sw.elapsed(), ElapsedTime::ZERO);

    sw.apply(Action::Start).unwrap();
    let new = sw.active_timer().unwrap();
    assert_ne!(old, new);
    assert!(!sw.on_tick(old));
    assert!(sw.on_tick(new));
    assert_eq!(sw.elapsed().hundredths(), 1);
    assert_eq!(sw.display().time, "00:00:00:01");
}

#[test]
fn sequence_restarts_after_reset() {
    let mut sw = stopwatch();
    sw.apply(Action::Start).unwrap();
    sw.apply(Action::Mark).unwrap();
    sw.apply(Action::Mark).unwrap();
    sw.apply(Action::Reset).unwrap();
    sw.apply(Action::Start).unwrap();
    advance(&mut sw, 1);
    sw.apply(Action::Mark).unwrap();

    assert_eq!(sw.marks().len(), 1);
    assert_eq!(sw.marks()[0].sequence, 1);
    assert_eq!(sw.display().marks, vec!["Mark 1: 00:00:00:01".to_string()]);
}

#[test]
fn instances_are_independent() {
    let mut a = stopwatch();
    let mut b = stopwatch();
    a.apply(Action::Start).unwrap();
    advance(&mut a, 25);
    b.apply(Action::Mark).unwrap();

    assert_eq!(a.elapsed().hundredths(), 25);
    assert_eq!(b.elapsed(), ElapsedTime::ZERO);
    assert!(b.marks().is_empty());
}

#[test]
fn allow_policy_matches_unguarded_mark() {
    init_logging();
    let config = StopwatchConfig::new().with_idle_marks(IdleMarkPolicy::Allow);
    let mut sw = Controller::with_config(config, ManualScheduler::new(), RecordingDisplay::new());
    sw.apply(Action::Mark).unwrap();
    sw.apply(Action::Mark).unwrap();

    assert_eq!(
        sw.display().marks,
        vec!["Mark 1: 00:00:00:00".to_string(), "Mark 2: 00:00:00:00".to_string()]
    );
    assert_eq!(sw.run_state(), RunState::Idle);
}

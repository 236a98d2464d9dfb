use std::sync::Arc;

use timer_playlist::{
    ManualScheduler, Playback, Playlist, PlaylistRunner, RepeatPolicy, RunnerSnapshot, Timer,
};

fn runner(timers: Vec<Timer>, policy: RepeatPolicy) -> (PlaylistRunner, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let runner = PlaylistRunner::new(
        Playlist::new(timers).unwrap(),
        policy,
        Arc::new(scheduler.clone()),
    );
    (runner, scheduler)
}

fn two_timers() -> Vec<Timer> {
    vec![Timer::with_id("a", "A", 3, 2), Timer::with_id("b", "B", 4, 0)]
}

fn active_id(runner: &PlaylistRunner) -> Option<String> {
    runner.active_timer().map(|t| t.id.to_string())
}

#[test]
fn walkthrough_with_run_once_timer_allowed() {
    let (runner, ticks) = runner(two_timers(), RepeatPolicy::permissive());

    runner.start().unwrap();
    assert_eq!(active_id(&runner).as_deref(), Some("a"));
    assert_eq!(runner.elapsed(), 0);

    ticks.advance_by(3);
    assert_eq!((runner.cycles_completed(), runner.elapsed()), (1, 0));
    assert_eq!(active_id(&runner).as_deref(), Some("a"));

    ticks.advance_by(3);
    assert_eq!((runner.cycles_completed(), runner.elapsed()), (2, 0));
    assert_eq!(active_id(&runner).as_deref(), Some("a"));

    ticks.advance_by(3);
    assert_eq!(active_id(&runner).as_deref(), Some("b"));
    assert_eq!((runner.cycles_completed(), runner.elapsed()), (0, 0));
    assert_eq!(runner.playback(), Playback::Running);

    ticks.advance_by(4);
    assert_eq!(runner.playback(), Playback::Stopped);
    assert_eq!(runner.active_timer(), None);
}

#[test]
fn walkthrough_with_repeats_required() {
    let (runner, ticks) = runner(two_timers(), RepeatPolicy::require_repeats(1));

    runner.start().unwrap();
    ticks.advance_by(6);
    assert_eq!(runner.cycles_completed(), 2);

    ticks.advance_by(3);
    assert_eq!(runner.snapshot(), RunnerSnapshot::stopped());
}

#[test]
fn pause_resume_matches_uninterrupted_run() {
    for k in 0..3 {
        let (paused, paused_ticks) = runner(two_timers(), RepeatPolicy::permissive());
        let (straight, straight_ticks) = runner(two_timers(), RepeatPolicy::permissive());

        paused.start().unwrap();
        straight.start().unwrap();
        paused_ticks.advance_by(k);
        straight_ticks.advance_by(k);

        paused.pause().unwrap();
        paused_ticks.advance_by(5);
        paused.start().unwrap();

        assert_eq!(paused.elapsed(), k);
        assert_eq!(paused.snapshot(), straight.snapshot());
    }
}

#[test]
fn start_is_idempotent_while_running() {
    let (runner, ticks) = runner(two_timers(), RepeatPolicy::permissive());
    runner.start().unwrap();
    ticks.advance_by(4);
    let before = runner.snapshot();

    runner.start().unwrap();
    assert_eq!(runner.snapshot(), before);
    assert_eq!(ticks.pending(), 1);
}

#[test]
fn stop_resets_from_every_state() {
    let (runner, ticks) = runner(two_timers(), RepeatPolicy::permissive());

    runner.stop().unwrap();
    assert_eq!(runner.snapshot(), RunnerSnapshot::stopped());

    runner.start().unwrap();
    ticks.advance_by(5);
    runner.stop().unwrap();
    assert_eq!(runner.snapshot(), RunnerSnapshot::stopped());

    runner.start().unwrap();
    ticks.advance_by(1);
    runner.pause().unwrap();
    runner.stop().unwrap();
    assert_eq!(runner.snapshot(), RunnerSnapshot::stopped());
    assert_eq!(ticks.pending(), 0);
}

#[test]
fn empty_playlist_stays_idle() {
    let (runner, ticks) = runner(Vec::new(), RepeatPolicy::permissive());

    runner.start().unwrap();
    assert_eq!(runner.playback(), Playback::Stopped);
    assert_eq!(ticks.pending(), 0);
}

#[test]
fn tick_racing_with_pause_leaves_state_untouched() {
    let (runner, ticks) = runner(two_timers(), RepeatPolicy::permissive());
    runner.start().unwrap();
    ticks.advance_by(2);
    let before = runner.snapshot();

    let in_flight = ticks.take_pending();
    runner.pause().unwrap();
    for fire in in_flight {
        fire();
    }

    let after = runner.snapshot();
    assert_eq!(after.elapsed, before.elapsed);
    assert_eq!(after.cycles_completed, before.cycles_completed);
    assert_eq!(after.active, before.active);
    assert_eq!(after.playback, Playback::Paused);
}

#[test]
fn tick_racing_with_stop_cannot_revive_runner() {
    let (runner, ticks) = runner(two_timers(), RepeatPolicy::permissive());
    runner.start().unwrap();

    let in_flight = ticks.take_pending();
    runner.stop().unwrap();
    for fire in in_flight {
        fire();
    }

    assert_eq!(runner.snapshot(), RunnerSnapshot::stopped());
    assert_eq!(ticks.pending(), 0);
}

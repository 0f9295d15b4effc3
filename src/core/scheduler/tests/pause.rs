use rand::SeedableRng;
use rand::rngs::StdRng;

use super::segment;
use crate::core::scheduler::{SchedulerState, SegmentScheduler, SkipOutcome, TickOutcome};

#[test]
fn paused_ticks_leave_head_untouched() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut scheduler =
        SegmentScheduler::from_queues(vec![segment("A", 100)], vec![segment("B", 100)]);
    scheduler.tick(&mut rng);
    assert_eq!(scheduler.toggle_pause(), SchedulerState::Paused);

    for _ in 0..50 {
        assert_eq!(scheduler.tick(&mut rng), TickOutcome::Held);
        assert_eq!(scheduler.rundown()[0].remaining_seconds, 99);
    }
}

#[test]
fn resume_continues_countdown() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut scheduler = SegmentScheduler::from_queues(vec![segment("A", 10)], Vec::new());
    scheduler.toggle_pause();
    scheduler.tick(&mut rng);
    assert_eq!(scheduler.toggle_pause(), SchedulerState::Running);
    assert!(!scheduler.is_paused());
    scheduler.tick(&mut rng);
    assert_eq!(scheduler.rundown()[0].remaining_seconds, 9);
}

#[test]
fn skip_works_while_paused() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut scheduler = SegmentScheduler::from_queues(
        vec![segment("A", 10), segment("B", 10)],
        vec![segment("C", 10)],
    );
    scheduler.toggle_pause();
    assert!(matches!(scheduler.skip(&mut rng), SkipOutcome::Skipped(s) if s.title == "A"));
    assert!(scheduler.is_paused());
    assert_eq!(scheduler.rundown()[0].title, "B");
}

#[test]
fn paused_empty_rundown_still_reinitializes() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut scheduler = SegmentScheduler::new();
    scheduler.toggle_pause();
    assert_eq!(scheduler.tick(&mut rng), TickOutcome::Reinitialized);
    assert!(scheduler.is_paused());
}

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{segment, titles};
use crate::core::scheduler::{
    MAX_SEGMENT_SECONDS, MIN_SEGMENT_SECONDS, RUNDOWN_DEPTH, SEGMENT_TITLES, SegmentScheduler,
    SkipOutcome, TickOutcome, UPCOMING_DEPTH, create_segment,
};

fn lettered() -> SegmentScheduler {
    SegmentScheduler::from_queues(
        vec![segment("A", 120), segment("B", 120), segment("C", 120)],
        vec![
            segment("D", 120),
            segment("E", 120),
            segment("F", 120),
            segment("G", 120),
        ],
    )
}

#[test]
fn skip_promotes_upcoming_and_replenishes() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut scheduler = lettered();

    let outcome = scheduler.skip(&mut rng);
    match outcome {
        SkipOutcome::Skipped(seg) => assert_eq!(seg.title, "A"),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(titles(scheduler.rundown()), vec!["B", "C", "D"]);
    let upcoming = titles(scheduler.upcoming());
    assert_eq!(&upcoming[..3], &["E", "F", "G"]);
    assert!(SEGMENT_TITLES.contains(&upcoming[3]));
}

#[test]
fn completion_happens_exactly_at_zero() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut scheduler = SegmentScheduler::from_queues(
        vec![segment("A", 3), segment("B", 120)],
        vec![segment("C", 120)],
    );

    assert_eq!(scheduler.tick(&mut rng), TickOutcome::Counted);
    assert_eq!(scheduler.tick(&mut rng), TickOutcome::Counted);
    assert_eq!(scheduler.rundown()[0].remaining_seconds, 1);

    match scheduler.tick(&mut rng) {
        TickOutcome::Completed(done) => {
            assert_eq!(done.title, "A");
            assert_eq!(done.remaining_seconds, 0);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(titles(scheduler.rundown()), vec!["B", "C"]);
    assert_eq!(scheduler.upcoming().len(), 1);
}

#[test]
fn empty_rundown_reinitializes_on_tick() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut scheduler = SegmentScheduler::new();

    assert_eq!(scheduler.tick(&mut rng), TickOutcome::Reinitialized);
    assert_eq!(scheduler.rundown().len(), RUNDOWN_DEPTH);
    assert_eq!(scheduler.upcoming().len(), UPCOMING_DEPTH);
    for seg in scheduler.rundown() {
        assert_eq!(seg.remaining_seconds, seg.duration_seconds);
    }
}

#[test]
fn empty_rundown_reinitializes_on_skip() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut scheduler = SegmentScheduler::new();
    assert_eq!(scheduler.skip(&mut rng), SkipOutcome::Reinitialized);
    assert_eq!(scheduler.rundown().len(), RUNDOWN_DEPTH);
}

#[test]
fn exhausted_rundown_is_rebuilt_within_the_same_tick() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut scheduler = SegmentScheduler::from_queues(vec![segment("A", 1)], Vec::new());

    assert!(matches!(scheduler.tick(&mut rng), TickOutcome::Completed(s) if s.title == "A"));
    assert_eq!(scheduler.rundown().len(), RUNDOWN_DEPTH);
    assert_eq!(scheduler.upcoming().len(), UPCOMING_DEPTH);
}

#[test]
fn remaining_stays_within_bounds_over_long_runs() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut scheduler = SegmentScheduler::new();
    let mut completed = 0;
    for _ in 0..5_000 {
        if let TickOutcome::Completed(_) = scheduler.tick(&mut rng) {
            completed += 1;
        }
        assert!(!scheduler.rundown().is_empty());
        let head = &scheduler.rundown()[0];
        assert!(head.remaining_seconds <= head.duration_seconds);
        assert_eq!(scheduler.rundown().len(), RUNDOWN_DEPTH);
        assert_eq!(scheduler.upcoming().len(), UPCOMING_DEPTH);
    }
    assert!(completed > 0);
}

#[test]
fn generated_durations_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(8);
    for i in 0..500 {
        let seg = create_segment(&mut rng, i % 7);
        assert!((MIN_SEGMENT_SECONDS..=MAX_SEGMENT_SECONDS).contains(&seg.duration_seconds));
        assert_eq!(seg.remaining_seconds, seg.duration_seconds);
        assert_eq!(seg.start_time.len(), "HH:MM:SS".len());
    }
}

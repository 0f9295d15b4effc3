use std::collections::VecDeque;

use chrono::{Local, TimeDelta};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::state::SegmentEntry;

pub const RUNDOWN_DEPTH: usize = 3;
pub const UPCOMING_DEPTH: usize = 4;
pub const MIN_SEGMENT_SECONDS: u32 = 90;
pub const MAX_SEGMENT_SECONDS: u32 = 300;

pub const SEGMENT_TITLES: &[&str] = &[
    "Top of Hour Headlines",
    "Market Snapshot",
    "Tech Briefing",
    "Weather Update",
    "Live Reporter Hit",
    "Deep Dive Interview",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SchedulerState {
    Running,
    Paused,
}

/// What a single tick did, so the caller can log and publish accordingly.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The rundown was empty; both queues were rebuilt instead of ticking.
    Reinitialized,
    /// Paused: nothing moved.
    Held,
    /// The head segment lost one second and keeps airing.
    Counted,
    /// The head segment reached zero and left the rundown.
    Completed(SegmentEntry),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipOutcome {
    Reinitialized,
    Skipped(SegmentEntry),
}

/// Tick-driven rundown rotation.
///
/// `rundown` airs from its head; `upcoming` feeds it. Every completed or
/// skipped segment promotes the head of `upcoming` and a fresh segment is
/// appended to `upcoming`, so both queues keep their depth. A rundown that
/// runs dry is rebuilt in the same turn, never left empty.
#[derive(Debug, Clone)]
pub struct SegmentScheduler {
    state: SchedulerState,
    rundown: VecDeque<SegmentEntry>,
    upcoming: VecDeque<SegmentEntry>,
}

impl Default for SegmentScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Running,
            rundown: VecDeque::new(),
            upcoming: VecDeque::new(),
        }
    }

    pub fn from_queues(rundown: Vec<SegmentEntry>, upcoming: Vec<SegmentEntry>) -> Self {
        Self {
            state: SchedulerState::Running,
            rundown: rundown.into(),
            upcoming: upcoming.into(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == SchedulerState::Paused
    }

    pub fn rundown(&self) -> &VecDeque<SegmentEntry> {
        &self.rundown
    }

    pub fn upcoming(&self) -> &VecDeque<SegmentEntry> {
        &self.upcoming
    }

    pub fn snapshot(&self) -> (Vec<SegmentEntry>, Vec<SegmentEntry>) {
        (
            self.rundown.iter().cloned().collect(),
            self.upcoming.iter().cloned().collect(),
        )
    }

    /// Rebuild both queues from scratch. The pause state is left alone.
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rundown = (0..RUNDOWN_DEPTH).map(|i| create_segment(rng, i)).collect();
        self.upcoming = (0..UPCOMING_DEPTH)
            .map(|i| create_segment(rng, i + RUNDOWN_DEPTH))
            .collect();
    }

    pub fn toggle_pause(&mut self) -> SchedulerState {
        self.state = match self.state {
            SchedulerState::Running => SchedulerState::Paused,
            SchedulerState::Paused => SchedulerState::Running,
        };
        self.state
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if self.rundown.is_empty() {
            self.reinitialize(rng);
            return TickOutcome::Reinitialized;
        }
        if self.is_paused() {
            return TickOutcome::Held;
        }

        let Some(current) = self.rundown.front_mut() else {
            return TickOutcome::Held;
        };
        current.remaining_seconds = current.remaining_seconds.saturating_sub(1);
        if current.remaining_seconds > 0 {
            return TickOutcome::Counted;
        }

        match self.rotate(rng) {
            Some(finished) => TickOutcome::Completed(finished),
            None => TickOutcome::Counted,
        }
    }

    /// Force the head segment out without waiting for it to run down.
    /// Skipping is allowed while paused.
    pub fn skip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SkipOutcome {
        match self.rotate(rng) {
            Some(skipped) => SkipOutcome::Skipped(skipped),
            None => {
                self.reinitialize(rng);
                SkipOutcome::Reinitialized
            }
        }
    }

    fn rotate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SegmentEntry> {
        let finished = self.rundown.pop_front()?;
        if let Some(next) = self.upcoming.pop_front() {
            self.rundown.push_back(next);
        }
        let offset = self.upcoming.len();
        self.upcoming.push_back(create_segment(rng, offset));
        if self.rundown.is_empty() {
            self.reinitialize(rng);
        }
        Some(finished)
    }
}

/// Build a fresh segment with a random title and duration.
///
/// The start time is `now + duration * offset_index` using this segment's
/// own duration. Neighbouring segments draw different durations, so the
/// resulting start times are a display approximation and may overlap.
pub fn create_segment<R: Rng + ?Sized>(rng: &mut R, offset_index: usize) -> SegmentEntry {
    let title = SEGMENT_TITLES
        .choose(rng)
        .copied()
        .unwrap_or("Top of Hour Headlines");
    let duration = rng.gen_range(MIN_SEGMENT_SECONDS..=MAX_SEGMENT_SECONDS);
    let offset = TimeDelta::seconds(i64::from(duration) * offset_index as i64);
    let start_time = (Local::now() + offset).format("%H:%M:%S").to_string();
    SegmentEntry {
        title: title.to_string(),
        start_time,
        duration_seconds: duration,
        remaining_seconds: duration,
    }
}

#[cfg(test)]
mod tests;

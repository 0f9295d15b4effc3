use std::time::Duration;

/// Work the kernel wants done later, relative to when it was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    FinishEncoderRestart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredTask {
    pub delay: Duration,
    pub action: DeferredAction,
}

/// Fire-once tasks waiting to be handed to whatever drives the clock.
///
/// The kernel only enqueues; the runtime drains the queue after each turn
/// and feeds every action back once its delay has elapsed. Tests drain it
/// by hand to step through delayed work deterministically.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: Vec<DeferredTask>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, delay: Duration, action: DeferredAction) {
        self.tasks.push(DeferredTask { delay, action });
    }

    pub fn drain(&mut self) -> Vec<DeferredTask> {
        std::mem::take(&mut self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let mut queue = DeferredQueue::default();
        queue.schedule(Duration::from_secs(2), DeferredAction::FinishEncoderRestart);
        assert_eq!(queue.len(), 1);

        let tasks = queue.drain();
        assert_eq!(
            tasks,
            vec![DeferredTask {
                delay: Duration::from_secs(2),
                action: DeferredAction::FinishEncoderRestart,
            }]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}

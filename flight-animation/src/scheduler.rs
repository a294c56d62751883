use std::time::Duration;

/// Identifies a frame request or a deferred task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct PendingTimer<T> {
    handle: TaskHandle,
    due: Duration,
    task: T,
}

/// Cooperative scheduler driven by the host's frame loop.
///
/// It holds at most one frame request (the tick loop of the active flight)
/// plus any number of one-shot timers. Nothing runs on its own: the owner
/// drains it with [`Scheduler::take_frame`] and [`Scheduler::take_due`]
/// whenever the host renders a frame.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_handle: u64,
    frame: Option<TaskHandle>,
    timers: Vec<PendingTimer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            frame: None,
            timers: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> TaskHandle {
        self.next_handle += 1;
        TaskHandle(self.next_handle)
    }

    /// Asks for a callback on the next frame, superseding any earlier request.
    pub fn request_frame(&mut self) -> TaskHandle {
        let handle = self.allocate();
        self.frame = Some(handle);
        handle
    }

    /// Runs `task` once `delay` has elapsed after `now`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, task: T) -> TaskHandle {
        let handle = self.allocate();
        self.timers.push(PendingTimer {
            handle,
            due: now + delay,
            task,
        });
        handle
    }

    /// Cancels a frame request or a timer. Returns whether anything was pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if self.frame == Some(handle) {
            self.frame = None;
            return true;
        }

        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.frame = None;
        self.timers.clear();
    }

    /// Consumes the pending frame request, if any.
    pub fn take_frame(&mut self) -> Option<TaskHandle> {
        self.frame.take()
    }

    /// Removes and returns the timers due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|timer| timer.due <= now);
        self.timers = pending;

        due.sort_by_key(|timer| timer.due);
        due.into_iter().map(|timer| timer.task).collect()
    }

    pub fn has_frame_request(&self) -> bool {
        self.frame.is_some()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Nothing is requested or waiting.
    pub fn is_idle(&self) -> bool {
        self.frame.is_none() && self.timers.is_empty()
    }
}

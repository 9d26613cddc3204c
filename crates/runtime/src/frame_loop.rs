use foundation::time::Time;

use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Explicit start/stop lifecycle for a per-frame callback.
///
/// The browser drives it from animation frames; tests drive it with
/// `run_bounded` so a fixed number of frames runs deterministically.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    fixed_dt_s: f64,
    next: Frame,
    last_time: Option<Time>,
    frames_run: u64,
}

impl FrameLoop {
    pub fn new(fixed_dt_s: f64) -> Self {
        Self {
            state: LoopState::Stopped,
            fixed_dt_s,
            next: Frame::new(0, fixed_dt_s),
            last_time: None,
            frames_run: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Returns `true` if the loop was stopped and is now running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running;
        self.last_time = None;
        true
    }

    /// Returns `true` if the loop was running and is now stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = LoopState::Stopped;
        true
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Fixed-step advance. `None` when stopped.
    pub fn step(&mut self) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }
        let frame = self.next;
        self.next = frame.next();
        self.frames_run += 1;
        Some(frame)
    }

    /// Wall-clock advance from an animation-frame timestamp. The first frame
    /// after `start` uses the fixed step as its delta.
    pub fn step_at(&mut self, now: Time) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }
        let dt_s = match self.last_time {
            Some(prev) => now.since(prev),
            None => self.fixed_dt_s,
        };
        self.last_time = Some(now);
        let frame = Frame::at(self.next.index, dt_s, now);
        self.next = Frame::at(frame.index + 1, self.fixed_dt_s, now);
        self.frames_run += 1;
        Some(frame)
    }

    /// Run at most `frames` fixed steps, stopping early if `f` stops the
    /// loop through the returned flag. Returns how many frames ran.
    pub fn run_bounded<F>(&mut self, frames: usize, mut f: F) -> usize
    where
        F: FnMut(Frame) -> bool,
    {
        let mut ran = 0usize;
        for _ in 0..frames {
            let Some(frame) = self.step() else { break };
            ran += 1;
            if !f(frame) {
                self.stop();
                break;
            }
        }
        ran
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

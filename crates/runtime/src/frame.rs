use foundation::time::Time;

/// Frame metadata handed to per-frame work.
///
/// Fixed-step frames (`Frame::new`) are deterministic and replayable; the
/// browser loop uses `Frame::at` with the animation-frame timestamp.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time since the previous frame (seconds).
    pub dt_s: f64,
    /// Loop time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn at(index: u64, dt_s: f64, time: Time) -> Self {
        Self { index, dt_s, time }
    }

    pub fn next(self) -> Self {
        Self::at(self.index + 1, self.dt_s, Time(self.time.0 + self.dt_s))
    }
}

/// At-most-one-pending latch for per-frame coalescing.
///
/// Event handlers call `request`; only a `true` result should schedule an
/// animation frame. The frame callback calls `begin_frame` before reading
/// any state, so events arriving during the callback queue a fresh frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
    coalesced: u64,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> bool {
        if self.pending {
            self.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    /// Clears the latch. Returns whether a frame had been requested.
    pub fn begin_frame(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of requests dropped because a frame was already queued.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

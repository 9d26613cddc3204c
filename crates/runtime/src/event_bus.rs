use crate::frame::Frame;

/// One queued event, stamped with the frame it was raised on.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<T> {
    pub frame_index: u64,
    pub kind: &'static str,
    pub payload: T,
}

/// Single-consumer queue: producers `emit`, the owner `drain`s once per
/// flush. Nothing is retained after a drain.
#[derive(Debug)]
pub struct EventBus<T> {
    queued: Vec<Event<T>>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self { queued: Vec::new() }
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame: Frame, kind: &'static str, payload: T) {
        self.queued.push(Event {
            frame_index: frame.index,
            kind,
            payload,
        });
    }

    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    /// Everything emitted since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<Event<T>> {
        std::mem::take(&mut self.queued)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[test]
    fn drain_returns_events_in_order_and_empties_queue() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(2, 0.1), "status", 1u8);
        bus.emit(Frame::new(3, 0.1), "status", 2u8);
        assert_eq!(bus.pending(), 2);

        let drained = bus.drain();
        assert_eq!(
            drained.iter().map(|e| (e.frame_index, e.payload)).collect::<Vec<_>>(),
            vec![(2, 1), (3, 2)]
        );
        assert_eq!(bus.pending(), 0);
        assert!(bus.drain().is_empty());
    }
}

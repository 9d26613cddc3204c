use crate::config::StatusHideDelays;

/// Event-bus kind for user-visible status lines.
pub const STATUS_EVENT: &str = "status";

/// User-visible viewer status, mirrored into the status element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Initializing,
    Progress(String),
    Loaded,
    Fallback(String),
    Error(String),
}

impl Status {
    pub fn message(&self) -> String {
        match self {
            Status::Initializing => "Initializing 3D viewer...".to_string(),
            Status::Progress(line) => line.clone(),
            Status::Loaded => "✓ Model loaded successfully!".to_string(),
            Status::Fallback(reason) => format!("Using fallback geometry ({reason})"),
            Status::Error(message) => format!("ERROR: {message}"),
        }
    }

    /// Terminal statuses hide the element after a delay.
    pub fn hide_after_ms(&self, delays: &StatusHideDelays) -> Option<u32> {
        match self {
            Status::Loaded => Some(delays.loaded_ms),
            Status::Fallback(_) => Some(delays.fallback_ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Status;
    use crate::config::StatusHideDelays;

    #[test]
    fn terminal_statuses_hide() {
        let delays = StatusHideDelays::default();
        assert_eq!(Status::Loaded.hide_after_ms(&delays), Some(2000));
        assert_eq!(Status::Fallback("x".into()).hide_after_ms(&delays), Some(3000));
        assert_eq!(Status::Initializing.hide_after_ms(&delays), None);
        assert_eq!(Status::Error("no canvas".into()).message(), "ERROR: no canvas");
    }
}

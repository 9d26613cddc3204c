/// Byte progress of an in-flight transfer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LoadProgress {
    pub loaded: u64,
    /// Known only when the server sent a usable `Content-Length`.
    pub total: Option<u64>,
}

impl LoadProgress {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self {
            loaded,
            total: total.filter(|t| *t > 0),
        }
    }

    /// Percentage in `[0, 100]`, or `None` when the total is unknown.
    pub fn percent(&self) -> Option<f64> {
        let total = self.total?;
        Some((self.loaded as f64 / total as f64 * 100.0).min(100.0))
    }

    pub fn status_line(&self) -> Option<String> {
        self.percent()
            .map(|p| format!("Loading model: {:.0}%", p.floor()))
    }
}

#[cfg(test)]
mod tests {
    use super::LoadProgress;

    #[test]
    fn percent_requires_known_total() {
        assert_eq!(LoadProgress::new(10, None).percent(), None);
        assert_eq!(LoadProgress::new(10, Some(0)).percent(), None);
        assert_eq!(LoadProgress::new(25, Some(100)).percent(), Some(25.0));
    }

    #[test]
    fn overshoot_is_capped() {
        assert_eq!(LoadProgress::new(150, Some(100)).percent(), Some(100.0));
    }

    #[test]
    fn status_line_rounds_down() {
        let p = LoadProgress::new(999, Some(1000));
        assert_eq!(p.status_line().as_deref(), Some("Loading model: 99%"));
    }
}

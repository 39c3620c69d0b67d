/// Qualitative banding of percent-correct into a feedback message.
/// Display classification only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Bad,
    Ok,
    Good,
}

impl PerformanceTier {
    /// Band a percentage into a tier. 80 and up is Good, 60 and up is Ok.
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 80 {
            PerformanceTier::Good
        } else if percent >= 60 {
            PerformanceTier::Ok
        } else {
            PerformanceTier::Bad
        }
    }

    /// Feedback message shown with the score. A perfect run gets its own.
    pub fn message(&self, perfect: bool) -> &'static str {
        match (self, perfect) {
            (PerformanceTier::Good, true) => "Perfect score!",
            (PerformanceTier::Good, false) => "Excellent, nearly perfect",
            (PerformanceTier::Ok, _) => "Good work, keep going",
            (PerformanceTier::Bad, _) => "Review the material and try again",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Bad => "bad",
            PerformanceTier::Ok => "ok",
            PerformanceTier::Good => "good",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(PerformanceTier::from_percent(100), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_percent(80), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_percent(79), PerformanceTier::Ok);
        assert_eq!(PerformanceTier::from_percent(60), PerformanceTier::Ok);
        assert_eq!(PerformanceTier::from_percent(59), PerformanceTier::Bad);
        assert_eq!(PerformanceTier::from_percent(0), PerformanceTier::Bad);
    }

    #[test]
    fn test_perfect_message_distinct() {
        let good = PerformanceTier::Good;
        assert_ne!(good.message(true), good.message(false));
    }
}

//! Finished rounds of the current session
//!
//! Only rounds that run out the clock are recorded. A restart mid-round
//! abandons the round without a result. Nothing outlives the process.

/// Outcome of one round that reached time up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// 1-based round number within the session
    pub round: u32,
    pub score: u64,
    pub hits: u32,
    /// Frames processed before time ran out
    pub frames: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    results: Vec<RoundResult>,
    best: Option<usize>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result; returns true when it beats every earlier round.
    /// Ties keep the earlier round as best.
    pub fn record(&mut self, result: RoundResult) -> bool {
        let improved = self.best_score().is_none_or(|best| result.score > best);
        self.results.push(result);
        if improved {
            self.best = Some(self.results.len() - 1);
        }
        improved
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn best(&self) -> Option<&RoundResult> {
        self.best.and_then(|i| self.results.get(i))
    }

    #[inline]
    pub fn best_score(&self) -> Option<u64> {
        self.best().map(|r| r.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(round: u32, score: u64) -> RoundResult {
        RoundResult {
            round,
            score,
            hits: (score / 10) as u32,
            frames: 900,
        }
    }

    #[test]
    fn test_empty_history_has_no_best() {
        let history = SessionHistory::new();
        assert!(history.results().is_empty());
        assert_eq!(history.best_score(), None);
    }

    #[test]
    fn test_first_round_is_best_even_at_zero() {
        let mut history = SessionHistory::new();
        assert!(history.record(result(1, 0)));
        assert_eq!(history.best_score(), Some(0));
    }

    #[test]
    fn test_best_tracks_highest_and_keeps_earliest_tie() {
        let mut history = SessionHistory::new();
        assert!(history.record(result(1, 40)));
        assert!(history.record(result(2, 90)));
        assert!(!history.record(result(3, 90)));
        assert!(!history.record(result(4, 20)));

        assert_eq!(history.results().len(), 4);
        assert_eq!(history.best().map(|r| r.round), Some(2));
        assert_eq!(history.best_score(), Some(90));
    }
}

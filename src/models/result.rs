//! Quiz result data model
//!
//! Summary produced when a run finishes: final score, tier message and
//! whether the run set a new high score.

use crate::POINTS_PER_CORRECT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message tier selected from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultTier {
    /// Every question answered correctly
    Perfect,
    /// At least 70% of the maximum score
    Great,
    /// Everything below that
    KeepPracticing,
}

impl ResultTier {
    /// Pick the tier for `score` out of `max_score`
    pub fn for_score(score: u32, max_score: u32) -> Self {
        if score == max_score {
            Self::Perfect
        } else if u64::from(score) * 10 >= u64::from(max_score) * 7 {
            // score >= 0.7 * max_score, without float rounding
            Self::Great
        } else {
            Self::KeepPracticing
        }
    }

    /// Message shown for this tier
    pub fn message(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect Score! You're a Master!",
            Self::Great => "Great job! You know your stuff.",
            Self::KeepPracticing => "Keep practicing!",
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Final score
    pub score: u32,
    /// Highest reachable score for the question bank
    pub max_score: u32,
    /// Message tier
    pub tier: ResultTier,
    /// Whether this run beat the persisted high score
    pub new_high_score: bool,
}

impl QuizResult {
    /// Create a result for `score` over `question_count` questions
    pub fn new(score: u32, question_count: usize, new_high_score: bool) -> Self {
        let max_score = POINTS_PER_CORRECT * question_count as u32;
        Self {
            finished_at: Utc::now(),
            score,
            max_score,
            tier: ResultTier::for_score(score, max_score),
            new_high_score,
        }
    }

    /// Full message, including the new-record notice when applicable
    pub fn message(&self) -> String {
        if self.new_high_score {
            format!("{} New High Score!", self.tier.message())
        } else {
            self.tier.message().to_string()
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} - {}/{} - {}",
            self.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.score,
            self.max_score,
            self.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ResultTier::for_score(50, 50), ResultTier::Perfect);
        assert_eq!(ResultTier::for_score(40, 50), ResultTier::Great);
        // 35 is exactly 70% of 50
        assert_eq!(ResultTier::for_score(35, 50), ResultTier::Great);
        assert_eq!(ResultTier::for_score(30, 50), ResultTier::KeepPracticing);
        assert_eq!(ResultTier::for_score(0, 50), ResultTier::KeepPracticing);
    }

    #[test]
    fn test_seventy_percent_boundary_with_odd_max() {
        // 0.7 * 30 = 21: 20 falls short, 30 is perfect
        assert_eq!(ResultTier::for_score(20, 30), ResultTier::KeepPracticing);
        assert_eq!(ResultTier::for_score(30, 30), ResultTier::Perfect);
    }

    #[test]
    fn test_result_message() {
        let result = QuizResult::new(10, 5, false);
        assert_eq!(result.max_score, 50);
        assert_eq!(result.message(), "Keep practicing!");

        let record = QuizResult::new(50, 5, true);
        assert_eq!(record.tier, ResultTier::Perfect);
        assert_eq!(
            record.message(),
            "Perfect Score! You're a Master! New High Score!"
        );
    }

    #[test]
    fn test_summary_contains_score() {
        let result = QuizResult::new(40, 5, false);
        let summary = result.summary();
        assert!(summary.contains("40/50"));
        assert!(summary.contains("Great job!"));
    }

    #[test]
    fn test_serde_serialization() {
        let result = QuizResult::new(30, 5, true);
        let json = serde_json::to_string(&result).expect("Failed to serialize");
        let back: QuizResult = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(result, back);
    }
}

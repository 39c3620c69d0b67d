use super::tier::PerformanceTier;
use crate::quiz::{CardStatus, Deck};

/// Graded outcome for a single card, for the per-question result rows
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    pub number: usize,
    pub status: CardStatus,
    /// Declared correct answer, upper-cased for display on wrong/missed rows
    pub correct: String,
}

#[derive(Debug, Clone)]
pub struct GradeReport {
    pub unit: String,
    pub score: u32,
    pub total: u32,
    pub percent: u8,
    pub tier: PerformanceTier,
    /// True when the rounded percent reaches 100. Drives the one-shot
    /// celebration effect and the full-marks message.
    pub perfect: bool,
    pub outcomes: Vec<QuestionOutcome>,
}

impl GradeReport {
    /// Plain-text summary, also used as the accessible announcement line
    pub fn summary(&self) -> String {
        format!(
            "You scored {} of {} ({}%)",
            self.score, self.total, self.percent
        )
    }
}

/// Grade a deck: single linear pass comparing each card's selection to its
/// declared correct answer, case-insensitively. An unanswered card counts
/// as wrong. Score is the count of correct cards, 0 <= score <= N.
pub fn grade(deck: &Deck) -> GradeReport {
    let total = deck.total() as u32;
    let mut score = 0u32;
    let mut outcomes = Vec::with_capacity(deck.total());

    for card in &deck.questions {
        let status = if !card.is_answered() {
            CardStatus::Unanswered
        } else if card.is_correct() {
            score += 1;
            CardStatus::Correct
        } else {
            CardStatus::Wrong
        };

        outcomes.push(QuestionOutcome {
            number: card.number,
            status,
            correct: card.correct.trim().to_uppercase(),
        });
    }

    let percent = if total > 0 {
        (score as f64 * 100.0 / total as f64).round() as u8
    } else {
        0
    };

    GradeReport {
        unit: deck.unit.clone(),
        score,
        total,
        percent,
        tier: PerformanceTier::from_percent(percent),
        perfect: percent == 100,
        outcomes,
    }
}

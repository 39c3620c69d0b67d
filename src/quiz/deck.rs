use serde::{Deserialize, Serialize};

/// One answer choice on a question card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub key: String,
    pub text: String,
}

/// Grading status of a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Unanswered,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCard {
    pub prompt: String,
    pub choices: Vec<Choice>,
    /// Declared correct answer, matched case-insensitively against the
    /// selected choice key
    pub correct: String,

    /// 1-based position, assigned at load time
    #[serde(skip)]
    pub number: usize,
    /// The user's current selection (a choice key), if any
    #[serde(skip)]
    pub selected: Option<String>,
}

impl QuestionCard {
    /// Whether the current selection matches the declared correct answer.
    /// Unanswered is not correct.
    pub fn is_correct(&self) -> bool {
        match &self.selected {
            Some(sel) => sel.to_lowercase() == self.correct.trim().to_lowercase(),
            None => false,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }
}

/// One quiz unit: an ordered, fixed-size collection of question cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Unit identifier, used to key the persisted score record
    pub unit: String,
    #[serde(default)]
    pub title: Option<String>,
    pub questions: Vec<QuestionCard>,
}

impl Deck {
    /// Total number of cards
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Number of cards with a selection, for the progress indicator
    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|c| c.is_answered()).count()
    }

    /// Record a selection on a card. Out-of-range indices are ignored,
    /// as are choice keys the card doesn't offer.
    pub fn select(&mut self, card_idx: usize, choice_key: &str) {
        if let Some(card) = self.questions.get_mut(card_idx) {
            if card
                .choices
                .iter()
                .any(|c| c.key.eq_ignore_ascii_case(choice_key))
            {
                card.selected = Some(choice_key.to_lowercase());
            }
        }
    }

    /// Clear all selections, returning every card to Unanswered
    pub fn clear_selections(&mut self) {
        for card in &mut self.questions {
            card.selected = None;
        }
    }

    pub fn display_title(&self) -> String {
        match &self.title {
            Some(t) => t.clone(),
            None => format!("Unit {}", self.unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(correct: &str, keys: &[&str]) -> QuestionCard {
        QuestionCard {
            prompt: "What?".to_string(),
            choices: keys
                .iter()
                .map(|k| Choice {
                    key: k.to_string(),
                    text: format!("choice {}", k),
                })
                .collect(),
            correct: correct.to_string(),
            number: 1,
            selected: None,
        }
    }

    fn sample_deck() -> Deck {
        Deck {
            unit: "3".to_string(),
            title: None,
            questions: vec![card("a", &["a", "b"]), card("b", &["a", "b"])],
        }
    }

    #[test]
    fn test_unanswered_is_not_correct() {
        let c = card("a", &["a", "b"]);
        assert!(!c.is_correct());
        assert!(!c.is_answered());
    }

    #[test]
    fn test_case_insensitive_match() {
        let mut c = card("A", &["a", "b"]);
        c.selected = Some("a".to_string());
        assert!(c.is_correct());
    }

    #[test]
    fn test_select_unknown_key_ignored() {
        let mut deck = sample_deck();
        deck.select(0, "z");
        assert!(deck.questions[0].selected.is_none());
    }

    #[test]
    fn test_select_and_answered_count() {
        let mut deck = sample_deck();
        assert_eq!(deck.answered_count(), 0);
        deck.select(0, "a");
        assert_eq!(deck.answered_count(), 1);
        deck.select(1, "a");
        assert_eq!(deck.answered_count(), 2);
    }

    #[test]
    fn test_select_overwrites_previous() {
        let mut deck = sample_deck();
        deck.select(0, "a");
        deck.select(0, "b");
        assert_eq!(deck.questions[0].selected.as_deref(), Some("b"));
    }

    #[test]
    fn test_clear_selections() {
        let mut deck = sample_deck();
        deck.select(0, "a");
        deck.select(1, "b");
        deck.clear_selections();
        assert_eq!(deck.answered_count(), 0);
        assert!(deck.questions.iter().all(|c| c.selected.is_none()));
    }

    #[test]
    fn test_display_title_falls_back_to_unit() {
        let deck = sample_deck();
        assert_eq!(deck.display_title(), "Unit 3");
    }
}

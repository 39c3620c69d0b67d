use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::Deck;

/// Load a quiz deck from a YAML file
///
/// Assigns 1-based card numbers and validates the deck shape:
/// at least one card, unique choice keys per card, and each card's
/// declared correct answer must name one of its choices.
///
/// # Errors
///
/// Returns an error if:
/// - The quiz file does not exist or cannot be read
/// - The YAML cannot be parsed
/// - The deck fails validation
pub fn load_deck(path: &Path) -> Result<Deck> {
    if !path.exists() {
        anyhow::bail!("Quiz file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read quiz file at {}", path.display()))?;

    let mut deck: Deck = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse quiz: invalid YAML in {}", path.display()))?;

    for (idx, card) in deck.questions.iter_mut().enumerate() {
        card.number = idx + 1;
        card.selected = None;
    }

    validate_deck(&deck)?;

    Ok(deck)
}

fn validate_deck(deck: &Deck) -> Result<()> {
    if deck.unit.trim().is_empty() {
        anyhow::bail!("Quiz has an empty unit identifier");
    }
    if deck.questions.is_empty() {
        anyhow::bail!("Quiz has no questions");
    }

    for card in &deck.questions {
        if card.choices.len() < 2 {
            anyhow::bail!("Question {} needs at least two choices", card.number);
        }

        let mut seen = std::collections::HashSet::new();
        for choice in &card.choices {
            if !seen.insert(choice.key.to_lowercase()) {
                anyhow::bail!(
                    "Question {} has duplicate choice key '{}'",
                    card.number,
                    choice.key
                );
            }
        }

        let correct = card.correct.trim().to_lowercase();
        if !card
            .choices
            .iter()
            .any(|c| c.key.to_lowercase() == correct)
        {
            anyhow::bail!(
                "Question {}: correct answer '{}' is not one of its choices",
                card.number,
                card.correct
            );
        }
    }

    Ok(())
}

/// A starter quiz file written by the `sample` subcommand
pub const SAMPLE_QUIZ: &str = r#"unit: "1"
title: Sample Unit Review
questions:
  - prompt: "Which keyword introduces an immutable binding in Rust?"
    correct: a
    choices:
      - key: a
        text: "let"
      - key: b
        text: "var"
      - key: c
        text: "const fn"
  - prompt: "What does 2 + 2 equal?"
    correct: b
    choices:
      - key: a
        text: "3"
      - key: b
        text: "4"
      - key: c
        text: "5"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_errors() {
        let path = env::temp_dir().join("quizdeck_test_no_such_quiz.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_deck(&path).is_err());
    }

    #[test]
    fn test_load_sample_quiz() {
        let path = write_temp("quizdeck_test_sample.yaml", SAMPLE_QUIZ);
        let deck = load_deck(&path).unwrap();
        assert_eq!(deck.unit, "1");
        assert_eq!(deck.total(), 2);
        // Card numbers are 1-based load order
        assert_eq!(deck.questions[0].number, 1);
        assert_eq!(deck.questions[1].number, 2);
        assert_eq!(deck.answered_count(), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reject_correct_not_in_choices() {
        let yaml = r#"unit: "9"
questions:
  - prompt: "Pick one"
    correct: d
    choices:
      - key: a
        text: "first"
      - key: b
        text: "second"
"#;
        let path = write_temp("quizdeck_test_bad_correct.yaml", yaml);
        let err = load_deck(&path).unwrap_err();
        assert!(err.to_string().contains("not one of its choices"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reject_duplicate_choice_keys() {
        let yaml = r#"unit: "9"
questions:
  - prompt: "Pick one"
    correct: a
    choices:
      - key: a
        text: "first"
      - key: A
        text: "second"
"#;
        let path = write_temp("quizdeck_test_dup_keys.yaml", yaml);
        let err = load_deck(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate choice key"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reject_empty_quiz() {
        let yaml = r#"unit: "9"
questions: []
"#;
        let path = write_temp("quizdeck_test_empty.yaml", yaml);
        assert!(load_deck(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_correct_answer_case_insensitive_validation() {
        let yaml = r#"unit: "9"
questions:
  - prompt: "Pick one"
    correct: "B"
    choices:
      - key: a
        text: "first"
      - key: b
        text: "second"
"#;
        let path = write_temp("quizdeck_test_case.yaml", yaml);
        assert!(load_deck(&path).is_ok());
        let _ = fs::remove_file(&path);
    }
}

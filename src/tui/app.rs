use crate::config::Config;
use crate::grading::GradeReport;
use crate::quiz::Deck;
use crate::results::ScoreBook;
use crate::tui::confetti::Confetti;
use crate::tui::theme::Theme;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Result,
    Help,
}

/// Keys that always act as commands and are never treated as choice keys
const RESERVED_KEYS: [char; 7] = ['j', 'k', 'q', 'r', 's', 't', '?'];

pub struct App {
    pub deck: Deck,
    /// Cursor over the card list
    pub cursor: usize,
    pub input_mode: InputMode,

    /// Set once grading has been requested; prevents re-grading while a
    /// grading operation is in flight or after results are shown
    pub has_submitted: bool,
    /// True while the grading delay task is pending
    pub is_grading: bool,
    pub report: Option<GradeReport>,

    pub config: Config,
    pub score_book: ScoreBook,
    pub scores_path: PathBuf,
    pub theme: Theme,
    pub confetti: Confetti,

    pub flash_message: Option<(String, Instant)>,
    /// Text summary emitted for assistive output, mirrored in the status bar
    pub announcement: String,
    pub spinner_frame: usize,
    pub term_size: (u16, u16),
    pub should_quit: bool,
    pub verbose: bool,
}

impl App {
    pub fn new(
        deck: Deck,
        config: Config,
        score_book: ScoreBook,
        scores_path: PathBuf,
        theme: Theme,
        verbose: bool,
    ) -> Self {
        Self {
            deck,
            cursor: 0,
            input_mode: InputMode::Normal,
            has_submitted: false,
            is_grading: false,
            report: None,
            config,
            score_book,
            scores_path,
            theme,
            confetti: Confetti::new(),
            flash_message: None,
            announcement: String::new(),
            spinner_frame: 0,
            term_size: (80, 24),
            should_quit: false,
            verbose,
        }
    }

    pub fn next_card(&mut self) {
        let total = self.deck.total();
        if total == 0 {
            return;
        }
        self.cursor = if self.cursor >= total - 1 {
            0
        } else {
            self.cursor + 1
        };
    }

    pub fn previous_card(&mut self) {
        let total = self.deck.total();
        if total == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 {
            total - 1
        } else {
            self.cursor - 1
        };
    }

    /// Interpret a typed character as an answer selection on the current
    /// card. Digits pick the Nth choice; letters match choice keys unless
    /// reserved for a command. No-op once submitted.
    pub fn handle_choice_key(&mut self, c: char) -> bool {
        if self.has_submitted || self.is_grading {
            return false;
        }

        let key = if let Some(digit) = c.to_digit(10) {
            let idx = digit as usize;
            let card = match self.deck.questions.get(self.cursor) {
                Some(card) => card,
                None => return false,
            };
            match card.choices.get(idx.wrapping_sub(1)) {
                Some(choice) => choice.key.clone(),
                None => return false,
            }
        } else {
            let c = c.to_ascii_lowercase();
            if RESERVED_KEYS.contains(&c) {
                return false;
            }
            let card = match self.deck.questions.get(self.cursor) {
                Some(card) => card,
                None => return false,
            };
            if !card
                .choices
                .iter()
                .any(|choice| choice.key.eq_ignore_ascii_case(&c.to_string()))
            {
                return false;
            }
            c.to_string()
        };

        self.deck.select(self.cursor, &key);
        true
    }

    /// Request grading. Returns false when the submitted guard is up, so
    /// the caller knows not to spawn a second grading task.
    pub fn start_grading(&mut self) -> bool {
        if self.has_submitted || self.is_grading {
            return false;
        }
        self.is_grading = true;
        true
    }

    /// Apply a finished grade report: persist the score record, announce
    /// the summary, and launch the celebration exactly once on a perfect
    /// run.
    pub fn finish_grading(&mut self, report: GradeReport) {
        self.is_grading = false;
        self.has_submitted = true;

        self.score_book
            .record(&report.unit, report.score, report.total);
        if let Err(e) = crate::results::save_score_book(&self.scores_path, &self.score_book) {
            self.show_flash(format!("Failed to save score: {}", e));
        }
        if self.verbose {
            crate::buffered_eprintln!(
                "Recorded {}/{} for unit {}",
                report.score,
                report.total,
                report.unit
            );
        }

        self.announcement = report.summary();

        if report.perfect {
            let (w, h) = self.term_size;
            self.confetti.launch(w, h);
        }

        self.report = Some(report);
        self.input_mode = InputMode::Result;
    }

    /// Restart: clear all selections and graded state, returning the quiz
    /// to its initial state.
    pub fn restart(&mut self) {
        self.deck.clear_selections();
        self.report = None;
        self.has_submitted = false;
        self.is_grading = false;
        self.confetti.clear();
        self.cursor = 0;
        self.input_mode = InputMode::Normal;
        self.announcement = "Restarted".to_string();
    }

    /// Flip the theme and persist the preference alongside the scores
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.score_book.set_theme(self.theme.name());
        if let Err(e) = crate::results::save_score_book(&self.scores_path, &self.score_book) {
            self.show_flash(format!("Failed to save theme preference: {}", e));
        } else {
            self.show_flash(format!("Theme: {}", self.theme.name()));
        }
    }

    /// Open the profile view parameterized by score and unit
    pub fn open_profile(&mut self) {
        self.open_link(self.config.profile_url().to_string(), "profile");
    }

    /// Open the gradebook view parameterized by score and unit
    pub fn open_gradebook(&mut self) {
        self.open_link(self.config.gradebook_url().to_string(), "gradebook");
    }

    fn open_link(&mut self, template: String, label: &str) {
        let report = match &self.report {
            Some(r) => r,
            None => return,
        };
        let url = crate::browser::build_link(&template, report.score, &report.unit);
        match crate::browser::open_url(&url) {
            Ok(()) => self.show_flash(format!("Opened {}", label)),
            Err(e) => self.show_flash(format!("Failed to open browser: {}", e)),
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = if self.has_submitted {
            InputMode::Result
        } else {
            InputMode::Normal
        };
    }

    /// Close the result overlay to review graded cards; the submitted
    /// guard stays up until restart.
    pub fn dismiss_result(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn reopen_result(&mut self) {
        if self.report.is_some() {
            self.input_mode = InputMode::Result;
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.term_size = (width, height);
        self.confetti.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::grade;
    use crate::quiz::{Choice, QuestionCard};
    use std::env;

    fn sample_deck() -> Deck {
        let card = |n: usize, correct: &str| QuestionCard {
            prompt: format!("Question {}", n),
            choices: vec![
                Choice {
                    key: "a".to_string(),
                    text: "first".to_string(),
                },
                Choice {
                    key: "b".to_string(),
                    text: "second".to_string(),
                },
            ],
            correct: correct.to_string(),
            number: n,
            selected: None,
        };
        Deck {
            unit: "t".to_string(),
            title: None,
            questions: vec![card(1, "a"), card(2, "b")],
        }
    }

    fn sample_app(name: &str) -> App {
        let scores_path = env::temp_dir().join(format!("quizdeck_test_app_{}.json", name));
        let _ = std::fs::remove_file(&scores_path);
        App::new(
            sample_deck(),
            Config::default(),
            ScoreBook::new(),
            scores_path,
            Theme::Dark,
            false,
        )
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = sample_app("cursor");
        assert_eq!(app.cursor, 0);
        app.next_card();
        assert_eq!(app.cursor, 1);
        app.next_card();
        assert_eq!(app.cursor, 0);
        app.previous_card();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_choice_by_letter_and_digit() {
        let mut app = sample_app("choice");
        assert!(app.handle_choice_key('a'));
        assert_eq!(app.deck.questions[0].selected.as_deref(), Some("a"));

        app.next_card();
        assert!(app.handle_choice_key('2'));
        assert_eq!(app.deck.questions[1].selected.as_deref(), Some("b"));
    }

    #[test]
    fn test_reserved_keys_not_choices() {
        let mut app = sample_app("reserved");
        // 'q' is quit even if a quiz offered it as a key
        assert!(!app.handle_choice_key('q'));
        assert!(!app.handle_choice_key('z'));
        assert!(app.deck.questions[0].selected.is_none());
    }

    #[test]
    fn test_submit_guard_blocks_regrade() {
        let mut app = sample_app("guard");
        assert!(app.start_grading());
        // While in flight
        assert!(!app.start_grading());

        app.finish_grading(grade(&app.deck));
        // After submission
        assert!(!app.start_grading());
        assert!(app.has_submitted);
    }

    #[test]
    fn test_selection_locked_after_submit() {
        let mut app = sample_app("locked");
        app.start_grading();
        assert!(!app.handle_choice_key('a'));
        app.finish_grading(grade(&app.deck));
        assert!(!app.handle_choice_key('a'));
    }

    #[test]
    fn test_finish_grading_persists_score() {
        let mut app = sample_app("persist");
        app.handle_choice_key('a');
        app.start_grading();
        let report = grade(&app.deck);
        let expected = report.score;
        app.finish_grading(report);

        assert_eq!(app.score_book.get("t").unwrap().score, expected);
        let loaded = crate::results::load_score_book(&app.scores_path).unwrap();
        assert_eq!(loaded.get("t").unwrap().score, expected);
        let _ = std::fs::remove_file(&app.scores_path);
    }

    #[test]
    fn test_perfect_run_launches_confetti_once() {
        let mut app = sample_app("confetti");
        app.handle_choice_key('a');
        app.next_card();
        app.handle_choice_key('b');

        app.start_grading();
        app.finish_grading(grade(&app.deck));
        assert!(app.confetti.is_active());

        // A second submit attempt is blocked by the guard, so the effect
        // fires exactly once per submission
        assert!(!app.start_grading());
        let _ = std::fs::remove_file(&app.scores_path);
    }

    #[test]
    fn test_imperfect_run_no_confetti() {
        let mut app = sample_app("noconfetti");
        app.handle_choice_key('a');
        app.start_grading();
        app.finish_grading(grade(&app.deck));
        assert!(!app.confetti.is_active());
        let _ = std::fs::remove_file(&app.scores_path);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut app = sample_app("restart");
        app.handle_choice_key('a');
        app.start_grading();
        app.finish_grading(grade(&app.deck));
        assert!(app.report.is_some());

        app.restart();
        assert!(!app.has_submitted);
        assert!(app.report.is_none());
        assert_eq!(app.deck.answered_count(), 0);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.confetti.is_active());
        // Selections accepted again
        assert!(app.handle_choice_key('a'));
        let _ = std::fs::remove_file(&app.scores_path);
    }

    #[test]
    fn test_resubmission_after_restart_updates_timestamp() {
        let mut app = sample_app("resubmit");
        app.start_grading();
        app.finish_grading(grade(&app.deck));
        let first = app.score_book.get("t").unwrap().recorded_at;

        app.restart();
        app.handle_choice_key('a');
        app.start_grading();
        app.finish_grading(grade(&app.deck));
        let rec = app.score_book.get("t").unwrap();
        assert_eq!(rec.score, 1);
        assert!(rec.recorded_at >= first);
        let _ = std::fs::remove_file(&app.scores_path);
    }

    #[test]
    fn test_toggle_theme_persists_preference() {
        let mut app = sample_app("theme");
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.score_book.theme.as_deref(), Some("light"));
        let loaded = crate::results::load_score_book(&app.scores_path).unwrap();
        assert_eq!(loaded.theme.as_deref(), Some("light"));
        let _ = std::fs::remove_file(&app.scores_path);
    }

    #[test]
    fn test_announcement_after_grading() {
        let mut app = sample_app("announce");
        app.handle_choice_key('a');
        app.start_grading();
        app.finish_grading(grade(&app.deck));
        assert_eq!(app.announcement, "You scored 1 of 2 (50%)");
        let _ = std::fs::remove_file(&app.scores_path);
    }
}

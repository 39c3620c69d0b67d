pub mod app;
pub mod confetti;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::grading::{grade, GradeReport};

/// Run the interactive quiz. Returns the final grade report, if the user
/// submitted before quitting, so the caller can print the summary once the
/// terminal is restored.
pub async fn run_tui(mut app: App) -> anyhow::Result<Option<GradeReport>> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 80ms tick keeps the confetti and spinner animations smooth
    let mut events = EventHandler::new(80);

    let mut pending_grade: Option<tokio::task::JoinHandle<GradeReport>> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key, &mut pending_grade),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
                app.confetti.step();
            }
            Event::Resize(w, h) => app.resize(w, h),
        }

        // Check if the grading delay has elapsed
        if let Some(handle) = &mut pending_grade {
            if handle.is_finished() {
                let handle = pending_grade.take().unwrap();
                match handle.await {
                    Ok(report) => app.finish_grading(report),
                    Err(e) => {
                        // Drop the in-flight guard so the user can retry
                        app.is_grading = false;
                        app.show_flash(format!("Grading task panicked: {}", e));
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    Ok(app.report)
}

/// Spawn the artificially delayed grading task (perceived-loading effect,
/// matching the original behavior). The deck snapshot is graded after the
/// delay; selections are locked while it is pending.
fn spawn_grading(app: &App) -> tokio::task::JoinHandle<GradeReport> {
    let deck = app.deck.clone();
    let delay = app.config.grading_delay();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        grade(&deck)
    })
}

fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    pending_grade: &mut Option<tokio::task::JoinHandle<GradeReport>>,
) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_card(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_card(),

                // Submit (Enter reopens the result once graded)
                KeyCode::Char('s') => {
                    if app.start_grading() {
                        *pending_grade = Some(spawn_grading(app));
                    }
                }
                KeyCode::Enter => {
                    if app.has_submitted {
                        app.reopen_result();
                    } else if app.start_grading() {
                        *pending_grade = Some(spawn_grading(app));
                    }
                }

                // Restart; a pending grading task must not outlive it,
                // or its stale report would land after the reset
                KeyCode::Char('r') => {
                    if let Some(handle) = pending_grade.take() {
                        handle.abort();
                    }
                    app.restart();
                }

                // Theme toggle
                KeyCode::Char('t') => app.toggle_theme(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                // Everything else may be an answer selection
                KeyCode::Char(c) => {
                    app.handle_choice_key(c);
                }

                _ => {}
            }
        }
        app::InputMode::Result => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.dismiss_result(),
            KeyCode::Char('p') => app.open_profile(),
            KeyCode::Char('g') => app.open_gradebook(),
            KeyCode::Char('r') => {
                if let Some(handle) = pending_grade.take() {
                    handle.abort();
                }
                app.restart();
            }
            KeyCode::Char('t') => app.toggle_theme(),
            KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

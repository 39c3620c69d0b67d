use crate::quiz::CardStatus;
use crate::tui::app::{App, InputMode};
use crate::tui::theme::ThemeColors;
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.term_size = (area.width, area.height);
    let colors = app.theme.colors();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Progress(1) + Cards(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app, &colors);
    render_progress(frame, chunks[1], app, &colors);
    render_cards(frame, chunks[2], app, &colors);
    render_status_bar(frame, chunks[3], app, &colors);

    match app.input_mode {
        InputMode::Result => render_result_popup(frame, app, &colors),
        InputMode::Help => render_help_popup(frame, &colors),
        InputMode::Normal => {}
    }

    // Grading spinner sits on top of everything except the confetti
    if app.is_grading {
        render_grading_overlay(frame, app, &colors);
    }

    if app.confetti.is_active() {
        render_confetti(frame, app, &colors);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let left = app.deck.display_title();
    let right = format!("unit {} | {} theme", app.deck.unit, app.theme.name());

    let padding = (area.width as usize).saturating_sub(left.chars().count() + right.len());
    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(colors.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let total = app.deck.total();
    let answered = app.deck.answered_count();
    let ratio = if total > 0 {
        answered as f64 / total as f64
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .ratio(ratio)
        .label(format!("{}/{} answered", answered, total))
        .gauge_style(
            Style::default()
                .fg(colors.gauge_filled)
                .bg(colors.gauge_empty),
        );
    frame.render_widget(gauge, area);
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0usize;

    for (idx, card) in app.deck.questions.iter().enumerate() {
        if idx == app.cursor {
            cursor_line = lines.len();
        }

        let selected_card = idx == app.cursor;
        let prompt_style = if selected_card {
            colors.header_style.fg(colors.title_color)
        } else {
            colors.header_style
        };

        let mut prompt_spans = vec![
            Span::styled(
                if selected_card { "> " } else { "  " },
                Style::default().fg(colors.title_color),
            ),
            Span::styled(format!("{}. {}", card.number, card.prompt), prompt_style),
        ];

        // Status tag once graded
        if app.has_submitted {
            let status = if !card.is_answered() {
                CardStatus::Unanswered
            } else if card.is_correct() {
                CardStatus::Correct
            } else {
                CardStatus::Wrong
            };
            let tag = match status {
                CardStatus::Correct => " [correct]",
                CardStatus::Wrong => " [wrong]",
                CardStatus::Unanswered => " [not answered]",
            };
            prompt_spans.push(Span::styled(
                tag,
                Style::default().fg(colors.status_color(status)).bold(),
            ));
        }
        lines.push(Line::from(prompt_spans));

        for choice in &card.choices {
            let picked = card
                .selected
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(&choice.key));
            let marker = if picked { "(x)" } else { "( )" };
            let style = if picked {
                colors.selected_choice
            } else {
                Style::default().fg(colors.text)
            };
            lines.push(Line::from(Span::styled(
                format!("     {} {}) {}", marker, choice.key, choice.text),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    // Keep the cursor card in view
    let viewport = area.height as usize;
    let scroll = if cursor_line + 4 > viewport {
        (cursor_line + 4 - viewport) as u16
    } else {
        0
    };

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let mut spans = Vec::new();
        if !app.announcement.is_empty() {
            spans.push(Span::styled(
                app.announcement.clone(),
                Style::default().fg(colors.muted),
            ));
            spans.push(Span::raw("  "));
        }

        let hints: &[(&str, &str)] = if app.has_submitted {
            &[
                ("Enter", ":results "),
                ("r", ":restart "),
                ("t", ":theme "),
                ("?", ":help "),
                ("q", ":quit"),
            ]
        } else {
            &[
                ("j/k", ":nav "),
                ("a-d 1-9", ":answer "),
                ("s", ":submit "),
                ("t", ":theme "),
                ("?", ":help "),
                ("q", ":quit"),
            ]
        };
        for (key, label) in hints {
            spans.push(Span::styled(
                *key,
                Style::default().fg(colors.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_result_popup(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let report = match &app.report {
        Some(r) => r,
        None => return,
    };

    let height = (report.outcomes.len() as u16 + 8).min(frame.area().height);
    let popup_area = centered_rect_fixed(52, height, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered()
        .title(" Quiz Results ")
        .title_style(colors.popup_title)
        .border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}/{}  ({}%)", report.score, report.total, report.percent),
            Style::default().fg(colors.title_color).bold(),
        )),
        Line::from(Span::styled(
            report.tier.message(report.perfect),
            Style::default().fg(colors.tier_color(report.tier)).bold(),
        )),
        Line::from(""),
    ];

    for outcome in &report.outcomes {
        let (tag, detail) = match outcome.status {
            CardStatus::Correct => ("correct", String::new()),
            CardStatus::Wrong => ("wrong", format!("  (answer: {})", outcome.correct)),
            CardStatus::Unanswered => ("not answered", format!("  (answer: {})", outcome.correct)),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("Q{}: ", outcome.number),
                Style::default().fg(colors.muted),
            ),
            Span::styled(tag, Style::default().fg(colors.status_color(outcome.status))),
            Span::styled(detail, Style::default().fg(colors.muted)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("p", Style::default().fg(colors.status_key_color)),
        Span::raw(":profile "),
        Span::styled("g", Style::default().fg(colors.status_key_color)),
        Span::raw(":gradebook "),
        Span::styled("r", Style::default().fg(colors.status_key_color)),
        Span::raw(":restart "),
        Span::styled("Esc", Style::default().fg(colors.status_key_color)),
        Span::raw(":close"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(48, 15, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(colors.popup_title)
        .border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("j / Down      ", key_style),
            Span::raw("Next question"),
        ]),
        Line::from(vec![
            Span::styled("k / Up        ", key_style),
            Span::raw("Previous question"),
        ]),
        Line::from(vec![
            Span::styled("a-d / 1-9     ", key_style),
            Span::raw("Select an answer"),
        ]),
        Line::from(vec![
            Span::styled("s / Enter     ", key_style),
            Span::raw("Submit for grading"),
        ]),
        Line::from(vec![
            Span::styled("r             ", key_style),
            Span::raw("Restart the quiz"),
        ]),
        Line::from(vec![
            Span::styled("t             ", key_style),
            Span::raw("Toggle light/dark theme"),
        ]),
        Line::from(vec![
            Span::styled("p / g         ", key_style),
            Span::raw("Open profile / gradebook"),
        ]),
        Line::from(vec![
            Span::styled("?             ", key_style),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c    ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(colors.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}

fn render_grading_overlay(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(26, 3, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered().border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[app.spinner_frame % 10];

    let text = Paragraph::new(format!("{} Grading...", spinner))
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.title_color));
    frame.render_widget(text, inner);
}

fn render_confetti(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for (x, y, color_idx, symbol) in app.confetti.visible_pieces() {
        if x >= area.width || y >= area.height {
            continue;
        }
        if let Some(cell) = buf.cell_mut(Position::new(area.x + x, area.y + y)) {
            cell.set_char(symbol);
            cell.set_fg(colors.confetti[color_idx % colors.confetti.len()]);
        }
    }
}

//! # TUI UI Components
//!
//! Ratatui rendering for the reminder list, the add sheet and the status bar.

mod reminders;
mod sheet;

pub use reminders::render_reminders;
pub use sheet::render_add_sheet;

use crate::features::notifications::SchedulerState;
use crate::tui::app::{App, Screen};
use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Main render function
pub fn render(frame: &mut Frame, app: &App, now: DateTime<Local>) {
    let banner_height = if app.banner.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Notification banner
            Constraint::Min(0),                // Reminder list
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    if app.banner.is_some() {
        render_banner(frame, app, chunks[0]);
    }

    render_reminders(frame, app, chunks[1]);

    if app.screen == Screen::AddSheet {
        render_add_sheet(frame, app, chunks[1], now);
    }

    render_status_bar(frame, app, chunks[2]);
}

/// Foreground notification banner
fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(presented) = &app.banner else {
        return;
    };
    let content = &presented.notification.request.content;

    let lines = vec![
        Line::from(Span::styled(
            content.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(content.body.clone()),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" 🔔 "),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let strings = app.strings;
    let notification_status = match app.scheduler_state {
        Some(SchedulerState::Authorized) => Span::styled(
            format!("● {}", strings.alerts_on),
            Style::default().fg(Color::Green),
        ),
        Some(SchedulerState::Unauthorized) => Span::styled(
            format!("● {}", strings.alerts_off),
            Style::default().fg(Color::Red),
        ),
        None => Span::styled(
            format!("● {}", strings.alerts_pending),
            Style::default().fg(Color::Yellow),
        ),
    };

    let message = if let Some(err) = &app.error_message {
        Span::styled(
            format!(" {}: {} ", strings.error_prefix, err),
            Style::default().fg(Color::Red),
        )
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {} ", status), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let help_hint = match app.screen {
        Screen::List => strings.list_hints,
        Screen::AddSheet => strings.sheet_hints,
    };

    let status_line = Line::from(vec![
        notification_status,
        Span::raw(" | "),
        message,
        Span::styled(format!(" {} ", help_hint), Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

/// Rectangle of fixed height, `percent_x` wide, centered in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

//! # Add Sheet UI
//!
//! Modal over the list: shows the time that Save will record.

use crate::features::reminders::format::{clock_time, meridiem};
use crate::tui::app::App;
use crate::tui::ui::{centered_rect, titled_block};
use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

/// Render the "add" sheet on top of `area`
pub fn render_add_sheet(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Local>) {
    let popup = centered_rect(60, 7, area);
    let strings = app.strings;
    let time = now.time();

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}  ", strings.time_label),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("{} {}", meridiem(time, app.locale), clock_time(time)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [Esc] ", Style::default().fg(Color::Cyan)),
            Span::raw(strings.cancel),
            Span::styled("    [Enter] ", Style::default().fg(Color::Cyan)),
            Span::raw(strings.save),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(titled_block(strings.sheet_title));

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

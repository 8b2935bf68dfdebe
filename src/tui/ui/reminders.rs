//! # Reminder List UI
//!
//! One row per reminder: meridiem, `hh:mm`, and the check toggle.

use crate::features::reminders::format::{clock_time, meridiem};
use crate::features::reminders::Reminder;
use crate::tui::app::App;
use crate::tui::ui::titled_block;
use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

/// Render the reminder list screen
pub fn render_reminders(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.badge_count > 0 {
        format!("{} ({})", app.strings.list_title, app.badge_count)
    } else {
        app.strings.list_title.to_string()
    };

    if app.reminders.is_empty() {
        let placeholder = Paragraph::new(app.strings.empty_list)
            .block(titled_block(&title))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .reminders
        .iter()
        .map(|reminder| ListItem::new(row(app, reminder)))
        .collect();

    let list = List::new(items)
        .block(titled_block(&title))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn row(app: &App, reminder: &Reminder) -> Line<'static> {
    let time = reminder.timestamp.with_timezone(&Local).time();

    let toggle = if reminder.is_checked {
        Span::styled(" ON  ", Style::default().bg(Color::Green).fg(Color::Black))
    } else {
        Span::styled(" OFF ", Style::default().bg(Color::DarkGray).fg(Color::White))
    };

    let time_style = if reminder.is_checked {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    Line::from(vec![
        Span::styled(
            format!("{:<4}", meridiem(time, app.locale)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{:<8}", clock_time(time)), time_style),
        toggle,
    ])
}

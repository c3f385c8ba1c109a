//! Log table with a text filter line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::poll::SubscriptionState;
use crate::types::LogEntry;
use crate::ui::theme;
use crate::ui::util::fmt_when;

pub fn draw_logs(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &SubscriptionState<Vec<LogEntry>>,
    filter: &str,
    editing: bool,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let filter_style = if editing {
        Style::default().fg(theme::ACCENT)
    } else {
        Style::default().fg(theme::DIM)
    };
    let hint = if editing { " (enter applies, esc cancels)" } else { " (/ edits)" };
    let filter_line = Paragraph::new(Line::from(vec![
        Span::raw(filter.to_string()),
        Span::styled(if editing { "▏" } else { "" }, filter_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Filter{hint}"))
            .border_style(filter_style),
    );
    f.render_widget(filter_line, rows[0]);

    let block = Block::default().borders(Borders::ALL).title("Recent");
    match &state.data {
        Some(entries) if !entries.is_empty() => {
            let body = entries.iter().map(|e| {
                let level_style = if e.level == "ERROR" {
                    Style::default().fg(theme::BAD).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::OK)
                };
                Row::new(vec![
                    Cell::from(fmt_when(Some(e.at))),
                    Cell::from(Span::styled(e.level.clone(), level_style)),
                    Cell::from(e.msg.clone()),
                ])
            });
            let table = Table::new(
                body,
                [
                    Constraint::Length(10),
                    Constraint::Length(7),
                    Constraint::Min(20),
                ],
            )
            .header(
                Row::new(vec!["Time", "Level", "Message"])
                    .style(Style::default().fg(theme::DIM)),
            )
            .block(block);
            f.render_widget(table, rows[1]);
        }
        Some(_) => {
            let msg = Paragraph::new("No log entries.")
                .style(Style::default().fg(theme::DIM))
                .block(block);
            f.render_widget(msg, rows[1]);
        }
        None => {
            let msg = if let Some(err) = &state.error {
                format!("error: {err}")
            } else {
                "loading…".to_string()
            };
            let p = Paragraph::new(msg)
                .style(Style::default().fg(theme::DIM))
                .block(block);
            f.render_widget(p, rows[1]);
        }
    }
}

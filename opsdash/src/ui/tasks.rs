//! Task table, dashboard excerpt, and the add-task form.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::tasks::TasksState;
use crate::types::Task;
use crate::ui::theme;
use crate::ui::util::fmt_when;

/// Which field of the add form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Every,
}

#[derive(Debug, Clone)]
pub struct AddForm {
    pub name: String,
    pub every: String,
    pub focus: FormFocus,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            name: "Clear Temp".into(),
            every: "60".into(),
            focus: FormFocus::Name,
        }
    }
}

pub fn draw_add_form(f: &mut ratatui::Frame<'_>, area: Rect, form: &AddForm) {
    let field = |label: &str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM)
        };
        Span::styled(format!("{label}: {value}{}  ", if focused { "▏" } else { "" }), style)
    };
    let line = Line::from(vec![
        field("Name", &form.name, form.focus == FormFocus::Name),
        field("Every (min)", &form.every, form.focus == FormFocus::Every),
        Span::styled("(tab switches, enter adds, esc closes)", Style::default().fg(theme::DIM)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Add task")),
        area,
    );
}

fn status_cell(t: &Task) -> Cell<'static> {
    let label = if t.status.is_empty() { "OK" } else { t.status.as_str() };
    let style = if label == "ERR" {
        Style::default().fg(theme::BAD)
    } else {
        Style::default().fg(theme::OK)
    };
    Cell::from(Span::styled(label.to_string(), style))
}

pub fn draw_task_table(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &TasksState,
    selected: usize,
) {
    let title = match (&state.error, state.loading) {
        (Some(e), _) => format!("All tasks — error: {e}"),
        (None, true) => "All tasks — loading…".to_string(),
        (None, false) => "All tasks (enter runs, d deletes, a adds)".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.tasks.is_empty() {
        let msg = if state.loading { "loading…" } else { "No tasks yet." };
        f.render_widget(
            Paragraph::new(msg).style(Style::default().fg(theme::DIM)).block(block),
            area,
        );
        return;
    }

    let rows = state.tasks.iter().enumerate().map(|(i, t)| {
        let busy = state.busy.as_deref() == Some(t.id.as_str());
        let mut style = Style::default();
        if i == selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if busy {
            style = style.fg(theme::DIM);
        }
        Row::new(vec![
            Cell::from(t.name.clone()),
            Cell::from(format!("{} min", t.every_minutes)),
            Cell::from(fmt_when(t.last_run)),
            status_cell(t),
            Cell::from(if busy { "working…" } else { "" }),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Name", "Every", "Last run", "Status", ""])
            .style(Style::default().fg(theme::DIM)),
    )
    .block(block);
    f.render_widget(table, area);
}

/// Dashboard card: the top-N excerpt. Same shape as the full table, no
/// selection or actions.
pub fn draw_top_tasks(f: &mut ratatui::Frame<'_>, area: Rect, tasks: &[Task]) {
    let block = Block::default().borders(Borders::ALL).title("Recent tasks");
    if tasks.is_empty() {
        f.render_widget(
            Paragraph::new("No tasks yet.").style(Style::default().fg(theme::DIM)).block(block),
            area,
        );
        return;
    }
    let rows = tasks.iter().map(|t| {
        Row::new(vec![
            Cell::from(t.name.clone()),
            Cell::from(format!("{} min", t.every_minutes)),
            Cell::from(fmt_when(t.last_run)),
            status_cell(t),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .block(block);
    f.render_widget(table, area);
}

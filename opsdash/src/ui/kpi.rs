//! Dashboard KPI cards: current value plus a mini sparkline of its window.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
    pub data: Vec<u64>,
    pub color: Color,
}

pub fn draw_kpi_row(f: &mut ratatui::Frame<'_>, area: Rect, cards: &[KpiCard]) {
    if cards.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, slot) in cards.iter().zip(cols.iter()) {
        let max_points = slot.width.saturating_sub(2) as usize;
        let start = card.data.len().saturating_sub(max_points);
        let data = &card.data[start..];
        let spark = Sparkline::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{}: {}", card.label, card.value)),
            )
            .data(data)
            .style(Style::default().fg(card.color));
        f.render_widget(spark, *slot);
    }
}

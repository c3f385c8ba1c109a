//! Top header: collector heartbeat badge and view tabs.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::poll::SubscriptionState;
use crate::types::Health;
use crate::ui::theme;

pub const TABS: &[(&str, &str)] = &[
    ("1", "Dashboard"),
    ("2", "CPU/Mem"),
    ("3", "Disk&IO"),
    ("4", "Network"),
    ("5", "Logs"),
    ("6", "Tasks"),
];

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    health: &SubscriptionState<Health>,
    active_tab: usize,
) {
    let (badge, style) = match (&health.data, &health.error) {
        (Some(h), _) if h.sampling_active() => ("● sampling active", Style::default().fg(theme::OK)),
        (Some(_), _) => ("● collector stale", Style::default().fg(theme::BAD)),
        (None, Some(_)) => ("● backend unreachable", Style::default().fg(theme::BAD)),
        (None, None) => ("● connecting…", Style::default().fg(theme::DIM)),
    };

    let mut spans = vec![
        Span::styled("opsdash ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(badge, style),
        Span::raw("  "),
    ];
    for (i, (key, label)) in TABS.iter().enumerate() {
        let s = if i == active_tab {
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM)
        };
        spans.push(Span::styled(format!(" {key}:{label}"), s));
    }
    spans.push(Span::styled("  (q quits)", Style::default().fg(theme::DIM)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

//! Normalized line chart drawn on a canvas, with an "insufficient data"
//! placeholder below two samples.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Line},
        Block, Borders, Paragraph,
    },
};

use crate::chart::{grid_lines, normalize, ChartBox};
use crate::ui::theme;

const GRID_ROWS: usize = 4;

/// Draw `samples` as a stroke + fill chart inside `area`. The title carries
/// the min/max legend so the panel stays one widget.
pub fn draw_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    samples: &[f64],
    color: Color,
) {
    // Map into a box shaped like the terminal cell grid; canvas interpolates
    // into braille dots from there.
    let bx = ChartBox::new(f64::from(area.width), f64::from(area.height) * 2.0, 1.0);

    let Some(n) = normalize(samples, bx) else {
        draw_placeholder(f, area, title);
        return;
    };

    let legend = format!("{title} — min {:.1} max {:.1}", n.min, n.max);
    let baseline = n.area.last().map(|p| p.1).unwrap_or(bx.height - bx.padding);

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(legend))
        .x_bounds([0.0, bx.width])
        .y_bounds([0.0, bx.height])
        .paint(move |ctx| {
            for y in grid_lines(bx, GRID_ROWS) {
                ctx.draw(&Line {
                    x1: bx.padding,
                    y1: bx.height - y,
                    x2: bx.width - bx.padding,
                    y2: bx.height - y,
                    color: theme::GRID,
                });
            }
            // Fill: vertical strokes from each point down to the baseline.
            // Uses the same point list as the stroke, so they stay aligned.
            for &(x, y) in &n.line {
                ctx.draw(&Line {
                    x1: x,
                    y1: bx.height - baseline,
                    x2: x,
                    y2: bx.height - y,
                    color: theme::FILL,
                });
            }
            for w in n.line.windows(2) {
                ctx.draw(&Line {
                    x1: w[0].0,
                    y1: bx.height - w[0].1,
                    x2: w[1].0,
                    y2: bx.height - w[1].1,
                    color,
                });
            }
        });
    f.render_widget(canvas, area);
}

/// Skeleton pane: shown while a series has fewer than two samples.
pub fn draw_placeholder(f: &mut ratatui::Frame<'_>, area: Rect, title: &str) {
    let p = Paragraph::new(TextLine::from("gathering data…"))
        .style(Style::default().fg(theme::DIM))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(p, area);
}

//! Pure geometry for sparkline-style charts: maps a numeric series into a
//! padded coordinate box with a top-left origin.

/// Drawing box. Coordinates produced by [`normalize`] stay inside
/// `[padding, width - padding] x [padding, height - padding]`.
#[derive(Debug, Clone, Copy)]
pub struct ChartBox {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ChartBox {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Normalized {
    /// Stroke path through the mapped points, oldest sample first.
    pub line: Vec<(f64, f64)>,
    /// Fill polygon: the line plus two baseline corners. Derived from the
    /// same point list so stroke and fill stay pixel-consistent.
    pub area: Vec<(f64, f64)>,
    pub min: f64,
    pub max: f64,
}

/// Fewer samples than this is "insufficient data"; the caller renders a
/// placeholder instead of a chart.
pub const MIN_SAMPLES: usize = 2;

/// Map `samples` into `bx`. Returns `None` below [`MIN_SAMPLES`]. A constant
/// series gets a span of 1 so the division never produces NaN; every point
/// then lands on one horizontal line.
pub fn normalize(samples: &[f64], bx: ChartBox) -> Option<Normalized> {
    if samples.len() < MIN_SAMPLES {
        return None;
    }
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max - min == 0.0 { 1.0 } else { max - min };

    let inner_w = bx.width - 2.0 * bx.padding;
    let inner_h = bx.height - 2.0 * bx.padding;
    let step = inner_w / (samples.len() - 1) as f64;

    let line: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = bx.padding + i as f64 * step;
            // Higher values map to smaller y: the origin is top-left.
            let y = bx.padding + inner_h * (1.0 - (v - min) / span);
            (x, y)
        })
        .collect();

    let baseline = bx.height - bx.padding;
    let mut area = line.clone();
    area.push((bx.padding + (samples.len() - 1) as f64 * step, baseline));
    area.push((bx.padding, baseline));

    Some(Normalized {
        line,
        area,
        min,
        max,
    })
}

/// Evenly spaced horizontal guide y-values, independent of the data.
pub fn grid_lines(bx: ChartBox, rows: usize) -> Vec<f64> {
    let inner_h = bx.height - 2.0 * bx.padding;
    (0..=rows)
        .map(|r| bx.padding + inner_h * (r as f64 / rows as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: ChartBox = ChartBox {
        width: 600.0,
        height: 120.0,
        padding: 8.0,
    };

    #[test]
    fn insufficient_data_is_rejected() {
        assert!(normalize(&[], BOX).is_none());
        assert!(normalize(&[7.0], BOX).is_none());
    }

    #[test]
    fn constant_series_is_flat_and_finite() {
        let n = normalize(&[5.0, 5.0, 5.0, 5.0], BOX).unwrap();
        let y0 = n.line[0].1;
        for &(x, y) in &n.line {
            assert!(x.is_finite() && y.is_finite());
            assert_eq!(y, y0);
        }
        assert_eq!(n.min, 5.0);
        assert_eq!(n.max, 5.0);
    }

    #[test]
    fn points_are_evenly_spaced_and_inside_the_box() {
        let n = normalize(&[1.0, 4.0, 2.0, 9.0, 9.0], BOX).unwrap();
        let step = (BOX.width - 2.0 * BOX.padding) / 4.0;
        for (i, &(x, y)) in n.line.iter().enumerate() {
            assert!((x - (BOX.padding + i as f64 * step)).abs() < 1e-9);
            assert!(y >= BOX.padding - 1e-9);
            assert!(y <= BOX.height - BOX.padding + 1e-9);
        }
    }

    #[test]
    fn higher_values_map_to_smaller_y() {
        let n = normalize(&[0.0, 10.0], BOX).unwrap();
        // First sample is the minimum: bottom of the box. Second is the
        // maximum: top of the box.
        assert!((n.line[0].1 - (BOX.height - BOX.padding)).abs() < 1e-9);
        assert!((n.line[1].1 - BOX.padding).abs() < 1e-9);
    }

    #[test]
    fn area_closes_on_the_baseline() {
        let n = normalize(&[3.0, 1.0, 2.0], BOX).unwrap();
        assert_eq!(n.area.len(), n.line.len() + 2);
        let baseline = BOX.height - BOX.padding;
        let last = n.area[n.area.len() - 1];
        let second_last = n.area[n.area.len() - 2];
        assert_eq!(last, (BOX.padding, baseline));
        assert_eq!(second_last.1, baseline);
        assert_eq!(second_last.0, n.line.last().unwrap().0);
    }

    #[test]
    fn grid_is_even_and_data_independent() {
        let g = grid_lines(BOX, 4);
        assert_eq!(g.len(), 5);
        let gap = g[1] - g[0];
        for w in g.windows(2) {
            assert!((w[1] - w[0] - gap).abs() < 1e-9);
        }
        assert_eq!(g[0], BOX.padding);
        assert_eq!(g[4], BOX.height - BOX.padding);
    }
}

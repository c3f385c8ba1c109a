//! Small UI helpers: value formatting and truncation.

use chrono::{DateTime, Local, Utc};

pub fn fmt_pct(v: f64) -> String {
    format!("{v:.0}%")
}

pub fn fmt_mbs(v: f64) -> String {
    format!("{v:.1} MB/s")
}

pub fn fmt_kbs(v: f64) -> String {
    format!("{v:.0} KB/s")
}

pub fn fmt_gb(v: f64) -> String {
    format!("{v:.1} GB")
}

/// Local wall-clock time for table rows; "—" when the backend never ran it.
pub fn fmt_when(t: Option<DateTime<Utc>>) -> String {
    match t {
        Some(t) => t.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => "—".to_string(),
    }
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let chars: Vec<char> = s.chars().collect();
    let head: String = chars[..left].iter().collect();
    let tail: String = chars[chars.len() - right..].iter().collect();
    format!("{head}...{tail}")
}

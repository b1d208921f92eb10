use serde::Serialize;

use crate::models::analysis::SkillDistribution;

/// Slice colors, cycled by position.
pub const PALETTE: [&str; 8] = [
    "#8b5cf6", "#06b6d4", "#10b981", "#f59e0b", "#ef4444", "#7c3aed", "#0891b2", "#059669",
];

/// One pie-chart slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: i64,
    pub color_index: usize,
    pub fill: &'static str,
}

/// Maps a skill distribution to pie slices, preserving input order.
/// An empty distribution yields an empty series (the UI shows its placeholder).
pub fn to_chart_series(distribution: &SkillDistribution) -> Vec<ChartSlice> {
    distribution
        .iter()
        .enumerate()
        .map(|(idx, (name, weight))| {
            let color_index = idx % PALETTE.len();
            ChartSlice {
                name: name.to_string(),
                value: round_half_up(weight),
                color_index,
                fill: PALETTE[color_index],
            }
        })
        .collect()
}

/// Halves round toward +∞ (2.5 → 3, -2.5 → -2).
fn round_half_up(weight: f64) -> i64 {
    (weight + 0.5).floor() as i64
}

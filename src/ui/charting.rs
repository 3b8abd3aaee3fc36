/// Points for the session chart: x = round number (1-based), y = ms
pub fn history_points(history: &[u64]) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .map(|(i, &ms)| ((i + 1) as f64, ms as f64))
        .collect()
}

/// Compute X (rounds) and Y (milliseconds) upper bounds for the session chart
pub fn compute_chart_params(points: &[(f64, f64)]) -> (f64, f64) {
    let slowest = points.iter().map(|&(_, ms)| ms).fold(0.0, f64::max);

    let rounds = match points.last() {
        Some(&(x, _)) if x > 1.0 => x,
        _ => 2.0,
    };

    // a little headroom so the slowest point doesn't sit on the border
    (rounds, (slowest * 11.0 / 10.0).ceil().max(100.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

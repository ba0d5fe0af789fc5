//! Small utilities to manage bounded history buffers for charts.

use std::collections::VecDeque;

/// Push `v`, evicting from the front so the deque never holds more than `cap`.
pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    while dq.len() >= cap && !dq.is_empty() {
        dq.pop_front();
    }
    if cap > 0 {
        dq.push_back(v);
    }
}

/// Largest value plus 5% headroom, for chart axis scaling. Empty input is 0.
pub fn scaled_peak<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let peak = values.into_iter().fold(0.0_f64, f64::max);
    peak * 1.05
}

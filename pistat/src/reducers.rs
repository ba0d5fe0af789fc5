//! Projections of single snapshot fields into view slices.

use std::collections::VecDeque;

use crate::history::push_capped;
use crate::types::{CoreUsage, DiskData, HostData, RamData};

/// Samples of the aggregate busy percentage kept for the CPU sparkline.
pub const CPU_HISTORY: usize = 60;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostView {
    pub hostname: String,
    pub uptime_secs: f64,
}

impl HostView {
    pub fn from_data(h: &HostData) -> Self {
        Self {
            hostname: h.hostname.clone(),
            uptime_secs: h.uptime,
        }
    }

    /// "<n> min" under an hour, "<n> hours" after.
    pub fn uptime_label(&self) -> String {
        uptime_label(self.uptime_secs)
    }
}

pub fn uptime_label(secs: f64) -> String {
    if secs < 3600.0 {
        format!("{:.0} min", secs / 60.0)
    } else {
        format!("{:.0} hours", secs / 3600.0)
    }
}

/// Temperature in whole degrees Celsius.
pub fn reduce_temp(t: f64) -> i64 {
    t.round() as i64
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuView {
    /// Index 0 is the aggregate, the rest are individual cores.
    pub cores: Vec<CoreUsage>,
    /// Sum of the aggregate's ten counters; the denominator for process CPU share.
    pub total_jiffies: f64,
    pub avg_history: VecDeque<u64>,
}

impl CpuView {
    pub fn apply(&mut self, cores: &[CoreUsage]) {
        self.cores = cores.to_vec();
        self.total_jiffies = crate::procs::aggregate_jiffies(cores);
        if let Some(agg) = cores.first() {
            let v = agg.busy_percent().round() as u64;
            push_capped(&mut self.avg_history, v, CPU_HISTORY);
        }
    }

    pub fn aggregate(&self) -> Option<&CoreUsage> {
        self.cores.first()
    }

    pub fn per_core(&self) -> &[CoreUsage] {
        self.cores.get(1..).unwrap_or(&[])
    }
}

pub fn ram_used_percent(r: &RamData) -> f64 {
    if r.total <= 0.0 {
        return 0.0;
    }
    r.used / r.total * 100.0
}

/// `total - available`, floored at zero.
pub fn disk_used(d: &DiskData) -> f64 {
    (d.total - d.available).max(0.0)
}

pub fn disk_used_percent(d: &DiskData) -> f64 {
    if d.total <= 0.0 {
        return 0.0;
    }
    disk_used(d) / d.total * 100.0
}

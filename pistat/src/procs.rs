//! Process table: search filter, column ordering, CPU share.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{CoreUsage, ProcessData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcColumn {
    Pid,
    Name,
    Threads,
    #[default]
    Memory,
    Cpu,
}

impl ProcColumn {
    pub const ALL: [ProcColumn; 5] = [
        ProcColumn::Pid,
        ProcColumn::Name,
        ProcColumn::Threads,
        ProcColumn::Memory,
        ProcColumn::Cpu,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProcColumn::Pid => "PID",
            ProcColumn::Name => "Name",
            ProcColumn::Threads => "Thds",
            ProcColumn::Memory => "Mem",
            ProcColumn::Cpu => "CPU",
        }
    }

    // Natural direction of each column; `reversed` flips it.
    fn compare(self, a: &ProcessData, b: &ProcessData) -> Ordering {
        match self {
            ProcColumn::Pid => b.pid.total_cmp(&a.pid),
            ProcColumn::Name => a.name.cmp(&b.name),
            ProcColumn::Threads => b.threads.total_cmp(&a.threads),
            ProcColumn::Memory => b.mem.total_cmp(&a.mem),
            ProcColumn::Cpu => b.cpu_usage.total_cmp(&a.cpu_usage),
        }
    }
}

/// Active sort column plus direction flag. Persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcOrdering {
    #[serde(rename = "ord")]
    pub column: ProcColumn,
    #[serde(rename = "rev")]
    pub reversed: bool,
}

impl ProcOrdering {
    /// Header click: same column flips direction, another column starts natural.
    pub fn toggled(self, column: ProcColumn) -> Self {
        if self.column == column {
            Self {
                column,
                reversed: !self.reversed,
            }
        } else {
            Self {
                column,
                reversed: false,
            }
        }
    }

    /// Header label with a direction marker on the active column.
    pub fn header_label(&self, column: ProcColumn) -> String {
        let label = column.label();
        if self.column != column {
            return label.to_string();
        }
        let arrow = if self.reversed { "▲" } else { "▼" };
        if column == ProcColumn::Name {
            format!("{label}{arrow}")
        } else {
            format!("{arrow}{label}")
        }
    }
}

/// Decimal pid as shown in the table; integral values print without a fraction.
pub fn pid_label(pid: f64) -> String {
    format!("{pid}")
}

fn matches(p: &ProcessData, needle_lower: &str, raw: &str) -> bool {
    raw.is_empty()
        || p.name.to_lowercase().contains(needle_lower)
        || pid_label(p.pid).starts_with(raw)
}

/// Filter by `search` and sort by `ordering`.
pub fn visible_processes(
    processes: &[ProcessData],
    search: &str,
    ordering: ProcOrdering,
) -> Vec<ProcessData> {
    let needle = search.to_lowercase();
    let mut out: Vec<ProcessData> = processes
        .iter()
        .filter(|p| matches(p, &needle, search))
        .cloned()
        .collect();
    out.sort_by(|a, b| ordering.column.compare(a, b));
    if ordering.reversed {
        out.reverse();
    }
    out
}

/// Share of the aggregate core's jiffies this tick, in percent. 0 when the
/// aggregate reports no time at all.
pub fn cpu_percent(p: &ProcessData, total_jiffies: f64) -> f64 {
    if total_jiffies <= 0.0 {
        return 0.0;
    }
    p.cpu_usage / total_jiffies * 100.0
}

/// Total jiffies of the aggregate core (index 0), or 0 without CPU data.
pub fn aggregate_jiffies(cores: &[CoreUsage]) -> f64 {
    cores.first().map(CoreUsage::total_jiffies).unwrap_or(0.0)
}

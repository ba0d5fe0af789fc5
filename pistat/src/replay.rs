//! Headless replay: feed recorded frames (one JSON document per line) through
//! the dashboard and summarize the resulting state.

use std::fmt;
use std::io::BufRead;

use crate::dashboard::{Dashboard, FrameOutcome};
use crate::procs::pid_label;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayStats {
    pub applied: usize,
    pub discarded: usize,
    /// 1-based line of the frame that tripped the latch.
    pub rejected_at: Option<usize>,
}

pub fn replay<R: BufRead>(dash: &mut Dashboard, input: R) -> std::io::Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match dash.apply_frame(&line) {
            FrameOutcome::Applied => stats.applied += 1,
            FrameOutcome::Rejected(_) => stats.rejected_at = Some(i + 1),
            FrameOutcome::Discarded => stats.discarded += 1,
        }
    }
    Ok(stats)
}

/// Plain-text report of the derived view state.
pub struct Summary<'a> {
    dash: &'a Dashboard,
    stats: &'a ReplayStats,
}

pub fn summary<'a>(dash: &'a Dashboard, stats: &'a ReplayStats) -> Summary<'a> {
    Summary { dash, stats }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.dash.state();
        writeln!(
            f,
            "frames: {} applied, {} discarded",
            self.stats.applied, self.stats.discarded
        )?;
        if let Some(err) = s.error() {
            let line = self.stats.rejected_at.unwrap_or(0);
            return writeln!(f, "error (line {line}): {err}");
        }
        if let Some(h) = &s.host {
            writeln!(f, "host: {} (up {})", h.hostname, h.uptime_label())?;
        }
        if let Some(t) = s.temp {
            writeln!(f, "temp: {t}°C")?;
        }
        let nv = s.net_view();
        match &nv.interface {
            Some(name) => writeln!(
                f,
                "net: {name} samples={} max={:.1} down_total={} up_total={}",
                nv.speeds.len(),
                nv.max,
                nv.totals.download,
                nv.totals.upload
            )?,
            None => writeln!(f, "net: no interface")?,
        }
        if !s.cpu.cores.is_empty() {
            writeln!(
                f,
                "cpu: {} cores, {} jiffies",
                s.cpu.per_core().len(),
                s.cpu.total_jiffies
            )?;
        }
        writeln!(
            f,
            "ram: {} / {} | disks: {}",
            s.ram.used,
            s.ram.total,
            s.disks.len()
        )?;
        let procs = s.visible_processes();
        writeln!(
            f,
            "processes: {} (order {:?}{})",
            procs.len(),
            s.ordering.column,
            if s.ordering.reversed { ", reversed" } else { "" }
        )?;
        for p in procs.iter().take(5) {
            writeln!(
                f,
                "  {:>7} {:<20} {:>5.1}%",
                pid_label(p.pid),
                p.name,
                s.process_cpu_percent(p)
            )?;
        }
        Ok(())
    }
}

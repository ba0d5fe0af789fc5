//! Dashboard state and the per-frame reducer.
//!
//! One inbound frame is fully handled (validate, fan out, derive, notify)
//! before the next one is looked at. After the first bad frame the error
//! latch is tripped and every later frame and user action is discarded.

use tracing::{debug, warn};

use crate::error::FrameError;
use crate::latch::ErrorLatch;
use crate::net::NetAggregator;
use crate::prefs::{save_value, PreferenceStore, Preferences, Tab, ORDER_KEY, TAB_KEY};
use crate::procs::{cpu_percent, visible_processes, ProcColumn, ProcOrdering};
use crate::reducers::{reduce_temp, CpuView, HostView};
use crate::selection::{InterfaceSelection, NetView, SwitchDirection};
use crate::types::{DiskData, ProcessData, RamData, Snapshot};
use crate::validate::{parse_binary_frame, parse_frame};

/// Everything rendering reads.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub host: Option<HostView>,
    pub temp: Option<i64>,
    pub net: NetAggregator,
    pub selection: InterfaceSelection,
    pub cpu: CpuView,
    pub ram: RamData,
    pub disks: Vec<DiskData>,
    pub processes: Vec<ProcessData>,
    pub ordering: ProcOrdering,
    pub search: String,
    pub tab: Tab,
    pub latch: ErrorLatch,
    pub ticks: u64,
}

impl DashboardState {
    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            tab: prefs.tab,
            ordering: prefs.ordering,
            ..Self::default()
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.latch.message()
    }

    pub fn net_view(&self) -> NetView {
        self.selection.view(&self.net)
    }

    pub fn visible_processes(&self) -> Vec<ProcessData> {
        visible_processes(&self.processes, &self.search, self.ordering)
    }

    pub fn process_cpu_percent(&self, p: &ProcessData) -> f64 {
        cpu_percent(p, self.cpu.total_jiffies)
    }

    fn apply_snapshot(&mut self, s: Snapshot) {
        if let Some(h) = &s.host {
            self.host = Some(HostView::from_data(h));
        }
        if let Some(t) = s.temp {
            self.temp = Some(reduce_temp(t));
        }
        if let Some(stats) = &s.net_stats {
            let dominant = self.net.apply(stats);
            self.selection.on_totals(self.net.totals());
            debug!(
                interfaces = stats.len(),
                dominant = dominant.as_deref().unwrap_or("-"),
                selected = self.selection.selected().unwrap_or("-"),
                "net stats applied"
            );
        }
        if let Some(cores) = &s.cpu_usage {
            self.cpu.apply(cores);
        }
        if let Some(ram) = s.ram {
            self.ram = ram;
        }
        if let Some(disks) = s.disk {
            self.disks = disks;
        }
        if let Some(procs) = s.proc {
            self.processes = procs;
        }
        self.ticks += 1;
    }
}

/// Outcome of feeding one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Applied,
    /// The frame was rejected and the latch tripped.
    Rejected(FrameError),
    /// The latch was already tripped; the frame was not looked at.
    Discarded,
}

type Observer = Box<dyn FnMut(&DashboardState)>;

pub struct Dashboard {
    state: DashboardState,
    store: Box<dyn PreferenceStore>,
    observers: Vec<Observer>,
}

impl Dashboard {
    /// Build a dashboard, loading sort order and tab from `store`.
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let prefs = Preferences::load(store.as_ref());
        Self {
            state: DashboardState::with_preferences(prefs),
            store,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Register a callback run after every state change.
    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(&DashboardState) + 'static,
    {
        self.observers.push(Box::new(f));
    }

    fn notify(&mut self) {
        for obs in self.observers.iter_mut() {
            obs(&self.state);
        }
    }

    pub fn apply_frame(&mut self, raw: &str) -> FrameOutcome {
        if self.state.latch.is_tripped() {
            return FrameOutcome::Discarded;
        }
        self.apply_parsed(parse_frame(raw))
    }

    pub fn apply_binary_frame(&mut self, raw: &[u8]) -> FrameOutcome {
        if self.state.latch.is_tripped() {
            return FrameOutcome::Discarded;
        }
        self.apply_parsed(parse_binary_frame(raw))
    }

    fn apply_parsed(&mut self, parsed: Result<Snapshot, FrameError>) -> FrameOutcome {
        let outcome = match parsed {
            Ok(snapshot) => {
                self.state.apply_snapshot(snapshot);
                FrameOutcome::Applied
            }
            Err(e) => {
                warn!(kind = ?e.kind(), "latching on bad frame: {e}");
                self.state.latch.trip(e.to_string());
                FrameOutcome::Rejected(e)
            }
        };
        self.notify();
        outcome
    }

    pub fn cycle_interface(&mut self, direction: SwitchDirection) {
        if self.state.latch.is_tripped() {
            return;
        }
        self.state.selection.cycle(direction, self.state.net.totals());
        self.notify();
    }

    pub fn sort_by(&mut self, column: ProcColumn) {
        if self.state.latch.is_tripped() {
            return;
        }
        self.state.ordering = self.state.ordering.toggled(column);
        if let Err(e) = save_value(self.store.as_mut(), ORDER_KEY, &self.state.ordering) {
            warn!("could not persist sort order: {e}");
        }
        self.notify();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        if self.state.latch.is_tripped() {
            return;
        }
        self.state.search = search.into();
        self.notify();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.state.latch.is_tripped() || self.state.tab == tab {
            return;
        }
        self.state.tab = tab;
        if let Err(e) = save_value(self.store.as_mut(), TAB_KEY, &tab) {
            warn!("could not persist tab: {e}");
        }
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::prefs::MemoryStore;
    use std::cell::Cell;
    use std::rc::Rc;

    fn net_frame(ifaces: &[(&str, u64)]) -> String {
        let stats: Vec<String> = ifaces
            .iter()
            .map(|(name, total)| {
                format!(
                    r#"{{"interface": {{"interface_path": "/sys/class/net/{name}", "interface_name": "{name}"}},
                        "upload_total": 0, "download_total": {total},
                        "upload_speed": 1.0, "download_speed": 2.0, "timestamp": 0}}"#
                )
            })
            .collect();
        format!(r#"{{"net_stats": [{}]}}"#, stats.join(","))
    }

    const PROCS: &str = r#"{
        "cpu_usage": [{"user": 10, "nice": 0, "system": 10, "idle": 80, "iowait": 0,
                       "irq": 0, "softirq": 0, "steal": 0, "guest": 0, "guest_nice": 0}],
        "proc": [
            {"pid": 1, "threads": 1, "name": "bash", "mem": 10, "cpu_usage": 5, "start_time": 0},
            {"pid": 42, "threads": 2, "name": "zsh", "mem": 20, "cpu_usage": 10, "start_time": 0}
        ]
    }"#;

    fn dashboard() -> Dashboard {
        Dashboard::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn partial_ticks_leave_other_fields_alone() {
        let mut d = dashboard();
        assert_eq!(d.apply_frame(r#"{"host": {"hostname": "pi", "uptime": 60}, "temp": 41.2}"#), FrameOutcome::Applied);
        assert_eq!(d.apply_frame(PROCS), FrameOutcome::Applied);
        let s = d.state();
        assert_eq!(s.host.as_ref().unwrap().hostname, "pi");
        assert_eq!(s.temp, Some(41));
        assert_eq!(s.processes.len(), 2);
        assert_eq!(s.ticks, 2);
    }

    #[test]
    fn net_selection_follows_vanishing_interface() {
        let mut d = dashboard();
        d.apply_frame(&net_frame(&[("eth0", 300), ("wlan0", 500)]));
        d.cycle_interface(SwitchDirection::Back);
        assert_eq!(d.state().selection.selected(), Some("eth0"));
        d.apply_frame(&net_frame(&[("wlan0", 500)]));
        assert_eq!(d.state().selection.selected(), Some("wlan0"));
        d.apply_frame(r#"{"net_stats": []}"#);
        assert_eq!(d.state().selection.selected(), None);
        assert_eq!(d.state().net_view(), NetView::default());
    }

    #[test]
    fn process_view_uses_search_and_ordering() {
        let mut d = dashboard();
        d.apply_frame(PROCS);
        // default ordering is memory descending
        let pids: Vec<u64> = d.state().visible_processes().iter().map(|p| p.pid as u64).collect();
        assert_eq!(pids, vec![42, 1]);
        d.sort_by(ProcColumn::Memory);
        let pids: Vec<u64> = d.state().visible_processes().iter().map(|p| p.pid as u64).collect();
        assert_eq!(pids, vec![1, 42]);
        d.set_search("4");
        assert_eq!(d.state().visible_processes().len(), 1);
        let zsh = &d.state().visible_processes()[0];
        assert!((d.state().process_cpu_percent(zsh) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn huge_jiffy_counters_apply_without_overflow() {
        let mut d = dashboard();
        let frame = format!(
            r#"{{"cpu_usage": [{{"user": {max}, "nice": 1, "system": 0, "idle": {max}, "iowait": 0,
                "irq": 0, "softirq": 0, "steal": 0, "guest": 0, "guest_nice": 0}}],
                "proc": [{{"pid": 3, "threads": 1, "name": "hog", "mem": 1, "cpu_usage": {max}, "start_time": 0}}]}}"#,
            max = u64::MAX
        );
        assert_eq!(d.apply_frame(&frame), FrameOutcome::Applied);
        let s = d.state();
        assert!(s.cpu.total_jiffies.is_finite());
        assert_eq!(s.cpu.avg_history.back(), Some(&50));
        let pct = s.process_cpu_percent(&s.processes[0]);
        assert!((pct - 50.0).abs() < 1e-6, "{pct}");
    }

    #[test]
    fn fractional_numbers_do_not_latch() {
        let mut d = dashboard();
        let frame = r#"{
            "cpu_usage": [{"user": 1.0, "nice": 0, "system": 0.5, "idle": 2.5, "iowait": 0,
                           "irq": 0, "softirq": 0, "steal": 0, "guest": 0, "guest_nice": 0}],
            "ram": {"total": 1024.0, "used": 256.5, "available": 767.5, "free": 500, "cached": 0.25},
            "proc": [{"pid": 1, "threads": 1, "name": "a", "mem": 1024.0, "cpu_usage": 0.5, "start_time": 0}]
        }"#;
        assert_eq!(d.apply_frame(frame), FrameOutcome::Applied);
        let s = d.state();
        assert!(s.error().is_none());
        assert_eq!(s.cpu.total_jiffies, 4.0);
        assert_eq!(s.ram.used, 256.5);
        assert!((s.process_cpu_percent(&s.processes[0]) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn latch_is_idempotent_and_freezes_state() {
        let mut d = dashboard();
        d.apply_frame(&net_frame(&[("eth0", 300)]));
        let outcome = d.apply_frame(r#"{"temp": "warm"}"#);
        let FrameOutcome::Rejected(e) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(e.kind(), ErrorKind::SchemaViolation);
        let msg = d.state().error().unwrap().to_string();
        let ticks = d.state().ticks;
        let view = d.state().net_view();

        assert_eq!(d.apply_frame(PROCS), FrameOutcome::Discarded);
        assert_eq!(d.apply_frame(&net_frame(&[("wlan0", 900)])), FrameOutcome::Discarded);
        d.cycle_interface(SwitchDirection::Forward);
        d.set_search("zsh");

        assert_eq!(d.state().error(), Some(msg.as_str()));
        assert_eq!(d.state().ticks, ticks);
        assert!(d.state().processes.is_empty());
        assert_eq!(d.state().net_view(), view);
        assert!(d.state().search.is_empty());
    }

    #[test]
    fn malformed_json_latches() {
        let mut d = dashboard();
        let FrameOutcome::Rejected(e) = d.apply_frame("{\"temp\": 4") else {
            panic!("expected rejection");
        };
        assert_eq!(e.kind(), ErrorKind::MalformedEncoding);
        assert!(d.state().error().unwrap().contains("not valid JSON"));
        assert_eq!(d.apply_binary_frame(b"{}"), FrameOutcome::Discarded);
    }

    #[test]
    fn observers_see_every_change() {
        let mut d = dashboard();
        let seen = Rc::new(Cell::new(0));
        let seen2 = Rc::clone(&seen);
        d.subscribe(move |_| seen2.set(seen2.get() + 1));
        d.apply_frame("{}");
        d.apply_frame("nope");
        d.apply_frame("{}");
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn preferences_load_and_persist() {
        let mut store = MemoryStore::new();
        store.set(TAB_KEY, "\"proc-tab\"".into()).unwrap();
        store
            .set(ORDER_KEY, r#"{"ord":"cpu","rev":true}"#.into())
            .unwrap();
        let mut d = Dashboard::new(Box::new(store));
        assert_eq!(d.state().tab, Tab::Proc);
        assert_eq!(
            d.state().ordering,
            ProcOrdering {
                column: ProcColumn::Cpu,
                reversed: true
            }
        );
        d.sort_by(ProcColumn::Cpu);
        d.set_tab(Tab::Net);
        assert!(!d.state().ordering.reversed);
        assert_eq!(
            d.store.get(ORDER_KEY).as_deref(),
            Some(r#"{"ord":"cpu","rev":false}"#)
        );
        assert_eq!(d.store.get(TAB_KEY).as_deref(), Some("\"net-tab\""));
    }
}

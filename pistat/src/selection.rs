//! Selected network interface cursor.

use crate::net::{NetAggregator, NetTotal, NetTotals, NetValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDirection {
    Back,
    Forward,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSelection {
    selected: Option<String>,
}

/// What the network pane shows for the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetView {
    pub interface: Option<String>,
    pub speeds: Vec<NetValues>,
    pub max: f64,
    pub totals: NetTotal,
    pub has_prev: bool,
    pub has_next: bool,
}

impl InterfaceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Re-anchor after the totals were replaced.
    pub fn on_totals(&mut self, totals: &NetTotals) {
        let keep = self.selected.as_deref().is_some_and(|s| totals.contains(s));
        if !keep {
            self.selected = totals.dominant().map(str::to_string);
        }
    }

    /// Move one step through the sorted interface names. Does not wrap.
    pub fn cycle(&mut self, direction: SwitchDirection, totals: &NetTotals) {
        let names = totals.sorted_names();
        let Some(prev) = self.selected.clone() else {
            self.selected = totals.dominant().map(str::to_string);
            return;
        };

        let target = match names.iter().position(|n| *n == prev) {
            None => totals.dominant().map(str::to_string),
            Some(i) => match direction {
                SwitchDirection::Back if i == 0 => Some(prev.clone()),
                SwitchDirection::Back => names.get(i - 1).cloned(),
                SwitchDirection::Forward => names.get(i + 1).cloned().or(Some(prev.clone())),
            },
        };

        // a target outside the current names leaves the cursor where it was
        if let Some(t) = target.filter(|t| names.contains(t)) {
            self.selected = Some(t);
        }
    }

    pub fn view(&self, agg: &NetAggregator) -> NetView {
        let Some(name) = self.selected.as_deref() else {
            return NetView::default();
        };
        let names = agg.totals().sorted_names();
        let pos = names.iter().position(|n| n == name);
        NetView {
            interface: Some(name.to_string()),
            speeds: agg
                .series(name)
                .map(|dq| dq.iter().copied().collect())
                .unwrap_or_default(),
            max: agg.maximum(name),
            totals: agg.totals().get(name).copied().unwrap_or_default(),
            has_prev: pos.is_some_and(|i| i > 0),
            has_next: pos.is_some_and(|i| i + 1 < names.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::tests::sample;

    fn setup(ifaces: &[(&str, u64)]) -> (NetAggregator, InterfaceSelection) {
        let mut agg = NetAggregator::new();
        let stats: Vec<_> = ifaces
            .iter()
            .map(|(n, total)| sample(n, 1.0, 1.0, *total, 0))
            .collect();
        agg.apply(&stats);
        let mut sel = InterfaceSelection::new();
        sel.on_totals(agg.totals());
        (agg, sel)
    }

    #[test]
    fn first_totals_select_dominant() {
        let (_, sel) = setup(&[("eth0", 300), ("wlan0", 500)]);
        assert_eq!(sel.selected(), Some("wlan0"));
    }

    #[test]
    fn selection_survives_while_present() {
        let (mut agg, mut sel) = setup(&[("eth0", 300), ("wlan0", 500)]);
        sel.cycle(SwitchDirection::Back, agg.totals());
        assert_eq!(sel.selected(), Some("eth0"));
        agg.apply(&[sample("eth0", 0.0, 0.0, 1, 0), sample("wlan0", 0.0, 0.0, 900, 0)]);
        sel.on_totals(agg.totals());
        assert_eq!(sel.selected(), Some("eth0"));
    }

    #[test]
    fn vanished_selection_moves_to_dominant() {
        let (mut agg, mut sel) = setup(&[("eth0", 300), ("wlan0", 500)]);
        sel.cycle(SwitchDirection::Back, agg.totals());
        assert_eq!(sel.selected(), Some("eth0"));
        agg.apply(&[sample("wlan0", 0.0, 0.0, 500, 0)]);
        sel.on_totals(agg.totals());
        assert_eq!(sel.selected(), Some("wlan0"));
    }

    #[test]
    fn empty_totals_clear_selection() {
        let (mut agg, mut sel) = setup(&[("eth0", 300)]);
        agg.apply(&[]);
        sel.on_totals(agg.totals());
        assert_eq!(sel.selected(), None);
        assert_eq!(sel.view(&agg), NetView::default());
    }

    #[test]
    fn cycling_stops_at_boundaries() {
        let (agg, mut sel) = setup(&[("wlan0", 500), ("eth0", 300)]);
        sel.cycle(SwitchDirection::Back, agg.totals());
        assert_eq!(sel.selected(), Some("eth0"));
        sel.cycle(SwitchDirection::Back, agg.totals());
        assert_eq!(sel.selected(), Some("eth0"));
        sel.cycle(SwitchDirection::Forward, agg.totals());
        assert_eq!(sel.selected(), Some("wlan0"));
        sel.cycle(SwitchDirection::Forward, agg.totals());
        assert_eq!(sel.selected(), Some("wlan0"));
    }

    #[test]
    fn cycle_without_selection_picks_dominant() {
        let (agg, _) = setup(&[("eth0", 300), ("wlan0", 500)]);
        let mut sel = InterfaceSelection::new();
        sel.cycle(SwitchDirection::Forward, agg.totals());
        assert_eq!(sel.selected(), Some("wlan0"));
    }

    #[test]
    fn cycle_on_empty_totals_keeps_stale_cursor() {
        let (mut agg, mut sel) = setup(&[("eth0", 300)]);
        agg.apply(&[]);
        // the cursor is not re-anchored here on purpose, only cycled
        sel.cycle(SwitchDirection::Forward, agg.totals());
        assert_eq!(sel.selected(), Some("eth0"));
    }

    #[test]
    fn view_reports_series_and_arrows() {
        let (agg, mut sel) = setup(&[("eth0", 300), ("lo", 10), ("wlan0", 500)]);
        sel.cycle(SwitchDirection::Back, agg.totals());
        let v = sel.view(&agg);
        assert_eq!(v.interface.as_deref(), Some("lo"));
        assert_eq!(v.speeds.len(), 1);
        assert!((v.max - 1.05).abs() < 1e-9);
        assert_eq!(v.totals.download, 10.0);
        assert!(v.has_prev && v.has_next);
    }
}

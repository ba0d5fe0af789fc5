//! Network aggregation: per-interface speed history, latest totals, chart maxima
//! and the dominant interface.

use std::collections::{HashMap, VecDeque};

use crate::history::{push_capped, scaled_peak};
use crate::types::NetData;

/// Samples kept per interface.
pub const MAX_NET_SAMPLES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetValues {
    pub download: f64,
    pub upload: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetTotal {
    pub download: f64,
    pub upload: f64,
}

impl NetTotal {
    pub fn sum(&self) -> f64 {
        self.download + self.upload
    }
}

/// Latest cumulative totals, in the order the producer listed the interfaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetTotals {
    entries: Vec<(String, NetTotal)>,
}

impl NetTotals {
    pub fn from_stats(stats: &[NetData]) -> Self {
        let mut totals = Self::default();
        for s in stats {
            totals.insert(
                s.name(),
                NetTotal {
                    download: s.download_total,
                    upload: s.upload_total,
                },
            );
        }
        totals
    }

    // a repeated name keeps its first position but takes the latest value
    fn insert(&mut self, name: &str, total: NetTotal) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, t)) => *t = total,
            None => self.entries.push((name.to_string(), total)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NetTotal> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Names in producer order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Names sorted lexicographically, as used for cycling.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Interface with the largest download+upload. Ties go to the one listed first.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, t) in &self.entries {
            let sum = t.sum();
            if best.map_or(true, |(_, b)| sum > b) {
                best = Some((name.as_str(), sum));
            }
        }
        best.map(|(n, _)| n)
    }
}

#[derive(Debug, Default)]
pub struct NetAggregator {
    series: HashMap<String, VecDeque<NetValues>>,
    totals: NetTotals,
    maxima: HashMap<String, f64>,
}

impl NetAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick's `net_stats` in. Returns the dominant interface of the new totals.
    pub fn apply(&mut self, stats: &[NetData]) -> Option<String> {
        let mut changed: Vec<&str> = Vec::new();
        for s in stats {
            let dq = self
                .series
                .entry(s.name().to_string())
                .or_insert_with(|| VecDeque::with_capacity(MAX_NET_SAMPLES));
            push_capped(
                dq,
                NetValues {
                    download: s.download_speed,
                    upload: s.upload_speed,
                },
                MAX_NET_SAMPLES,
            );
            if !changed.contains(&s.name()) {
                changed.push(s.name());
            }
        }

        for name in changed {
            let peak = self
                .series
                .get(name)
                .map(|dq| scaled_peak(dq.iter().flat_map(|v| [v.download, v.upload])))
                .unwrap_or(0.0);
            self.maxima.insert(name.to_string(), peak);
        }

        // vanished interfaces drop out of the totals; their series stay frozen
        self.totals = NetTotals::from_stats(stats);
        self.totals.dominant().map(str::to_string)
    }

    pub fn totals(&self) -> &NetTotals {
        &self.totals
    }

    pub fn series(&self, name: &str) -> Option<&VecDeque<NetValues>> {
        self.series.get(name)
    }

    pub fn maximum(&self, name: &str) -> f64 {
        self.maxima.get(name).copied().unwrap_or(0.0)
    }

    /// Interfaces with a series but no entry in the latest totals.
    pub fn stale_interfaces(&self) -> Vec<&str> {
        let mut stale: Vec<&str> = self
            .series
            .keys()
            .map(String::as_str)
            .filter(|n| !self.totals.contains(n))
            .collect();
        stale.sort_unstable();
        stale
    }
}

//! Types that mirror the producer's JSON schema.
//!
//! Every top-level field of [`Snapshot`] is optional: a missing field means
//! "no change this tick". The validator decodes each field separately so a
//! shape error can be reported against the field that caused it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HostData {
    pub hostname: String,
    // seconds since boot
    pub uptime: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct NetInterface {
    pub interface_path: String,
    pub interface_name: String,
}

/// One interface's reading for a single tick.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NetData {
    pub interface: NetInterface,
    // cumulative counters reported by the producer; never summed client-side
    pub upload_total: f64,
    pub download_total: f64,
    // bytes per second
    pub upload_speed: f64,
    pub download_speed: f64,
    pub timestamp: f64,
}

impl NetData {
    pub fn name(&self) -> &str {
        &self.interface.interface_name
    }
}

/// Jiffy counters for one core. Index 0 of a snapshot's list is the aggregate.
///
/// The producer sends plain JSON numbers, so counters are kept as `f64`: sums
/// of huge counters lose precision instead of overflowing.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct CoreUsage {
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub idle: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
    pub guest_nice: f64,
}

impl CoreUsage {
    /// Sum of all ten counters.
    pub fn total_jiffies(&self) -> f64 {
        self.busy_base() + self.guest + self.guest_nice
    }

    // guest time is already accounted in user/nice, so the busy ratio leaves it out
    fn busy_base(&self) -> f64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }

    pub fn busy_percent(&self) -> f64 {
        let total = self.busy_base();
        if total <= 0.0 {
            return 0.0;
        }
        let idle = self.idle + self.iowait;
        ((total - idle) / total * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct RamData {
    pub total: f64,
    pub used: f64,
    pub available: f64,
    pub free: f64,
    pub cached: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DiskData {
    pub filesystem: String,
    pub mountpoint: String,
    pub total: f64,
    pub available: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProcessData {
    pub pid: f64,
    pub name: String,
    pub mem: f64,
    pub threads: f64,
    // jiffies spent on CPU, compared against the aggregate core's total
    pub cpu_usage: f64,
    pub start_time: f64,
}

/// One validated tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub host: Option<HostData>,
    pub temp: Option<f64>,
    pub net_stats: Option<Vec<NetData>>,
    pub cpu_usage: Option<Vec<CoreUsage>>,
    pub ram: Option<RamData>,
    pub disk: Option<Vec<DiskData>>,
    pub proc: Option<Vec<ProcessData>>,
}

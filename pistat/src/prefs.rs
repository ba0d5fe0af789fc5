//! UI preferences: a small key-value port plus a JSON file implementation.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/pistat/prefs.json (fallback ~/.config/pistat/prefs.json)

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};
use tracing::warn;

use crate::error::PrefsError;
use crate::procs::ProcOrdering;

pub const TAB_KEY: &str = "tab-store";
pub const ORDER_KEY: &str = "order-store";

/// Narrow persistence port the dashboard depends on.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), PrefsError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    #[serde(rename = "cpu-tab")]
    Cpu,
    #[serde(rename = "mem-tab")]
    Mem,
    #[serde(rename = "net-tab")]
    Net,
    #[serde(rename = "proc-tab")]
    Proc,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Cpu, Tab::Mem, Tab::Net, Tab::Proc];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Cpu => "CPU",
            Tab::Mem => "MEM",
            Tab::Net => "NET",
            Tab::Proc => "PS",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Read a typed value, falling back to the default when missing or unreadable.
pub fn load_value<T: DeserializeOwned + Default>(store: &dyn PreferenceStore, key: &str) -> T {
    match store.get(key) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, "ignoring stored preference: {e}");
            T::default()
        }),
        None => T::default(),
    }
}

pub fn save_value<T: Serialize>(
    store: &mut dyn PreferenceStore,
    key: &str,
    value: &T,
) -> Result<(), PrefsError> {
    store.set(key, serde_json::to_string(value)?)
}

/// Preferences loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub tab: Tab,
    pub ordering: ProcOrdering,
}

impl Preferences {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            tab: load_value(store, TAB_KEY),
            ordering: load_value(store, ORDER_KEY),
        }
    }
}

/// In-memory store, used with `--no-persist` and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PrefsFile {
    #[serde(default)]
    values: BTreeMap<String, String>,
    #[serde(default)]
    version: u32,
}

/// JSON file backed store. The whole file is rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    file: PrefsFile,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("pistat")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pistat")
    }
}

pub fn prefs_path() -> PathBuf {
    config_dir().join("prefs.json")
}

impl JsonFileStore {
    pub fn open_default() -> Self {
        Self::open(prefs_path())
    }

    // a missing or corrupt file starts empty rather than failing startup
    pub fn open(path: PathBuf) -> Self {
        let file = match fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %path.display(), "corrupt preferences file: {e}");
                PrefsFile::default()
            }),
            Err(_) => PrefsFile::default(),
        };
        Self { path, file }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&self.file)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.file.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PrefsError> {
        if self.file.values.get(key) == Some(&value) {
            return Ok(());
        }
        self.file.values.insert(key.to_string(), value);
        self.save()
    }
}

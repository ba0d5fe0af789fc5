//! Ingestion core for the pistat dashboard: frame validation, network
//! aggregation, interface selection, process views and the error latch.

pub mod dashboard;
pub mod error;
pub mod history;
pub mod latch;
pub mod net;
pub mod prefs;
pub mod procs;
pub mod reducers;
pub mod replay;
pub mod selection;
pub mod types;
pub mod validate;
pub mod ws;

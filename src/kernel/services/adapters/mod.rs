//! Service adapters: concrete hosts and configuration resolution.

pub mod config;
pub mod memory;
pub mod paths;
pub mod rpc;

pub use config::ConfigStore;
pub use memory::{HostCall, MemoryHost, StatusItemView};
pub use paths::{ensure_log_dir, get_log_dir};
pub use rpc::{serve, InitializeParams, RpcHost, PLUGIN_ID, PROTOCOL_VERSION};

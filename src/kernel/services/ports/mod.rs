//! Service ports: traits + data contracts.

pub mod config;
pub mod host;

pub use config::{
    Alignment, ConfigLayers, ConfigScope, ConfigSource, PATH_STYLE_KEY, STATUS_BAR_ALIGNMENT_KEY,
};
pub use host::{
    DocumentInfo, DocumentUri, EditorHost, EditorSnapshot, HostError, HostSnapshot, Platform,
    QuickPickItem, QuickPickOptions, Result as HostResult, StatusItemId, StatusItemSpec,
    StatusSide, SubscriptionId, WorkspaceFolder,
};

//! 宿主端口：插件核心与编辑器宿主之间的契约
//!
//! 宿主负责窗口/UI 原语（状态栏项、快速选择、命令表、配置存储、上下文标志），
//! 核心只通过 `EditorHost` 读取宿主状态并发出写操作。

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::{ConfigLayers, ConfigSource};
use crate::core::Command;
use crate::kernel::action::HostEvent;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("host connection closed")]
    Disconnected,
    #[error("host rejected {method}: {message}")]
    Rejected { method: String, message: String },
    #[error("malformed {method} payload: {source}")]
    Malformed {
        method: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("protocol violation: {0}")]
    Protocol(String),
    #[error("unknown status item: {0}")]
    UnknownStatusItem(StatusItemId),
    #[error("unknown subscription: {0}")]
    UnknownSubscription(SubscriptionId),
}

impl HostError {
    /// Whether the session with the host cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HostError::Disconnected | HostError::Protocol(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentUri(String);

impl DocumentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentUri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub uri: DocumentUri,
    pub file_name: String,
}

/// The host's focused editor. `view_column` is absent for editors that are
/// not laid out in the editor area (e.g. output panes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    #[serde(default)]
    pub view_column: Option<u32>,
    pub document: DocumentInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: String,
}

impl WorkspaceFolder {
    fn contains(&self, file: &str) -> bool {
        let is_separator = |c: char| c == '/' || c == '\\';
        if self.path.is_empty() {
            return false;
        }
        let root = self.path.trim_end_matches(is_separator);
        if root.is_empty() {
            // filesystem root owns every absolute path
            return file.starts_with(is_separator);
        }
        match file.strip_prefix(root) {
            Some(rest) => rest.is_empty() || rest.starts_with(is_separator),
            None => false,
        }
    }
}

/// Everything a host exposes for reading, in one serializable value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    #[serde(default)]
    pub active_editor: Option<EditorSnapshot>,
    #[serde(default)]
    pub workspace_folders: Vec<WorkspaceFolder>,
    #[serde(default)]
    pub configuration: ConfigLayers,
}

impl HostSnapshot {
    /// The innermost workspace folder containing the document.
    pub fn folder_for(&self, document: &DocumentInfo) -> Option<&WorkspaceFolder> {
        self.workspace_folders
            .iter()
            .filter(|folder| folder.contains(&document.file_name))
            .max_by_key(|folder| folder.path.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Darwin,
    Windows,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::Darwin,
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusItemSpec {
    pub side: StatusSide,
    pub text: String,
    pub tooltip: String,
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusItemId(pub u32);

impl fmt::Display for StatusItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u32);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickPickItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuickPickOptions {
    pub match_on_detail: bool,
}

/// The editor as seen from the plugin core.
///
/// Reads return owned snapshots of the live host state; handlers call them on
/// every event instead of caching. Writes are awaited: a call returns once the
/// host has accepted it.
pub trait EditorHost: ConfigSource {
    fn active_editor(&self) -> Option<EditorSnapshot>;

    fn workspace_folder_for(&self, document: &DocumentInfo) -> Option<WorkspaceFolder>;

    fn workspace_folders(&self) -> Vec<WorkspaceFolder>;

    fn platform(&self) -> Platform;

    /// Publishes a boolean to the host's UI-conditional system.
    fn set_context(&mut self, key: &str, value: bool) -> Result<()>;

    fn execute_command(&mut self, command: &str, args: Vec<Value>) -> Result<()>;

    fn update_configuration(&mut self, section: &str, key: &str, value: Value) -> Result<()>;

    /// Returns the index of the chosen item, or `None` when dismissed.
    fn show_quick_pick(
        &mut self,
        items: &[QuickPickItem],
        options: QuickPickOptions,
    ) -> Result<Option<usize>>;

    fn create_status_item(&mut self, spec: StatusItemSpec) -> Result<StatusItemId>;

    fn set_status_text(&mut self, id: StatusItemId, text: &str) -> Result<()>;

    fn set_status_visible(&mut self, id: StatusItemId, visible: bool) -> Result<()>;

    fn dispose_status_item(&mut self, id: StatusItemId) -> Result<()>;

    fn register_command(&mut self, command: Command) -> Result<SubscriptionId>;

    fn subscribe(&mut self, event: HostEvent) -> Result<SubscriptionId>;

    /// Releases a handle returned by `register_command` or `subscribe`.
    fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()>;
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/host.rs"]
mod tests;

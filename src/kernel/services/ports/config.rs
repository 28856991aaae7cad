use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::host::StatusSide;

pub const STATUS_BAR_ALIGNMENT_KEY: &str = "filePathBar.statusBarAlignment";
pub const PATH_STYLE_KEY: &str = "filePathBar.pathStyle";

/// Placement of the status item; `None` suppresses it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    None,
    #[default]
    Left,
    Right,
}

impl Alignment {
    pub fn side(self) -> Option<StatusSide> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some(StatusSide::Left),
            Alignment::Right => Some(StatusSide::Right),
        }
    }
}

/// Read access to the host's effective configuration, keyed by the full
/// dotted setting name (`filePathBar.pathStyle`).
pub trait ConfigSource {
    fn configuration(&self, key: &str) -> Option<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    User,
    Workspace,
}

/// Host configuration split by scope. The root workspace layer wins over the
/// user layer; callers supply defaults for keys set in neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigLayers {
    #[serde(default)]
    pub user: FxHashMap<String, Value>,
    #[serde(default)]
    pub workspace: FxHashMap<String, Value>,
}

impl ConfigLayers {
    pub fn resolve(&self, key: &str) -> Option<&Value> {
        self.workspace.get(key).or_else(|| self.user.get(key))
    }

    pub fn set(&mut self, scope: ConfigScope, key: impl Into<String>, value: Value) {
        let layer = match scope {
            ConfigScope::User => &mut self.user,
            ConfigScope::Workspace => &mut self.workspace,
        };
        layer.insert(key.into(), value);
    }

    pub fn remove(&mut self, scope: ConfigScope, key: &str) -> Option<Value> {
        match scope {
            ConfigScope::User => self.user.remove(key),
            ConfigScope::Workspace => self.workspace.remove(key),
        }
    }
}

impl ConfigSource for ConfigLayers {
    fn configuration(&self, key: &str) -> Option<Value> {
        self.resolve(key).cloned()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;

use serde_json::Value;

use crate::kernel::document::ActiveDocument;
use crate::kernel::locale::{LabelKey, LocaleResolver};
use crate::kernel::services::ports::host::{
    DocumentUri, EditorHost, Platform, QuickPickItem, Result,
};

/// A host command run against the active document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuAction {
    command: &'static str,
}

impl MenuAction {
    pub const fn new(command: &'static str) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &'static str {
        self.command
    }

    /// Dispatches exactly one host command with `uri` as its only argument.
    pub fn invoke(&self, host: &mut dyn EditorHost, uri: &DocumentUri) -> Result<()> {
        host.execute_command(self.command, vec![Value::from(uri.as_str())])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: LabelKey,
    pub label: String,
    /// Untranslated key, only set when the label is a translation.
    pub detail: Option<String>,
    pub action: MenuAction,
    pub target: DocumentUri,
}

impl MenuEntry {
    pub fn run(&self, host: &mut dyn EditorHost) -> Result<()> {
        self.action.invoke(host, &self.target)
    }

    pub fn quick_pick_item(&self) -> QuickPickItem {
        QuickPickItem {
            label: self.label.clone(),
            detail: self.detail.clone(),
        }
    }
}

fn menu_items(platform: Platform) -> [(LabelKey, MenuAction); 7] {
    let reveal = match platform {
        Platform::Darwin => LabelKey::RevealInFinder,
        Platform::Windows | Platform::Linux | Platform::Other => LabelKey::RevealInFileExplorer,
    };
    [
        (reveal, MenuAction::new("revealFileInOS")),
        (LabelKey::CopyPath, MenuAction::new("copyFilePath")),
        (
            LabelKey::CopyRelativePath,
            MenuAction::new("copyRelativeFilePath"),
        ),
        (
            LabelKey::CompareWith,
            MenuAction::new("workbench.files.action.compareFileWith"),
        ),
        (
            LabelKey::CompareWithClipboard,
            MenuAction::new("workbench.files.action.compareWithClipboard"),
        ),
        (
            LabelKey::CompareWithSaved,
            MenuAction::new("workbench.files.action.compareWithSaved"),
        ),
        (
            LabelKey::RevealInSideBar,
            MenuAction::new("workbench.files.action.showActiveFileInExplorer"),
        ),
    ]
}

pub struct MenuBuilder<'a> {
    locale: &'a LocaleResolver,
    platform: Platform,
}

impl<'a> MenuBuilder<'a> {
    pub fn new(locale: &'a LocaleResolver, platform: Platform) -> Self {
        Self { locale, platform }
    }

    pub fn build(&self, document: &ActiveDocument) -> Vec<MenuEntry> {
        menu_items(self.platform)
            .into_iter()
            .map(|(key, action)| {
                let label = self.locale.map(key);
                let detail = (label != key.as_str()).then(|| key.as_str().to_string());
                MenuEntry {
                    key,
                    label,
                    detail,
                    action,
                    target: document.uri.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/menu.rs"]
mod tests;

//! 状态栏展示：根据当前文档状态维护唯一的状态栏项
//!
//! 对齐方式只在创建时读取一次，之后的配置变更不会移动已创建的状态栏项。

use crate::core::Command;
use crate::kernel::document::{ActiveDocument, ActiveDocumentState};
use crate::kernel::locale::{LabelKey, LocaleResolver};
use crate::kernel::path_style::PathStyle;
use crate::kernel::services::adapters::config::ConfigStore;
use crate::kernel::services::ports::host::{EditorHost, Result, StatusItemId, StatusItemSpec};

/// Text of a freshly created item, replaced by the first render.
pub const PLACEHOLDER_TEXT: &str = "$(file) dummy";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PresenterState {
    #[default]
    Hidden,
    Shown(String),
}

pub fn status_text(document: &ActiveDocument, style: PathStyle) -> String {
    format!(
        "{} ({})",
        style.format(&document.file_path),
        document.workspace_name
    )
}

pub struct StatusPresenter {
    item: Option<StatusItemId>,
    state: PresenterState,
}

impl StatusPresenter {
    pub fn create(host: &mut dyn EditorHost, locale: &LocaleResolver) -> Result<Self> {
        let alignment = ConfigStore::new(&*host).alignment();
        let item = match alignment.side() {
            Some(side) => Some(host.create_status_item(StatusItemSpec {
                side,
                text: PLACEHOLDER_TEXT.to_string(),
                tooltip: locale.map(LabelKey::MenuTitle),
                command: Command::Menu.name().to_string(),
            })?),
            None => {
                tracing::debug!("status item disabled by alignment");
                None
            }
        };

        Ok(Self {
            item,
            state: PresenterState::Hidden,
        })
    }

    pub fn item(&self) -> Option<StatusItemId> {
        self.item
    }

    pub fn state(&self) -> &PresenterState {
        &self.state
    }

    pub fn render(
        &mut self,
        host: &mut dyn EditorHost,
        document: &ActiveDocumentState,
        style: PathStyle,
    ) -> Result<()> {
        let next = match document.active() {
            Some(document) => PresenterState::Shown(status_text(document, style)),
            None => PresenterState::Hidden,
        };

        if let Some(item) = self.item {
            match &next {
                PresenterState::Shown(text) => {
                    host.set_status_text(item, text)?;
                    host.set_status_visible(item, true)?;
                }
                PresenterState::Hidden => host.set_status_visible(item, false)?,
            }
        }

        if next != self.state {
            tracing::debug!(state = ?next, "status presenter transition");
        }
        self.state = next;
        Ok(())
    }

    pub fn dispose(self, host: &mut dyn EditorHost) -> Result<()> {
        match self.item {
            Some(item) => host.dispose_status_item(item),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/status.rs"]
mod tests;

//! 插件激活上下文
//!
//! 持有状态栏展示器、本地化解析器和所有订阅句柄；
//! 事件处理器通过 `&mut self` 访问它们，停用时统一释放。

use crate::core::Command;
use crate::kernel::action::HostEvent;
use crate::kernel::document::ActiveDocumentState;
use crate::kernel::locale::LocaleResolver;
use crate::kernel::menu::{MenuBuilder, MenuEntry};
use crate::kernel::services::adapters::config::ConfigStore;
use crate::kernel::services::ports::host::{
    EditorHost, HostError, QuickPickItem, QuickPickOptions, Result, SubscriptionId,
};
use crate::kernel::status::StatusPresenter;
use crate::kernel::window_title;

/// Context flag telling host UI whether a document is active.
pub const CONTEXT_KEY: &str = "existsActiveTextDocument";

/// Handles returned by the host, released together on deactivation.
#[derive(Debug, Default)]
pub struct Subscriptions {
    handles: Vec<SubscriptionId>,
}

impl Subscriptions {
    pub fn push(&mut self, id: SubscriptionId) {
        self.handles.push(id);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Releases every handle, newest first. All handles are attempted even if
    /// one fails; the first failure is returned.
    pub fn dispose(&mut self, host: &mut dyn EditorHost) -> Result<()> {
        let mut first_err: Option<HostError> = None;
        for id in self.handles.drain(..).rev() {
            if let Err(e) = host.unsubscribe(id) {
                tracing::warn!(%id, error = %e, "unsubscribe failed");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

pub struct FilePathBar {
    presenter: StatusPresenter,
    locale: LocaleResolver,
    subscriptions: Subscriptions,
}

impl FilePathBar {
    /// Acquires the status item, commands and event subscriptions, then runs
    /// the first render and title update. On failure everything acquired so
    /// far is released before the error is returned.
    pub fn activate(host: &mut dyn EditorHost, locale: LocaleResolver) -> Result<Self> {
        let presenter = StatusPresenter::create(host, &locale)?;
        let mut this = Self {
            presenter,
            locale,
            subscriptions: Subscriptions::default(),
        };

        if let Err(e) = this.start(host) {
            tracing::warn!(error = %e, "activation failed, releasing acquired handles");
            if let Err(release) = this.deactivate(host) {
                tracing::warn!(error = %release, "release after failed activation");
            }
            return Err(e);
        }

        tracing::info!(
            subscriptions = this.subscriptions.len(),
            "file path bar activated"
        );
        Ok(this)
    }

    fn start(&mut self, host: &mut dyn EditorHost) -> Result<()> {
        self.subscriptions.push(host.register_command(Command::Menu)?);
        for event in HostEvent::ALL {
            self.subscriptions.push(host.subscribe(event)?);
        }
        self.update(host)?;

        self.subscriptions.push(host.register_command(Command::UpdateTitle)?);
        self.update_title(host)?;
        Ok(())
    }

    pub fn presenter(&self) -> &StatusPresenter {
        &self.presenter
    }

    pub fn locale(&self) -> &LocaleResolver {
        &self.locale
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn handle_event(&mut self, host: &mut dyn EditorHost, event: HostEvent) -> Result<()> {
        tracing::trace!(?event, "host event");
        self.update(host).map(|_| ())
    }

    pub fn execute_command(&mut self, host: &mut dyn EditorHost, name: &str) -> Result<()> {
        match Command::from_name(name) {
            Some(Command::Menu) => self.menu(host),
            Some(Command::UpdateTitle) => self.update_title(host).map(|_| ()),
            None => {
                tracing::warn!(command = name, "unknown command");
                Ok(())
            }
        }
    }

    /// Re-derives the document state from the live host, publishes the
    /// context flag, then renders the status item.
    pub fn update(&mut self, host: &mut dyn EditorHost) -> Result<ActiveDocumentState> {
        let state = ActiveDocumentState::derive(&*host);
        host.set_context(CONTEXT_KEY, state.is_present())?;
        let style = ConfigStore::new(&*host).path_style();
        self.presenter.render(host, &state, style)?;
        Ok(state)
    }

    pub fn menu(&mut self, host: &mut dyn EditorHost) -> Result<()> {
        let state = ActiveDocumentState::derive(&*host);
        let Some(document) = state.active() else {
            tracing::debug!("menu invoked without an active document");
            return Ok(());
        };

        let entries = MenuBuilder::new(&self.locale, host.platform()).build(document);
        let items: Vec<QuickPickItem> = entries.iter().map(MenuEntry::quick_pick_item).collect();
        let options = QuickPickOptions {
            match_on_detail: true,
        };

        let Some(index) = host.show_quick_pick(&items, options)? else {
            tracing::debug!("menu dismissed");
            return Ok(());
        };
        match entries.get(index) {
            Some(entry) => entry.run(host),
            None => {
                tracing::warn!(index, "quick pick returned an out-of-range index");
                Ok(())
            }
        }
    }

    pub fn update_title(&mut self, host: &mut dyn EditorHost) -> Result<Option<String>> {
        window_title::update_title(host)
    }

    pub fn deactivate(mut self, host: &mut dyn EditorHost) -> Result<()> {
        let unsubscribed = self.subscriptions.dispose(host);
        self.presenter.dispose(host)?;
        tracing::info!("file path bar deactivated");
        unsubscribed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/extension.rs"]
mod tests;

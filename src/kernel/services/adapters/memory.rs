//! 内存宿主：不依赖真实编辑器的 `EditorHost` 实现
//!
//! 记录所有写操作，供测试断言，也可供直接驱动核心的嵌入方使用。

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::core::Command;
use crate::kernel::action::HostEvent;
use crate::kernel::services::ports::config::{ConfigScope, ConfigSource};
use crate::kernel::services::ports::host::{
    DocumentInfo, DocumentUri, EditorHost, EditorSnapshot, HostError, HostSnapshot, Platform,
    QuickPickItem, QuickPickOptions, Result, StatusItemId, StatusItemSpec, SubscriptionId,
    WorkspaceFolder,
};

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetContext {
        key: String,
        value: bool,
    },
    ExecuteCommand {
        command: String,
        args: Vec<Value>,
    },
    UpdateConfiguration {
        section: String,
        key: String,
        value: Value,
    },
    QuickPick {
        items: Vec<QuickPickItem>,
        options: QuickPickOptions,
    },
    CreateStatusItem {
        id: StatusItemId,
        spec: StatusItemSpec,
    },
    SetStatusText {
        id: StatusItemId,
        text: String,
    },
    SetStatusVisible {
        id: StatusItemId,
        visible: bool,
    },
    DisposeStatusItem(StatusItemId),
    RegisterCommand(Command),
    Subscribe(HostEvent),
    Unsubscribe(SubscriptionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusItemView {
    pub spec: StatusItemSpec,
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Registration {
    Command(Command),
    Event(HostEvent),
}

pub struct MemoryHost {
    snapshot: HostSnapshot,
    platform: Platform,
    quick_pick_answers: VecDeque<Option<usize>>,
    calls: Vec<HostCall>,
    contexts: FxHashMap<String, bool>,
    status_items: FxHashMap<StatusItemId, StatusItemView>,
    registrations: FxHashMap<SubscriptionId, Registration>,
    rejected_events: Vec<HostEvent>,
    next_id: u32,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::with_snapshot(HostSnapshot::default())
    }

    pub fn with_snapshot(snapshot: HostSnapshot) -> Self {
        Self {
            snapshot,
            platform: Platform::Linux,
            quick_pick_answers: VecDeque::new(),
            calls: Vec::new(),
            contexts: FxHashMap::default(),
            status_items: FxHashMap::default(),
            registrations: FxHashMap::default(),
            rejected_events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn snapshot(&self) -> &HostSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut HostSnapshot {
        &mut self.snapshot
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    /// Focuses an editor laid out in the first view column.
    pub fn open(&mut self, file_name: &str) {
        self.snapshot.active_editor = Some(EditorSnapshot {
            view_column: Some(1),
            document: DocumentInfo {
                uri: DocumentUri::new(format!("file://{file_name}")),
                file_name: file_name.to_string(),
            },
        });
    }

    pub fn close_editor(&mut self) {
        self.snapshot.active_editor = None;
    }

    pub fn add_workspace_folder(&mut self, name: &str, path: &str) {
        self.snapshot.workspace_folders.push(WorkspaceFolder {
            name: name.to_string(),
            path: path.to_string(),
        });
    }

    pub fn set_config(&mut self, scope: ConfigScope, key: &str, value: Value) {
        self.snapshot.configuration.set(scope, key, value);
    }

    /// Queues the answer for the next quick pick; an empty queue means the
    /// user dismisses the prompt.
    pub fn answer_quick_pick(&mut self, answer: Option<usize>) {
        self.quick_pick_answers.push_back(answer);
    }

    /// Makes every later `subscribe` to `event` fail as a host rejection.
    pub fn reject_subscription(&mut self, event: HostEvent) {
        self.rejected_events.push(event);
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn context(&self, key: &str) -> Option<bool> {
        self.contexts.get(key).copied()
    }

    pub fn status_item(&self, id: StatusItemId) -> Option<&StatusItemView> {
        self.status_items.get(&id)
    }

    pub fn status_items(&self) -> impl Iterator<Item = (&StatusItemId, &StatusItemView)> {
        self.status_items.iter()
    }

    pub fn live_registrations(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_subscribed(&self, event: HostEvent) -> bool {
        self.registrations
            .values()
            .any(|r| *r == Registration::Event(event))
    }

    pub fn has_command(&self, command: Command) -> bool {
        self.registrations
            .values()
            .any(|r| *r == Registration::Command(command))
    }

    /// The last value written to `<section>.<key>`.
    pub fn written_configuration(&self, section: &str, key: &str) -> Option<&Value> {
        self.snapshot
            .configuration
            .workspace
            .get(&format!("{section}.{key}"))
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn status_item_mut(&mut self, id: StatusItemId) -> Result<&mut StatusItemView> {
        self.status_items
            .get_mut(&id)
            .ok_or(HostError::UnknownStatusItem(id))
    }

    fn register(&mut self, registration: Registration) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        self.registrations.insert(id, registration);
        id
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for MemoryHost {
    fn configuration(&self, key: &str) -> Option<Value> {
        self.snapshot.configuration.configuration(key)
    }
}

impl EditorHost for MemoryHost {
    fn active_editor(&self) -> Option<EditorSnapshot> {
        self.snapshot.active_editor.clone()
    }

    fn workspace_folder_for(&self, document: &DocumentInfo) -> Option<WorkspaceFolder> {
        self.snapshot.folder_for(document).cloned()
    }

    fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.snapshot.workspace_folders.clone()
    }

    fn platform(&self) -> Platform {
        self.platform
    }

    fn set_context(&mut self, key: &str, value: bool) -> Result<()> {
        self.contexts.insert(key.to_string(), value);
        self.calls.push(HostCall::SetContext {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn execute_command(&mut self, command: &str, args: Vec<Value>) -> Result<()> {
        self.calls.push(HostCall::ExecuteCommand {
            command: command.to_string(),
            args,
        });
        Ok(())
    }

    fn update_configuration(&mut self, section: &str, key: &str, value: Value) -> Result<()> {
        self.snapshot.configuration.set(
            ConfigScope::Workspace,
            format!("{section}.{key}"),
            value.clone(),
        );
        self.calls.push(HostCall::UpdateConfiguration {
            section: section.to_string(),
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn show_quick_pick(
        &mut self,
        items: &[QuickPickItem],
        options: QuickPickOptions,
    ) -> Result<Option<usize>> {
        self.calls.push(HostCall::QuickPick {
            items: items.to_vec(),
            options,
        });
        let answer = self.quick_pick_answers.pop_front().flatten();
        Ok(answer.filter(|idx| *idx < items.len()))
    }

    fn create_status_item(&mut self, spec: StatusItemSpec) -> Result<StatusItemId> {
        let id = StatusItemId(self.next_id());
        self.status_items.insert(
            id,
            StatusItemView {
                text: spec.text.clone(),
                spec: spec.clone(),
                visible: false,
            },
        );
        self.calls.push(HostCall::CreateStatusItem { id, spec });
        Ok(id)
    }

    fn set_status_text(&mut self, id: StatusItemId, text: &str) -> Result<()> {
        self.status_item_mut(id)?.text = text.to_string();
        self.calls.push(HostCall::SetStatusText {
            id,
            text: text.to_string(),
        });
        Ok(())
    }

    fn set_status_visible(&mut self, id: StatusItemId, visible: bool) -> Result<()> {
        self.status_item_mut(id)?.visible = visible;
        self.calls.push(HostCall::SetStatusVisible { id, visible });
        Ok(())
    }

    fn dispose_status_item(&mut self, id: StatusItemId) -> Result<()> {
        self.status_items
            .remove(&id)
            .ok_or(HostError::UnknownStatusItem(id))?;
        self.calls.push(HostCall::DisposeStatusItem(id));
        Ok(())
    }

    fn register_command(&mut self, command: Command) -> Result<SubscriptionId> {
        self.calls.push(HostCall::RegisterCommand(command));
        Ok(self.register(Registration::Command(command)))
    }

    fn subscribe(&mut self, event: HostEvent) -> Result<SubscriptionId> {
        if self.rejected_events.contains(&event) {
            return Err(HostError::Rejected {
                method: "subscribe".to_string(),
                message: format!("{event:?} is not available"),
            });
        }
        self.calls.push(HostCall::Subscribe(event));
        Ok(self.register(Registration::Event(event)))
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()> {
        self.registrations
            .remove(&id)
            .ok_or(HostError::UnknownSubscription(id))?;
        self.calls.push(HostCall::Unsubscribe(id));
        Ok(())
    }
}

//! 插件协议适配器：stdio(JSON-RPC/LSP framing) 与 zcode 宿主通信
//!
//! - 接收 `zcode/initialize`、`zcode/event`、`zcode/command/invoked`、`exit`
//! - 发送 `zcode/register`、`zcode/ui/patch`、`zcode/context/set`、
//!   `zcode/command/execute`、`zcode/config/update`
//! - 请求 `zcode/quickPick`，等待期间收到的其他消息排队，之后按顺序处理

use std::collections::VecDeque;
use std::path::PathBuf;

use lsp_server::{Connection, ErrorCode, Message, Notification, Request, RequestId, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::Command;
use crate::kernel::action::HostEvent;
use crate::kernel::extension::FilePathBar;
use crate::kernel::locale::{detect_language, LocaleResolver};
use crate::kernel::services::ports::config::{ConfigScope, ConfigSource};
use crate::kernel::services::ports::host::{
    DocumentInfo, EditorHost, EditorSnapshot, HostError, HostSnapshot, Platform, QuickPickItem,
    QuickPickOptions, Result, StatusItemId, StatusItemSpec, StatusSide, SubscriptionId,
    WorkspaceFolder,
};

pub const PROTOCOL_VERSION: u32 = 1;
pub const PLUGIN_ID: &str = "filepathbar";
const PLUGIN_NAME: &str = "File Path Bar";
const DEFAULT_LOCALE: &str = "en";

pub mod method {
    pub const INITIALIZE: &str = "zcode/initialize";
    pub const EVENT: &str = "zcode/event";
    pub const COMMAND_INVOKED: &str = "zcode/command/invoked";
    pub const EXIT: &str = "exit";

    pub const REGISTER: &str = "zcode/register";
    pub const UI_PATCH: &str = "zcode/ui/patch";
    pub const CONTEXT_SET: &str = "zcode/context/set";
    pub const COMMAND_EXECUTE: &str = "zcode/command/execute";
    pub const CONFIG_UPDATE: &str = "zcode/config/update";
    pub const QUICK_PICK: &str = "zcode/quickPick";
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitializeParams {
    pub protocol_version: u32,
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub state: HostSnapshot,
}

#[derive(Debug, Clone, Deserialize)]
struct EventParams {
    kind: HostEvent,
    #[serde(default)]
    state: Option<HostSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommandInvokedParams {
    id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct QuickPickResult {
    #[serde(default)]
    index: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct CommandDecl {
    id: &'static str,
    title: String,
}

#[derive(Debug, Clone, Serialize)]
struct StatusItemDecl {
    id: String,
    side: StatusSide,
    text: String,
    tooltip: String,
    command: String,
    visible: bool,
}

#[derive(Debug, Clone, Serialize)]
struct RegisterParams {
    id: &'static str,
    name: &'static str,
    commands: Vec<CommandDecl>,
    status_items: Vec<StatusItemDecl>,
    events: Vec<HostEvent>,
}

#[derive(Debug, Clone, Serialize)]
struct StatusItemPatch {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Registration {
    Command(Command),
    Event(HostEvent),
}

#[derive(Debug, Clone)]
struct StatusItemState {
    id: StatusItemId,
    spec: StatusItemSpec,
    visible: bool,
}

/// `EditorHost` backed by a plugin-protocol connection. Reads are served from
/// a mirror of the host state refreshed by `initialize` and every event.
pub struct RpcHost {
    connection: Connection,
    snapshot: HostSnapshot,
    platform: Platform,
    locale: LocaleResolver,
    registrations: Vec<(SubscriptionId, Registration)>,
    status_items: Vec<StatusItemState>,
    registered: bool,
    deferred: VecDeque<Message>,
    next_handle: u32,
    next_request_id: i32,
}

impl RpcHost {
    pub fn new(connection: Connection, snapshot: HostSnapshot, platform: Platform) -> Self {
        Self {
            connection,
            snapshot,
            platform,
            locale: LocaleResolver::for_language(DEFAULT_LOCALE),
            registrations: Vec::new(),
            status_items: Vec::new(),
            registered: false,
            deferred: VecDeque::new(),
            next_handle: 1,
            next_request_id: 1,
        }
    }

    /// Bundle used for the command titles announced in `zcode/register`.
    pub fn set_locale(&mut self, locale: LocaleResolver) {
        self.locale = locale;
    }

    pub fn snapshot(&self) -> &HostSnapshot {
        &self.snapshot
    }

    pub fn apply_snapshot(&mut self, snapshot: HostSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn is_subscribed(&self, event: HostEvent) -> bool {
        self.registrations
            .iter()
            .any(|(_, r)| *r == Registration::Event(event))
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.registrations
            .iter()
            .any(|(_, r)| matches!(r, Registration::Command(c) if c.name() == name))
    }

    /// Announces commands, status items and events to the host. Anything
    /// registered afterwards re-announces the full set.
    pub fn flush_registration(&mut self) -> Result<()> {
        self.registered = true;
        self.send_registration()
    }

    /// Next inbound message, queued ones first. `None` once the host closed
    /// the connection.
    pub fn next_message(&mut self) -> Option<Message> {
        if let Some(message) = self.deferred.pop_front() {
            return Some(message);
        }
        self.connection.receiver.recv().ok()
    }

    pub fn respond(&self, id: RequestId, result: Value) -> Result<()> {
        self.send(Message::Response(Response::new_ok(id, result)))
    }

    pub fn respond_error(&self, id: RequestId, code: ErrorCode, message: String) -> Result<()> {
        self.send(Message::Response(Response::new_err(id, code as i32, message)))
    }

    fn send(&self, message: Message) -> Result<()> {
        self.connection
            .sender
            .send(message)
            .map_err(|_| HostError::Disconnected)
    }

    fn notify(&self, method: &str, params: Value) -> Result<()> {
        self.send(Message::Notification(Notification::new(
            method.to_string(),
            params,
        )))
    }

    fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        let id = RequestId::from(self.next_request_id);
        self.next_request_id = self.next_request_id.saturating_add(1);
        self.send(Message::Request(Request::new(
            id.clone(),
            method.to_string(),
            params,
        )))?;

        loop {
            let message = self
                .connection
                .receiver
                .recv()
                .map_err(|_| HostError::Disconnected)?;
            match message {
                Message::Response(response) if response.id == id => {
                    if let Some(error) = response.error {
                        return Err(HostError::Rejected {
                            method: method.to_string(),
                            message: error.message,
                        });
                    }
                    return Ok(response.result.unwrap_or(Value::Null));
                }
                other => self.deferred.push_back(other),
            }
        }
    }

    fn send_registration(&self) -> Result<()> {
        let mut commands = Vec::new();
        let mut events = Vec::new();
        for (_, registration) in &self.registrations {
            match registration {
                Registration::Command(command) => commands.push(CommandDecl {
                    id: command.name(),
                    title: self.locale.map_str(command.title_key()),
                }),
                Registration::Event(event) => events.push(*event),
            }
        }
        let status_items = self
            .status_items
            .iter()
            .map(|item| StatusItemDecl {
                id: item.id.to_string(),
                side: item.spec.side,
                text: item.spec.text.clone(),
                tooltip: item.spec.tooltip.clone(),
                command: item.spec.command.clone(),
                visible: item.visible,
            })
            .collect();

        let params = RegisterParams {
            id: PLUGIN_ID,
            name: PLUGIN_NAME,
            commands,
            status_items,
            events,
        };
        self.notify(method::REGISTER, json!(params))
    }

    fn announce(&self) -> Result<()> {
        if self.registered {
            self.send_registration()
        } else {
            Ok(())
        }
    }

    fn next_handle(&mut self) -> u32 {
        let id = self.next_handle;
        self.next_handle = self.next_handle.saturating_add(1);
        id
    }

    fn register(&mut self, registration: Registration) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_handle());
        self.registrations.push((id, registration));
        self.announce()?;
        Ok(id)
    }

    fn status_item_mut(&mut self, id: StatusItemId) -> Result<&mut StatusItemState> {
        self.status_items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(HostError::UnknownStatusItem(id))
    }

    fn patch_status(&self, patch: StatusItemPatch) -> Result<()> {
        if !self.registered {
            return Ok(());
        }
        self.notify(method::UI_PATCH, json!({ "status_items": [patch] }))
    }
}

impl ConfigSource for RpcHost {
    fn configuration(&self, key: &str) -> Option<Value> {
        self.snapshot.configuration.configuration(key)
    }
}

impl EditorHost for RpcHost {
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
        self.notify(method::CONTEXT_SET, json!({ "key": key, "value": value }))
    }

    fn execute_command(&mut self, command: &str, args: Vec<Value>) -> Result<()> {
        self.notify(
            method::COMMAND_EXECUTE,
            json!({ "command": command, "args": args }),
        )
    }

    fn update_configuration(&mut self, section: &str, key: &str, value: Value) -> Result<()> {
        self.notify(
            method::CONFIG_UPDATE,
            json!({ "section": section, "key": key, "value": value.clone() }),
        )?;
        self.snapshot
            .configuration
            .set(ConfigScope::Workspace, format!("{section}.{key}"), value);
        Ok(())
    }

    fn show_quick_pick(
        &mut self,
        items: &[QuickPickItem],
        options: QuickPickOptions,
    ) -> Result<Option<usize>> {
        let result = self.request(
            method::QUICK_PICK,
            json!({ "items": items, "match_on_detail": options.match_on_detail }),
        )?;
        let parsed = if result.is_null() {
            QuickPickResult::default()
        } else {
            serde_json::from_value::<QuickPickResult>(result).map_err(|source| {
                HostError::Malformed {
                    method: method::QUICK_PICK.to_string(),
                    source,
                }
            })?
        };
        Ok(parsed.index.filter(|idx| *idx < items.len()))
    }

    fn create_status_item(&mut self, spec: StatusItemSpec) -> Result<StatusItemId> {
        let id = StatusItemId(self.next_handle());
        self.status_items.push(StatusItemState {
            id,
            spec,
            visible: false,
        });
        self.announce()?;
        Ok(id)
    }

    fn set_status_text(&mut self, id: StatusItemId, text: &str) -> Result<()> {
        self.status_item_mut(id)?.spec.text = text.to_string();
        self.patch_status(StatusItemPatch {
            id: id.to_string(),
            text: Some(text.to_string()),
            visible: None,
        })
    }

    fn set_status_visible(&mut self, id: StatusItemId, visible: bool) -> Result<()> {
        self.status_item_mut(id)?.visible = visible;
        self.patch_status(StatusItemPatch {
            id: id.to_string(),
            text: None,
            visible: Some(visible),
        })
    }

    fn dispose_status_item(&mut self, id: StatusItemId) -> Result<()> {
        let before = self.status_items.len();
        self.status_items.retain(|item| item.id != id);
        if self.status_items.len() == before {
            return Err(HostError::UnknownStatusItem(id));
        }
        self.announce()
    }

    fn register_command(&mut self, command: Command) -> Result<SubscriptionId> {
        self.register(Registration::Command(command))
    }

    fn subscribe(&mut self, event: HostEvent) -> Result<SubscriptionId> {
        self.register(Registration::Event(event))
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()> {
        let before = self.registrations.len();
        self.registrations.retain(|(handle, _)| *handle != id);
        if self.registrations.len() == before {
            return Err(HostError::UnknownSubscription(id));
        }
        self.announce()
    }
}

/// Runs one plugin session: waits for `zcode/initialize`, activates, serves
/// events and commands until `exit` or disconnect, then deactivates.
pub fn serve(connection: Connection) -> Result<()> {
    let (init_id, params) = wait_initialize(&connection)?;
    if params.protocol_version != PROTOCOL_VERSION {
        tracing::warn!(
            host = params.protocol_version,
            plugin = PROTOCOL_VERSION,
            "protocol version mismatch"
        );
    }
    tracing::info!(
        workspace_root = ?params.workspace_root,
        locale = ?params.locale,
        "plugin initialize"
    );

    let platform = params.platform.unwrap_or_else(Platform::current);
    let language = params.locale.unwrap_or_else(detect_language);
    let locale = LocaleResolver::for_language(&language);
    let mut host = RpcHost::new(connection, params.state, platform);
    host.set_locale(locale.clone());
    host.respond(
        init_id,
        json!({ "ok": true, "protocol_version": PROTOCOL_VERSION }),
    )?;

    let mut extension = FilePathBar::activate(&mut host, locale)?;
    host.flush_registration()?;

    while let Some(message) = host.next_message() {
        let outcome = match message {
            Message::Notification(notification) if notification.method == method::EXIT => break,
            Message::Notification(notification) => {
                dispatch_notification(&mut host, &mut extension, notification)
            }
            Message::Request(request) => host.respond_error(
                request.id,
                ErrorCode::MethodNotFound,
                format!("unsupported request: {}", request.method),
            ),
            Message::Response(response) => {
                tracing::debug!(id = ?response.id, "unexpected response");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            if e.is_fatal() {
                tracing::error!(error = %e, "plugin session aborted");
                return Err(e);
            }
            tracing::warn!(error = %e, "handler failed");
        }
    }

    match extension.deactivate(&mut host) {
        Err(HostError::Disconnected) => {
            tracing::debug!("host closed before deactivation finished");
            Ok(())
        }
        other => other,
    }
}

fn wait_initialize(connection: &Connection) -> Result<(RequestId, InitializeParams)> {
    loop {
        let message = connection
            .receiver
            .recv()
            .map_err(|_| HostError::Disconnected)?;
        match message {
            Message::Request(request) if request.method == method::INITIALIZE => {
                let params = parse_params(method::INITIALIZE, request.params)?;
                return Ok((request.id, params));
            }
            Message::Request(request) => {
                let response = Response::new_err(
                    request.id,
                    ErrorCode::ServerNotInitialized as i32,
                    "plugin not initialized".to_string(),
                );
                connection
                    .sender
                    .send(Message::Response(response))
                    .map_err(|_| HostError::Disconnected)?;
            }
            Message::Notification(notification) if notification.method == method::EXIT => {
                return Err(HostError::Protocol("exit before initialize".to_string()));
            }
            other => tracing::debug!(message = ?other, "ignored before initialize"),
        }
    }
}

fn dispatch_notification(
    host: &mut RpcHost,
    extension: &mut FilePathBar,
    notification: Notification,
) -> Result<()> {
    match notification.method.as_str() {
        method::EVENT => {
            let params: EventParams = parse_params(method::EVENT, notification.params)?;
            if let Some(state) = params.state {
                host.apply_snapshot(state);
            }
            if !host.is_subscribed(params.kind) {
                tracing::debug!(event = ?params.kind, "event without subscription");
                return Ok(());
            }
            extension.handle_event(host, params.kind)
        }
        method::COMMAND_INVOKED => {
            let params: CommandInvokedParams =
                parse_params(method::COMMAND_INVOKED, notification.params)?;
            if !host.has_command(&params.id) {
                tracing::warn!(command = %params.id, "invoked command is not registered");
                return Ok(());
            }
            extension.execute_command(host, &params.id)
        }
        other => {
            tracing::debug!(method = other, "ignored notification");
            Ok(())
        }
    }
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|source| HostError::Malformed {
        method: method.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/rpc.rs"]
mod tests;

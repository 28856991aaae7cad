use serde::{Deserialize, Serialize};

/// Host notifications the plugin reacts to. Events carry no payload: handlers
/// always re-read the live host state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostEvent {
    ConfigurationChanged,
    ActiveEditorChanged,
    DocumentChanged,
    DocumentSaved,
}

impl HostEvent {
    pub const ALL: [HostEvent; 4] = [
        HostEvent::ConfigurationChanged,
        HostEvent::ActiveEditorChanged,
        HostEvent::DocumentChanged,
        HostEvent::DocumentSaved,
    ];
}

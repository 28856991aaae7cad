use super::*;
use crate::kernel::services::adapters::MemoryHost;
use crate::kernel::services::ports::host::{DocumentInfo, EditorSnapshot};

#[test]
fn no_editor_is_absent() {
    let host = MemoryHost::new();
    let state = ActiveDocumentState::derive(&host);
    assert!(!state.is_present());
    assert!(state.active().is_none());
}

#[test]
fn editor_without_view_column_is_absent() {
    let mut host = MemoryHost::new();
    host.snapshot_mut().active_editor = Some(EditorSnapshot {
        view_column: None,
        document: DocumentInfo {
            uri: DocumentUri::from("output:extension-log"),
            file_name: "extension-log".to_string(),
        },
    });

    assert!(!ActiveDocumentState::derive(&host).is_present());
}

#[test]
fn present_document_carries_workspace_name() {
    let mut host = MemoryHost::new();
    host.add_workspace_folder("proj", "/x");
    host.open("/x/y/z.ts");

    let state = ActiveDocumentState::derive(&host);
    let doc = state.active().unwrap();
    assert_eq!(doc.file_path, "/x/y/z.ts");
    assert_eq!(doc.workspace_name, "proj");
    assert_eq!(doc.uri.as_str(), "file:///x/y/z.ts");
}

#[test]
fn document_outside_workspace_uses_placeholder() {
    let mut host = MemoryHost::new();
    host.add_workspace_folder("proj", "/x");
    host.open("/tmp/scratch.txt");

    let state = ActiveDocumentState::derive(&host);
    assert_eq!(state.active().unwrap().workspace_name, NO_WORKSPACE);
    assert_eq!(NO_WORKSPACE, "No Workspace");
}

#[test]
fn folder_at_filesystem_root_names_the_workspace() {
    let mut host = MemoryHost::new();
    host.add_workspace_folder("root", "/");
    host.open("/etc/hosts");

    let state = ActiveDocumentState::derive(&host);
    assert_eq!(state.active().unwrap().workspace_name, "root");
}

use super::*;
use crate::kernel::services::adapters::{HostCall, MemoryHost};

#[test]
fn compose_uses_fragment_after_last_dot() {
    assert_eq!(compose_title("com.example.proj", Some("/x/a.rs")), "proj/x/a.rs");
    assert_eq!(compose_title("proj", Some("/x/a.rs")), "proj/x/a.rs");
    assert_eq!(compose_title("trailing.", Some("/a")), "/a");
}

#[test]
fn compose_without_editor_appends_undefined() {
    assert_eq!(compose_title("my.proj", None), "projundefined");
}

#[test]
fn no_workspace_folder_is_a_noop() {
    let mut host = MemoryHost::new();
    host.open("/x/a.rs");

    assert_eq!(update_title(&mut host).unwrap(), None);
    assert!(host.calls().is_empty());
}

#[test]
fn writes_window_title_from_first_folder() {
    let mut host = MemoryHost::new();
    host.add_workspace_folder("org.first", "/first");
    host.add_workspace_folder("second", "/second");
    host.open("/second/b.rs");

    let title = update_title(&mut host).unwrap();
    assert_eq!(title.as_deref(), Some("first/second/b.rs"));
    assert_eq!(
        host.calls(),
        &[HostCall::UpdateConfiguration {
            section: "window".to_string(),
            key: "title".to_string(),
            value: Value::from("first/second/b.rs"),
        }]
    );
}

#[test]
fn repeated_update_is_idempotent() {
    let mut host = MemoryHost::new();
    host.add_workspace_folder("proj", "/proj");
    host.open("/proj/src/main.rs");

    let first = update_title(&mut host).unwrap();
    let second = update_title(&mut host).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        host.written_configuration(WINDOW_SECTION, TITLE_KEY),
        Some(&Value::from("proj/proj/src/main.rs"))
    );
}

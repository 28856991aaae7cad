use super::*;

fn pair() -> (RpcHost, Connection) {
    let (server, client) = Connection::memory();
    (
        RpcHost::new(server, HostSnapshot::default(), Platform::Linux),
        client,
    )
}

fn drain(client: &Connection) -> Vec<Notification> {
    client
        .receiver
        .try_iter()
        .filter_map(|message| match message {
            Message::Notification(n) => Some(n),
            _ => None,
        })
        .collect()
}

fn spec() -> StatusItemSpec {
    StatusItemSpec {
        side: StatusSide::Left,
        text: "$(file) dummy".to_string(),
        tooltip: "File Path Bar Menu".to_string(),
        command: "filePathBar.menu".to_string(),
    }
}

fn items() -> Vec<QuickPickItem> {
    vec![
        QuickPickItem {
            label: "a".to_string(),
            detail: None,
        },
        QuickPickItem {
            label: "b".to_string(),
            detail: Some("B".to_string()),
        },
    ]
}

#[test]
fn status_updates_before_registration_fold_into_register() {
    let (mut host, client) = pair();
    let id = host.create_status_item(spec()).unwrap();
    host.set_status_text(id, "a.rs (proj)").unwrap();
    host.set_status_visible(id, true).unwrap();
    host.register_command(Command::Menu).unwrap();
    host.subscribe(HostEvent::DocumentSaved).unwrap();
    assert!(drain(&client).is_empty());

    host.flush_registration().unwrap();

    let sent = drain(&client);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, method::REGISTER);
    let params = &sent[0].params;
    assert_eq!(params["id"], PLUGIN_ID);
    assert_eq!(params["commands"][0]["id"], "filePathBar.menu");
    assert_eq!(params["commands"][0]["title"], "File Path Bar Menu");
    assert_eq!(params["status_items"][0]["id"], "status-1");
    assert_eq!(params["status_items"][0]["side"], "left");
    assert_eq!(params["status_items"][0]["text"], "a.rs (proj)");
    assert_eq!(params["status_items"][0]["visible"], true);
    assert_eq!(params["events"], json!(["documentSaved"]));
}

#[test]
fn command_titles_follow_the_locale() {
    let (mut host, client) = pair();
    host.set_locale(LocaleResolver::for_language("ja-JP"));
    host.register_command(Command::Menu).unwrap();
    host.register_command(Command::UpdateTitle).unwrap();

    host.flush_registration().unwrap();

    let sent = drain(&client);
    let commands = &sent[0].params["commands"];
    assert_eq!(commands[0]["title"], "File Path Bar メニュー");
    assert_eq!(commands[1]["id"], "windowTitleChanger.updateTitle");
    assert_eq!(commands[1]["title"], "ウィンドウ タイトルを更新");
}

#[test]
fn status_updates_after_registration_are_patches() {
    let (mut host, client) = pair();
    let id = host.create_status_item(spec()).unwrap();
    host.flush_registration().unwrap();
    drain(&client);

    host.set_status_text(id, "b.rs (proj)").unwrap();
    host.set_status_visible(id, false).unwrap();

    let sent = drain(&client);
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|n| n.method == method::UI_PATCH));
    assert_eq!(
        sent[0].params,
        json!({ "status_items": [{ "id": "status-1", "text": "b.rs (proj)" }] })
    );
    assert_eq!(
        sent[1].params,
        json!({ "status_items": [{ "id": "status-1", "visible": false }] })
    );
}

#[test]
fn unknown_handles_are_errors() {
    let (mut host, _client) = pair();
    assert!(matches!(
        host.set_status_text(StatusItemId(7), "x"),
        Err(HostError::UnknownStatusItem(StatusItemId(7)))
    ));
    assert!(matches!(
        host.dispose_status_item(StatusItemId(7)),
        Err(HostError::UnknownStatusItem(_))
    ));
    assert!(matches!(
        host.unsubscribe(SubscriptionId(3)),
        Err(HostError::UnknownSubscription(SubscriptionId(3)))
    ));
}

#[test]
fn registration_changes_reannounce() {
    let (mut host, client) = pair();
    let menu = host.register_command(Command::Menu).unwrap();
    let saved = host.subscribe(HostEvent::DocumentSaved).unwrap();
    host.flush_registration().unwrap();
    drain(&client);

    assert!(host.has_command("filePathBar.menu"));
    assert!(!host.has_command("windowTitleChanger.updateTitle"));
    assert!(host.is_subscribed(HostEvent::DocumentSaved));

    host.unsubscribe(saved).unwrap();
    host.unsubscribe(menu).unwrap();

    assert!(!host.is_subscribed(HostEvent::DocumentSaved));
    assert!(!host.has_command("filePathBar.menu"));
    let sent = drain(&client);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].method, method::REGISTER);
    assert_eq!(sent[1].params["commands"], json!([]));
    assert_eq!(sent[1].params["events"], json!([]));
}

#[test]
fn quick_pick_defers_unrelated_messages() {
    let (mut host, client) = pair();
    client
        .sender
        .send(Message::Notification(Notification::new(
            method::EVENT.to_string(),
            json!({ "kind": "documentSaved" }),
        )))
        .unwrap();
    client
        .sender
        .send(Message::Response(Response::new_ok(
            RequestId::from(1),
            json!({ "index": 1 }),
        )))
        .unwrap();

    let picked = host
        .show_quick_pick(
            &items(),
            QuickPickOptions {
                match_on_detail: true,
            },
        )
        .unwrap();
    assert_eq!(picked, Some(1));

    match client.receiver.try_recv().unwrap() {
        Message::Request(request) => {
            assert_eq!(request.method, method::QUICK_PICK);
            assert_eq!(request.params["items"][1]["detail"], "B");
            assert_eq!(request.params["match_on_detail"], true);
        }
        other => panic!("expected quick pick request, got {other:?}"),
    }

    match host.next_message() {
        Some(Message::Notification(n)) => assert_eq!(n.method, method::EVENT),
        other => panic!("expected deferred event, got {other:?}"),
    }
}

#[test]
fn quick_pick_dismissed_or_out_of_range_is_none() {
    let (mut host, client) = pair();
    client
        .sender
        .send(Message::Response(Response::new_ok(
            RequestId::from(1),
            Value::Null,
        )))
        .unwrap();
    client
        .sender
        .send(Message::Response(Response::new_ok(
            RequestId::from(2),
            json!({ "index": 5 }),
        )))
        .unwrap();

    let options = QuickPickOptions::default();
    assert_eq!(host.show_quick_pick(&items(), options).unwrap(), None);
    assert_eq!(host.show_quick_pick(&items(), options).unwrap(), None);
}

#[test]
fn quick_pick_error_response_is_rejected() {
    let (mut host, client) = pair();
    client
        .sender
        .send(Message::Response(Response::new_err(
            RequestId::from(1),
            ErrorCode::RequestCanceled as i32,
            "busy".to_string(),
        )))
        .unwrap();

    let err = host
        .show_quick_pick(&items(), QuickPickOptions::default())
        .unwrap_err();
    assert!(matches!(err, HostError::Rejected { ref message, .. } if message == "busy"));
    assert!(!err.is_fatal());
}

#[test]
fn configuration_writes_are_mirrored() {
    let (mut host, client) = pair();
    host.update_configuration("window", "title", json!("proj/a.rs")).unwrap();

    assert_eq!(host.configuration("window.title"), Some(json!("proj/a.rs")));
    let sent = drain(&client);
    assert_eq!(sent[0].method, method::CONFIG_UPDATE);
    assert_eq!(
        sent[0].params,
        json!({ "section": "window", "key": "title", "value": "proj/a.rs" })
    );
}

#[test]
fn reads_come_from_the_snapshot() {
    let (mut host, _client) = pair();
    assert!(host.active_editor().is_none());

    let snapshot: HostSnapshot = serde_json::from_value(json!({
        "active_editor": {
            "view_column": 1,
            "document": { "uri": "file:///x/a.rs", "file_name": "/x/a.rs" }
        },
        "workspace_folders": [{ "name": "x", "path": "/x" }]
    }))
    .unwrap();
    host.apply_snapshot(snapshot);

    let editor = host.active_editor().unwrap();
    assert_eq!(editor.document.uri.as_str(), "file:///x/a.rs");
    assert_eq!(
        host.workspace_folder_for(&editor.document).map(|f| f.name),
        Some("x".to_string())
    );
    assert_eq!(host.platform(), Platform::Linux);
}

#[test]
fn closed_connection_is_fatal() {
    let (mut host, client) = pair();
    drop(client);

    let err = host.set_context("existsActiveTextDocument", true).unwrap_err();
    assert!(matches!(err, HostError::Disconnected));
    assert!(err.is_fatal());
    assert!(host.next_message().is_none());
}

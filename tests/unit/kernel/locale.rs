use super::*;

fn bundle(entries: &[(&str, &str)]) -> LocaleBundle {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn primary_wins_regardless_of_secondary() {
    let resolver = LocaleResolver::new(
        bundle(&[("greeting", "primary")]),
        bundle(&[("greeting", "secondary")]),
    );
    assert_eq!(resolver.map_str("greeting"), "primary");
}

#[test]
fn falls_back_to_secondary_then_key() {
    let resolver = LocaleResolver::new(
        bundle(&[]),
        bundle(&[("filePathBar.menu.title", "Menu")]),
    );
    assert_eq!(resolver.map(LabelKey::MenuTitle), "Menu");
    assert_eq!(resolver.map(LabelKey::CopyPath), LabelKey::CopyPath.as_str());
}

#[test]
fn empty_resolver_returns_keys_verbatim() {
    let resolver = LocaleResolver::default();
    for key in LabelKey::ALL {
        assert_eq!(resolver.map(key), key.as_str());
    }
}

#[test]
fn default_bundle_covers_every_label_key() {
    let resolver = LocaleResolver::for_language("en");
    assert_eq!(resolver.map(LabelKey::MenuTitle), "File Path Bar Menu");
    for key in LabelKey::ALL {
        assert!(resolver.primary.contains_key(key.as_str()), "{key:?}");
    }
}

#[test]
fn japanese_bundle_is_selected_by_base_language() {
    let resolver = LocaleResolver::for_language("ja-JP");
    assert_eq!(
        resolver.map(LabelKey::CopyPath),
        "ファイル: アクティブ ファイルのパスのコピー"
    );
    for key in LabelKey::ALL {
        assert!(resolver.primary.contains_key(key.as_str()), "{key:?}");
    }
}

#[test]
fn unknown_language_uses_default_bundle() {
    let resolver = LocaleResolver::for_language("fr");
    assert_eq!(resolver.map(LabelKey::CopyPath), LabelKey::CopyPath.as_str());
    assert!(resolver.secondary.is_empty());
}

#[test]
fn japanese_falls_back_to_english_for_missing_keys() {
    let mut resolver = LocaleResolver::for_language("ja");
    resolver.primary.remove(LabelKey::MenuTitle.as_str());
    assert_eq!(resolver.map(LabelKey::MenuTitle), "File Path Bar Menu");
}

#[test]
fn posix_locale_parsing() {
    assert_eq!(language_from_posix("ja_JP.UTF-8").as_deref(), Some("ja-JP"));
    assert_eq!(language_from_posix("de_DE@euro").as_deref(), Some("de-DE"));
    assert_eq!(language_from_posix("C"), None);
    assert_eq!(language_from_posix("POSIX"), None);
    assert_eq!(language_from_posix(""), None);
}

#[test]
fn mapping_is_deterministic() {
    let resolver = LocaleResolver::for_language("ja");
    let first: Vec<String> = LabelKey::ALL.iter().map(|k| resolver.map(*k)).collect();
    let second: Vec<String> = LabelKey::ALL.iter().map(|k| resolver.map(*k)).collect();
    assert_eq!(first, second);
}

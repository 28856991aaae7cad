//! 本地化：标签键 -> 显示文本
//!
//! 查找顺序：主语言包 -> 次语言包（默认英文）-> 键本身。

use rustc_hash::FxHashMap;

pub type LocaleBundle = FxHashMap<String, String>;

const DEFAULT_BUNDLE: &str = include_str!("../../locales/package.nls.json");
const BUNDLES: &[(&str, &str)] = &[("ja", include_str!("../../locales/package.nls.ja.json"))];
const DEFAULT_LANGUAGE: &str = "en";

/// The closed set of localized labels. The string form is public: it is the
/// bundle key and the untranslated text shown as menu detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    RevealInFinder,
    RevealInFileExplorer,
    CopyPath,
    CopyRelativePath,
    CompareWith,
    CompareWithClipboard,
    CompareWithSaved,
    RevealInSideBar,
    MenuTitle,
}

impl LabelKey {
    pub const ALL: [LabelKey; 9] = [
        LabelKey::RevealInFinder,
        LabelKey::RevealInFileExplorer,
        LabelKey::CopyPath,
        LabelKey::CopyRelativePath,
        LabelKey::CompareWith,
        LabelKey::CompareWithClipboard,
        LabelKey::CompareWithSaved,
        LabelKey::RevealInSideBar,
        LabelKey::MenuTitle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LabelKey::RevealInFinder => "File: Reveal in Finder",
            LabelKey::RevealInFileExplorer => "File: Reveal in File Explorer",
            LabelKey::CopyPath => "File: Copy Path of Active File",
            LabelKey::CopyRelativePath => "File: Copy Relative Path of Active File",
            LabelKey::CompareWith => "File: Compare Active File With...",
            LabelKey::CompareWithClipboard => "File: Compare Active File with Clipboard",
            LabelKey::CompareWithSaved => "File: Compare Active File with Saved",
            LabelKey::RevealInSideBar => "File: Reveal Active File in Side Bar",
            LabelKey::MenuTitle => "filePathBar.menu.title",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocaleResolver {
    primary: LocaleBundle,
    secondary: LocaleBundle,
}

impl LocaleResolver {
    pub fn new(primary: LocaleBundle, secondary: LocaleBundle) -> Self {
        Self { primary, secondary }
    }

    /// Builds a resolver from the embedded bundles. `tag` is matched exactly
    /// first, then by its base language (`ja-JP` -> `ja`); English is always
    /// the secondary bundle.
    pub fn for_language(tag: &str) -> Self {
        let default = parse_bundle(DEFAULT_LANGUAGE, DEFAULT_BUNDLE);
        match find_bundle(tag) {
            Some((language, source)) => Self::new(parse_bundle(language, source), default),
            None => Self::new(default, LocaleBundle::default()),
        }
    }

    pub fn map(&self, key: LabelKey) -> String {
        self.map_str(key.as_str())
    }

    pub fn map_str(&self, key: &str) -> String {
        self.primary
            .get(key)
            .or_else(|| self.secondary.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn find_bundle(tag: &str) -> Option<(&'static str, &'static str)> {
    let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
    let base = tag.split('-').next().unwrap_or_default();
    BUNDLES
        .iter()
        .find(|(language, _)| *language == tag)
        .or_else(|| BUNDLES.iter().find(|(language, _)| *language == base))
        .copied()
}

fn parse_bundle(language: &str, source: &str) -> LocaleBundle {
    serde_json::from_str(source).unwrap_or_else(|e| {
        tracing::warn!(language, error = %e, "invalid locale bundle");
        LocaleBundle::default()
    })
}

/// Language tag from the POSIX locale environment, for hosts that do not
/// send one. `ja_JP.UTF-8` becomes `ja-JP`.
pub fn detect_language() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| language_from_posix(&value))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

fn language_from_posix(value: &str) -> Option<String> {
    let tag = value.split(|c| c == '.' || c == '@').next()?.trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/locale.rs"]
mod tests;

//! 窗口标题：首个工作区名称的最后一段 + 当前文件路径
//!
//! 两段之间没有分隔符，没有活动编辑器时拼接字面量 `undefined`。
//! 这是已知缺陷，但宿主可见的输出需要逐字保持兼容。

use serde_json::Value;

use crate::kernel::services::ports::host::{EditorHost, Result};

pub const WINDOW_SECTION: &str = "window";
pub const TITLE_KEY: &str = "title";

const MISSING_FILE: &str = "undefined";

pub fn compose_title(folder_name: &str, file_path: Option<&str>) -> String {
    let fragment = folder_name.rsplit('.').next().unwrap_or(folder_name);
    let mut title = String::with_capacity(fragment.len() + file_path.map_or(0, str::len));
    title.push_str(fragment);
    title.push_str(file_path.unwrap_or(MISSING_FILE));
    title
}

/// Writes the composed title to `window.title`. Returns the written title, or
/// `None` without writing when the host has no workspace folder.
pub fn update_title(host: &mut dyn EditorHost) -> Result<Option<String>> {
    let Some(folder) = host.workspace_folders().into_iter().next() else {
        tracing::debug!("no workspace folder, window title left untouched");
        return Ok(None);
    };

    let editor = host.active_editor();
    let title = compose_title(
        &folder.name,
        editor.as_ref().map(|e| e.document.file_name.as_str()),
    );
    host.update_configuration(WINDOW_SECTION, TITLE_KEY, Value::String(title.clone()))?;
    Ok(Some(title))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/window_title.rs"]
mod tests;

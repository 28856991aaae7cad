use serde::{Deserialize, Serialize};

/// How the active file path is rendered in the status item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    #[default]
    Absolute,
    /// Last two path segments joined with `/`.
    Relative,
}

impl PathStyle {
    pub fn format(self, path: &str) -> String {
        format_path(self, path)
    }
}

const RELATIVE_SEGMENTS: usize = 2;

pub fn format_path(style: PathStyle, path: &str) -> String {
    match style {
        PathStyle::Absolute => path.to_string(),
        PathStyle::Relative => {
            let segments: Vec<&str> = path
                .split(|c| c == '/' || c == '\\')
                .filter(|segment| !segment.is_empty())
                .collect();
            let start = segments.len().saturating_sub(RELATIVE_SEGMENTS);
            segments[start..].join("/")
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/path_style.rs"]
mod tests;

use crate::kernel::services::ports::host::{DocumentUri, EditorHost};

/// Label used when no workspace folder owns the active document.
pub const NO_WORKSPACE: &str = "No Workspace";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    pub uri: DocumentUri,
    pub file_path: String,
    pub workspace_name: String,
}

/// What the host currently has focused. A document is only present when the
/// host reports an active editor that sits in a view column; otherwise the
/// path and workspace are never read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveDocumentState {
    document: Option<ActiveDocument>,
}

impl ActiveDocumentState {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn present(document: ActiveDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    pub fn derive(host: &dyn EditorHost) -> Self {
        let Some(editor) = host.active_editor() else {
            return Self::absent();
        };
        if editor.view_column.is_none() {
            return Self::absent();
        }

        let workspace_name = host
            .workspace_folder_for(&editor.document)
            .map(|folder| folder.name)
            .unwrap_or_else(|| NO_WORKSPACE.to_string());

        Self::present(ActiveDocument {
            uri: editor.document.uri,
            file_path: editor.document.file_name,
            workspace_name,
        })
    }

    pub fn is_present(&self) -> bool {
        self.document.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDocument> {
        self.document.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;

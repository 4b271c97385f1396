//! Open editor tabs driven by the file tree.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A file open in an editor tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenFile {
    /// File node id from the tree.
    pub id: String,
    /// File name shown on the tab.
    pub name: String,
    /// Editor language mode.
    pub language: String,
}

/// Maps a file name to an editor language by extension.
#[must_use]
pub fn language_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("py") => "python",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("ts") => "typescript",
        Some("java") => "java",
        Some("c" | "h") => "c",
        Some("cpp" | "cc" | "hpp") => "cpp",
        Some("rs") => "rust",
        Some("go") => "go",
        Some("json") => "json",
        Some("md") => "markdown",
        _ => "plaintext",
    }
}

/// Ordered set of open tabs with at most one selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorTabs {
    files: Vec<OpenFile>,
    selected: Option<String>,
}

impl EditorTabs {
    /// Creates an empty tab set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            selected: None,
        }
    }

    /// Opens a file in a new tab. Reopening an open file is a no-op.
    pub fn open(&mut self, id: impl Into<String>, name: impl Into<String>) -> &OpenFile {
        let id = id.into();
        let index = if let Some(index) = self.position(&id) {
            index
        } else {
            let name = name.into();
            let language = language_for(&name).to_string();
            self.files.push(OpenFile { id, name, language });
            self.files.len() - 1
        };
        &self.files[index]
    }

    /// Selects an open tab.
    ///
    /// # Errors
    /// Returns `FileNotOpen` if no tab has this id.
    pub fn select(&mut self, id: &str) -> DomainResult<()> {
        if self.position(id).is_none() {
            return Err(DomainError::FileNotOpen(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Closes a tab. Closing the selected tab moves selection to the
    /// previous tab, else the next one.
    ///
    /// # Errors
    /// Returns `FileNotOpen` if no tab has this id.
    pub fn close(&mut self, id: &str) -> DomainResult<OpenFile> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::FileNotOpen(id.to_string()))?;
        let closed = self.files.remove(index);

        if self.selected.as_deref() == Some(id) {
            let neighbour = index
                .checked_sub(1)
                .and_then(|i| self.files.get(i))
                .or_else(|| self.files.get(index));
            self.selected = neighbour.map(|f| f.id.clone());
        }
        Ok(closed)
    }

    /// The selected file, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&OpenFile> {
        let id = self.selected.as_deref()?;
        self.files.iter().find(|f| f.id == id)
    }

    /// All open files in tab order.
    #[must_use]
    pub fn files(&self) -> &[OpenFile] {
        &self.files
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }
}

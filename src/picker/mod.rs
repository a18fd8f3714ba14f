//! File picker model.
//!
//! Lists one directory at a time: a `..` entry, then sub-directories, then
//! files, each group sorted case-insensitively. Hidden entries are skipped.
//! [`FilePicker::path`] and [`FilePicker::selection`] are what the viewer
//! reads when the user confirms a choice.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Display name (file name or "..")
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// Whether this entry is a directory
    pub is_dir: bool,
}

/// What confirming the highlighted entry did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Moved into a directory.
    Entered(PathBuf),
    /// A file was chosen.
    Chosen(PathBuf),
    /// Nothing to confirm.
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<DirEntry>,
    selected: usize,
    scroll_offset: usize,
}

impl FilePicker {
    /// Open the picker on `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn open(dir: &Path) -> Result<Self> {
        let mut picker = Self::default();
        picker.load_directory(dir)?;
        Ok(picker)
    }

    /// Current directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Highlighted entry.
    pub fn selection(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected)
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Replace the listing with the contents of `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read; the old listing is kept.
    pub fn load_directory(&mut self, dir: &Path) -> Result<()> {
        let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        let listing =
            std::fs::read_dir(&dir).with_context(|| format!("cannot list {}", dir.display()))?;
        for entry in listing {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            // Follow symlinks so linked directories can be entered.
            let is_dir = path.is_dir();
            let row = DirEntry { name, path, is_dir };
            if is_dir {
                dirs.push(row);
            } else {
                files.push(row);
            }
        }
        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());

        let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
        entries.push(DirEntry {
            name: "..".to_string(),
            path: dir.parent().unwrap_or(&dir).to_path_buf(),
            is_dir: true,
        });
        entries.extend(dirs);
        entries.extend(files);

        debug!(dir = %dir.display(), entries = entries.len(), "listed directory");
        self.dir = dir;
        self.entries = entries;
        self.selected = 0;
        self.scroll_offset = 0;
        Ok(())
    }

    /// Highlight the entry named `name`, if present.
    pub fn highlight(&mut self, name: &str) -> bool {
        let Some(idx) = self.entries.iter().position(|e| e.name == name) else {
            return false;
        };
        self.selected = idx;
        true
    }

    /// Highlight the first markdown file, if any.
    pub fn highlight_first_markdown(&mut self) -> bool {
        let Some(idx) = self
            .entries
            .iter()
            .position(|e| !e.is_dir && is_markdown_path(&e.path))
        else {
            return false;
        };
        self.selected = idx;
        true
    }

    pub const fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Keep the highlighted row inside a window of `visible_rows`.
    pub const fn scroll_into_view(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selected + 1 - visible_rows;
        }
    }

    /// Confirm the highlighted entry: enter a directory or choose a file.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed.
    pub fn confirm(&mut self) -> Result<PickOutcome> {
        let Some(entry) = self.selection().cloned() else {
            return Ok(PickOutcome::Nothing);
        };
        if !entry.is_dir {
            return Ok(PickOutcome::Chosen(entry.path));
        }
        let came_from = self.dir.file_name().map(|n| n.to_string_lossy().to_string());
        let going_up = entry.name == "..";
        self.load_directory(&entry.path)?;
        if going_up && let Some(name) = came_from {
            self.highlight(&name);
        }
        Ok(PickOutcome::Entered(self.dir.clone()))
    }

    /// Go to the parent directory, highlighting the one we left.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent cannot be listed.
    pub fn go_up(&mut self) -> Result<()> {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let came_from = self.dir.file_name().map(|n| n.to_string_lossy().to_string());
        self.load_directory(&parent)?;
        if let Some(name) = came_from {
            self.highlight(&name);
        }
        Ok(())
    }
}

/// Whether `path` looks like a markdown file.
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "md" | "markdown" | "mdown" | "mkd"
            )
        })
}

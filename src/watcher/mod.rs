//! Source file watching for automatic refresh.
//!
//! Uses the notify crate. The parent directory is watched rather than the
//! file itself because many editors save by writing a new file and renaming
//! it over the old one.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{trace, warn};

/// Debounce used by the event loop.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches one markdown source and reports settled changes.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    source: PathBuf,
    source_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl std::fmt::Debug for SourceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceWatcher")
            .field("source", &self.source)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

impl SourceWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are canonical; compare against the same form.
        let source = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let source_name = source.file_name().map(std::ffi::OsStr::to_os_string);
        let dir = parent_dir(&source);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            source,
            source_name,
            debounce,
            pending_since: None,
        })
    }

    /// The canonical path being watched.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Whether this watcher already covers `path`.
    pub fn watches(&self, path: &Path) -> bool {
        path.canonicalize()
            .is_ok_and(|canonical| canonical == self.source)
    }

    /// Returns true once a change has been quiet for the debounce period.
    pub fn take_change_ready(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => {
                    trace!(kind = ?ev.kind, "source changed");
                    self.pending_since = Some(Instant::now());
                }
                Ok(_) => {}
                Err(err) => warn!(%err, "watch error"),
            }
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.source
                || self
                    .source_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

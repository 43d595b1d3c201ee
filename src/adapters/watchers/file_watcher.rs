// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system watcher for spec file changes.
//!
//! The watcher observes the directory holding a spec file, since editors often
//! replace a file instead of writing it in place, and forwards the events that
//! concern the file itself to a callback.

use crate::domain::{Result, SpecError};
use crate::ports::{ChangeCallback, SpecWatcher};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// File system watcher for spec files.
///
/// After a callback fires, further events are ignored until the debounce delay
/// has passed. Watching spawns one background thread, which is stopped by
/// [`SpecWatcher::stop`] or when the watcher is dropped.
///
/// # Examples
///
/// ```rust,no_run
/// use yamlspec::adapters::FileWatcher;
/// use yamlspec::ports::SpecWatcher;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # fn main() -> yamlspec::domain::Result<()> {
/// let mut watcher = FileWatcher::new("/path/to/server.yml", None)?;
///
/// watcher.watch(Arc::new(|path: &Path| {
///     println!("Spec changed: {}", path.display());
/// }))?;
///
/// watcher.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileWatcher {
    file_path: PathBuf,
    debounce_delay: Duration,
    running: Option<Running>,
}

/// Resources held while a watch is active.
#[derive(Debug)]
struct Running {
    // Dropping the notify watcher ends its event stream
    _watcher: RecommendedWatcher,
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

/// Lets an event through at most once per delay.
#[derive(Debug)]
struct Debounce {
    delay: Duration,
    last: Option<Instant>,
}

impl Debounce {
    fn new(delay: Duration) -> Self {
        Debounce { delay, last: None }
    }

    fn ready(&mut self, now: Instant) -> bool {
        let ready = self
            .last
            .map_or(true, |last| now.duration_since(last) >= self.delay);
        if ready {
            self.last = Some(now);
        }
        ready
    }
}

fn watcher_error(message: impl Into<String>, source: Option<notify::Error>) -> SpecError {
    SpecError::WatcherError {
        message: message.into(),
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

impl FileWatcher {
    /// Creates a watcher for the file at `path`, which must exist.
    ///
    /// `debounce_delay` defaults to 500ms.
    pub fn new(path: impl AsRef<Path>, debounce_delay: Option<Duration>) -> Result<Self> {
        let path = path.as_ref();
        let file_path = path.canonicalize().map_err(|e| SpecError::WatcherError {
            message: format!("File does not exist: {}", path.display()),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            file_path,
            debounce_delay: debounce_delay.unwrap_or(DEFAULT_DEBOUNCE),
            running: None,
        })
    }

    /// Returns the canonical path of the watched file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the debounce delay.
    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    /// Returns `true` while a watch is active.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

/// Event loop of the background thread.
fn forward_events(
    file_path: PathBuf,
    mut debounce: Debounce,
    events: Receiver<notify::Result<Event>>,
    stop_rx: Receiver<()>,
    callback: ChangeCallback,
) {
    while stop_rx.try_recv().is_err() {
        let event = match events.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                tracing::warn!("File watcher error for {}: {}", file_path.display(), e);
                continue;
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return,
        };

        let concerns_file = event.paths.iter().any(|p| p == &file_path);
        if concerns_file && debounce.ready(Instant::now()) {
            tracing::debug!("Spec file changed: {}", file_path.display());
            callback(&file_path);
        }
    }
}

impl SpecWatcher for FileWatcher {
    fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
        if self.running.is_some() {
            return Err(watcher_error("Watcher is already running", None));
        }

        let directory = self
            .file_path
            .parent()
            .ok_or_else(|| watcher_error("Failed to get parent directory", None))?
            .to_path_buf();

        let (event_tx, event_rx) = channel();
        let (stop_tx, stop_rx) = channel();

        let mut watcher = RecommendedWatcher::new(event_tx, notify::Config::default())
            .map_err(|e| watcher_error(format!("Failed to create file watcher: {}", e), Some(e)))?;
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| watcher_error(format!("Failed to start watching: {}", e), Some(e)))?;

        let file_path = self.file_path.clone();
        let debounce = Debounce::new(self.debounce_delay);
        let thread =
            thread::spawn(move || forward_events(file_path, debounce, event_rx, stop_rx, callback));

        self.running = Some(Running {
            _watcher: watcher,
            stop_tx,
            thread,
        });
        tracing::debug!("Watching spec file {}", self.file_path.display());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };
        let _ = running.stop_tx.send(());
        running
            .thread
            .join()
            .map_err(|_| watcher_error("Failed to join watcher thread", None))?;
        tracing::debug!("Stopped watching spec file {}", self.file_path.display());
        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::{tempdir, NamedTempFile};

    fn noop() -> ChangeCallback {
        Arc::new(|_path: &Path| {})
    }

    #[test]
    fn test_debounce_gate() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(100));

        assert!(debounce.ready(start));
        assert!(!debounce.ready(start + Duration::from_millis(50)));
        assert!(debounce.ready(start + Duration::from_millis(100)));
        assert!(!debounce.ready(start + Duration::from_millis(150)));
    }

    #[test]
    fn test_new_defaults_and_canonical_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("server.yml");
        fs::write(&path, "").unwrap();

        let watcher = FileWatcher::new(&path, None).unwrap();
        assert_eq!(watcher.debounce_delay(), DEFAULT_DEBOUNCE);
        assert_eq!(watcher.path(), path.canonicalize().unwrap());
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_new_rejects_missing_file() {
        let result = FileWatcher::new("/nonexistent/path/to/server.yml", None);
        assert!(matches!(result, Err(SpecError::WatcherError { .. })));
    }

    #[test]
    fn test_watch_twice_fails() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut watcher = FileWatcher::new(temp_file.path(), None).unwrap();

        watcher.watch(noop()).unwrap();
        assert!(watcher.is_running());
        assert!(matches!(
            watcher.watch(noop()),
            Err(SpecError::WatcherError { .. })
        ));
        watcher.stop().unwrap();
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_stop_is_idempotent_and_restartable() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut watcher = FileWatcher::new(temp_file.path(), None).unwrap();

        assert!(watcher.stop().is_ok());
        watcher.watch(noop()).unwrap();
        watcher.stop().unwrap();
        assert!(watcher.stop().is_ok());
        assert!(watcher.watch(noop()).is_ok());
    }

    #[test]
    fn test_change_reaches_callback() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        let mut watcher = FileWatcher::new(&path, Some(Duration::from_secs(5))).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        watcher
            .watch(Arc::new(move |_path: &Path| {
                seen.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        thread::sleep(Duration::from_millis(100));
        fs::write(&path, "port: 1\n").unwrap();
        thread::sleep(Duration::from_millis(300));
        watcher.stop().unwrap();

        // Notification delivery is platform dependent, so only the upper bound is checked
        assert!(calls.load(Ordering::SeqCst) <= 1);
    }
}

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;
use thiserror::Error;

/// Quiet period after the last input event before a save counts as finished.
const SETTLE: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("input and output are the same file: {}", .0.display())]
    SameFile(PathBuf),

    #[error("'{}' is not a file path", .0.display())]
    NotAFile(PathBuf),

    #[error("file watcher failed: {0}")]
    Notify(#[from] notify::Error),

    #[error("file watcher stopped unexpectedly")]
    Disconnected,
}

/// Watches the directory holding a single input image.
pub struct InputWatcher {
    input: PathBuf,
    file_name: OsString,
    rx: mpsc::Receiver<notify::Result<Event>>,
    // Dropping the watcher stops event delivery.
    _watcher: RecommendedWatcher,
}

impl InputWatcher {
    /// Start watching `input`'s directory. Refuses to run when `output`
    /// points at the same file, since every write would retrigger the strip.
    pub fn new(input: &Path, output: &Path) -> Result<Self, WatchError> {
        if same_file(input, output) {
            return Err(WatchError::SameFile(input.to_path_buf()));
        }

        let file_name = input
            .file_name()
            .ok_or_else(|| WatchError::NotAFile(input.to_path_buf()))?
            .to_os_string();
        let directory = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
        watcher.watch(directory, RecursiveMode::NonRecursive)?;
        log::debug!("watching {} for {:?}", directory.display(), file_name);

        Ok(Self {
            input: input.to_path_buf(),
            file_name,
            rx,
            _watcher: watcher,
        })
    }

    /// Block forever, calling `on_change` once per save of the input.
    ///
    /// Events are merged until none has arrived for [`SETTLE`], so a file
    /// written in several chunks is processed once, after the last chunk.
    /// A save that leaves no file behind (deleted or renamed away) is skipped.
    pub fn run(self, mut on_change: impl FnMut()) -> Result<(), WatchError> {
        loop {
            match self.rx.recv() {
                Ok(Ok(event)) => {
                    if !is_input_event(&event, &self.file_name) {
                        continue;
                    }
                    self.settle()?;
                    if self.input.exists() {
                        on_change();
                    } else {
                        log::debug!("{} is gone, skipping", self.input.display());
                    }
                }
                Ok(Err(e)) => log::warn!("watch error: {e}"),
                Err(_) => return Err(WatchError::Disconnected),
            }
        }
    }

    /// Drain input events until the channel stays quiet for [`SETTLE`].
    fn settle(&self) -> Result<(), WatchError> {
        loop {
            match self.rx.recv_timeout(SETTLE) {
                Ok(Ok(event)) => {
                    if is_input_event(&event, &self.file_name) {
                        continue;
                    }
                    // Unrelated traffic in the directory must not postpone the run forever.
                    return Ok(());
                }
                Ok(Err(e)) => log::warn!("watch error: {e}"),
                Err(RecvTimeoutError::Timeout) => return Ok(()),
                Err(RecvTimeoutError::Disconnected) => return Err(WatchError::Disconnected),
            }
        }
    }
}

/// Whether `event` is a create/modify touching a file called `file_name`.
fn is_input_event(event: &Event, file_name: &OsStr) -> bool {
    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|path| path.file_name() == Some(file_name))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        // The output may not exist yet.
        _ => a == b,
    }
}

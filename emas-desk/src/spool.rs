//! File spool print surfaces
//!
//! Every job is written as a standalone HTML file into the spool directory,
//! where a print daemon or the operator picks it up. Printing completes as
//! soon as the file is on disk.

use emas_printer::{FrameHost, PopupHost, PopupWindow, PrintError, PrintFrame, PrintResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Unique file name inside the spool directory
fn job_path(dir: &Path, prefix: &str, seq: u64) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("{}-{}-{:04}.html", prefix, stamp, seq))
}

fn ensure_dir(dir: &Path) -> PrintResult<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

// ========== Label frames ==========

#[derive(Debug)]
pub struct SpoolFrameHost {
    dir: PathBuf,
    seq: AtomicU64,
}

impl SpoolFrameHost {
    pub fn new(dir: impl Into<PathBuf>) -> PrintResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self {
            dir,
            seq: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FrameHost for SpoolFrameHost {
    fn create_frame(&self) -> Option<Box<dyn PrintFrame>> {
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "Spool directory missing");
            return None;
        }
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        Some(Box::new(SpoolFrame {
            path: job_path(&self.dir, "labels", seq),
            written: false,
        }))
    }
}

struct SpoolFrame {
    path: PathBuf,
    written: bool,
}

#[async_trait::async_trait]
impl PrintFrame for SpoolFrame {
    fn write_document(&mut self, html: &str) -> PrintResult<()> {
        std::fs::write(&self.path, html)?;
        self.written = true;
        debug!(path = %self.path.display(), bytes = html.len(), "Label sheet spooled");
        Ok(())
    }

    async fn print(&mut self) -> PrintResult<()> {
        if !self.written {
            return Err(PrintError::Surface("no document written".to_string()));
        }
        info!(path = %self.path.display(), "Label job printed");
        Ok(())
    }

    fn remove(self: Box<Self>) {
        debug!(path = %self.path.display(), "Print frame removed");
    }
}

// ========== Receipt windows ==========

#[derive(Debug)]
pub struct SpoolPopupHost {
    dir: PathBuf,
    seq: AtomicU64,
}

impl SpoolPopupHost {
    pub fn new(dir: impl Into<PathBuf>) -> PrintResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self {
            dir,
            seq: AtomicU64::new(0),
        })
    }
}

impl PopupHost for SpoolPopupHost {
    fn open_window(&self) -> Option<Arc<dyn PopupWindow>> {
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "Spool directory missing");
            return None;
        }
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        Some(Arc::new(SpoolWindow::new(job_path(&self.dir, "receipt", seq))))
    }
}

type LoadCallback = Box<dyn FnOnce() + Send>;

/// A spooled receipt window
///
/// Loading completes when the document is written; callbacks registered
/// afterwards run immediately.
pub struct SpoolWindow {
    path: PathBuf,
    loaded: Mutex<bool>,
    pending: Mutex<Vec<LoadCallback>>,
    prints: AtomicUsize,
}

impl SpoolWindow {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            loaded: Mutex::new(false),
            pending: Mutex::new(Vec::new()),
            prints: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How often print was called
    pub fn print_count(&self) -> usize {
        self.prints.load(Ordering::Relaxed)
    }

    fn is_loaded(&self) -> bool {
        self.loaded.lock().map(|l| *l).unwrap_or(false)
    }
}

impl PopupWindow for SpoolWindow {
    fn write_document(&self, html: &str) -> PrintResult<()> {
        std::fs::write(&self.path, html)?;
        if let Ok(mut loaded) = self.loaded.lock() {
            *loaded = true;
        }

        let callbacks: Vec<LoadCallback> = self
            .pending
            .lock()
            .map(|mut p| p.drain(..).collect())
            .unwrap_or_default();
        for callback in callbacks {
            callback();
        }
        Ok(())
    }

    fn on_load(&self, callback: LoadCallback) {
        if self.is_loaded() {
            callback();
            return;
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(callback);
        }
    }

    fn print(&self) -> PrintResult<()> {
        let n = self.prints.fetch_add(1, Ordering::Relaxed) + 1;
        info!(path = %self.path.display(), attempt = n, "Receipt job printed");
        Ok(())
    }
}

//! Print surfaces
//!
//! Hosts that accept a finished HTML document and hand it to a printer.
//! Two shapes exist because the two flows own their output differently:
//!
//! - Labels go through a hidden, single-use [`PrintFrame`] the caller
//!   creates, prints and removes.
//! - Receipts go through a [`PopupWindow`] the host owns; the caller only
//!   writes and triggers print, possibly more than once.

use crate::error::PrintResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Creates a fresh hidden frame per print job
pub trait FrameHost: Send + Sync {
    /// `None` when the frame's window cannot be obtained
    fn create_frame(&self) -> Option<Box<dyn PrintFrame>>;
}

#[async_trait]
pub trait PrintFrame: Send {
    /// Replace the frame's document
    fn write_document(&mut self, html: &str) -> PrintResult<()>;

    /// Print the current document; resolves once printing has finished
    async fn print(&mut self) -> PrintResult<()>;

    /// Detach the frame; it is never reused
    fn remove(self: Box<Self>);
}

/// Opens a new top-level window for a print job
pub trait PopupHost: Send + Sync {
    /// `None` when the window was blocked
    fn open_window(&self) -> Option<Arc<dyn PopupWindow>>;
}

pub trait PopupWindow: Send + Sync {
    fn write_document(&self, html: &str) -> PrintResult<()>;

    /// Run `callback` once the written document has loaded
    fn on_load(&self, callback: Box<dyn FnOnce() + Send>);

    /// Open the print dialog; repeated calls must be harmless
    fn print(&self) -> PrintResult<()>;
}

//! Receipt printing through a popup window

use emas_printer::{PopupHost, PrintResult, Settle, SettlePoint, generate_receipt_html};
use shared::ReceiptDocument;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptPrintOutcome {
    Printed,
    /// The window could not be opened; nothing was printed
    PopupBlocked,
}

/// Render `doc` into a new window and print it
///
/// Print runs on the window's load event and once more after the fallback
/// delay, in case load never arrives. Both may fire.
#[instrument(skip_all, fields(code = %doc.transaction_code, kind = ?doc.kind))]
pub async fn print_receipt(
    doc: &ReceiptDocument,
    host: &dyn PopupHost,
    settle: &dyn Settle,
) -> PrintResult<ReceiptPrintOutcome> {
    let html = generate_receipt_html(doc);

    let Some(window) = host.open_window() else {
        warn!("Receipt window blocked");
        return Ok(ReceiptPrintOutcome::PopupBlocked);
    };

    window.write_document(&html)?;

    let on_load = window.clone();
    window.on_load(Box::new(move || {
        if let Err(e) = on_load.print() {
            warn!(error = %e, "Print on load failed");
        }
    }));

    settle.wait(SettlePoint::ReceiptFallback).await;
    window.print()?;

    info!("Receipt printed");
    Ok(ReceiptPrintOutcome::Printed)
}

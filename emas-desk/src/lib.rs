//! Emas Desk - label and receipt printing for the gold shop counter
//!
//! - Barcode label print dialog (box or selected stock)
//! - Receipt printing for sales and gold deposits
//! - Spool print surfaces, logging and configuration for the CLI

pub mod config;
pub mod dialog;
pub mod logging;
pub mod receipt_print;
pub mod spool;
pub mod ui;

pub use config::{Cli, Command, DeskConfig};
pub use dialog::{DialogState, DialogView, LabelPrintDialog, LabelSource, PrintOutcome};
pub use receipt_print::{ReceiptPrintOutcome, print_receipt};
pub use spool::{SpoolFrameHost, SpoolPopupHost};
pub use ui::{ConsoleUi, OperatorUi, Toast, ToastVariant};

// Re-export library crates for embedders
pub use emas_client;
pub use emas_printer;
pub use shared;

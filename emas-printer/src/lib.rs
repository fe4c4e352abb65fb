//! # emas-printer
//!
//! Label and receipt layout for 80 mm thermal printers.
//!
//! ## Scope
//!
//! This crate handles HOW a page looks and how it reaches a printer:
//! - Printer profiles and label geometry
//! - QR rasterization (preview rasters, PNG data URLs)
//! - Label sheet and receipt HTML
//! - Settle waits and print-surface traits
//!
//! Loading stock and marking it printed stay in application code
//! (`emas-client`, `emas-desk`).
//!
//! ## Example
//!
//! ```ignore
//! use emas_printer::{build_label_sheet, encode_print_images, PrinterProfile};
//!
//! let geometry = PrinterProfile::STANDARD.geometry()?;
//! let images = encode_print_images(&items, &geometry);
//! let html = build_label_sheet(&geometry, &items, &images);
//! frame.write_document(&html)?;
//! frame.print().await?;
//! ```

pub mod error;
pub mod format;
pub mod grid;
pub mod label_sheet;
pub mod profile;
pub mod qr;
pub mod receipt;
pub mod settle;
pub mod surface;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use format::{
    escape_html, format_currency, format_date, format_purity, format_weight, format_weight_spaced,
};
pub use grid::LabelGrid;
pub use label_sheet::{LabelSheet, build_label_sheet};
pub use profile::{LabelGeometry, LabelLayout, LabelProfileKind, PrinterProfile};
pub use qr::{
    PreviewReport, PreviewSurface, QrCanvas, QrImageMap, QrLevel, QrOptions, RasterCanvas,
    RasterSurface, encode_data_url, encode_print_images, encode_raster, paint_preview,
};
pub use receipt::{PaymentBlock, ReceiptRenderer, SummaryLine, WeightSummary, generate_receipt_html};
pub use settle::{ImmediateSettle, Settle, SettleDelays, SettlePoint, TimerSettle};
pub use surface::{FrameHost, PopupHost, PopupWindow, PrintFrame};

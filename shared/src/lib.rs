//! Shared types for the Emas point-of-sale tools
//!
//! Wire and domain types used across the printer, client and desk crates:
//! stock records as returned by the backend, the printable label projection,
//! receipt documents and the backend response envelope.

pub mod models;
pub mod response;

// Re-exports
pub use models::{
    GoldCategoryRef, PrintableStockItem, ProductRef, ReceiptDocument, ReceiptKind,
    ReceiptLineItem, StockRecord,
};
pub use response::{DataResponse, ErrorBody, MarkPrintedRequest, MarkPrintedResponse};
pub use serde::{Deserialize, Serialize};

//! Domain models

pub mod receipt;
pub mod stock;

pub use receipt::{ReceiptDocument, ReceiptKind, ReceiptLineItem};
pub use stock::{GoldCategoryRef, PrintableStockItem, ProductRef, StockRecord};

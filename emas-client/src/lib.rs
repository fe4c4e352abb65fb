//! Emas Client - HTTP client for the stock backend
//!
//! Provides the REST calls the label dialog needs: loading a storage box's
//! stock and marking stock as barcode-printed.

pub mod config;
pub mod error;
pub mod http;
pub mod provider;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use provider::StockProvider;

// Re-export shared types for convenience
pub use shared::{DataResponse, MarkPrintedRequest, MarkPrintedResponse, StockRecord};

//! Stock API used by the label print flow

use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::{DataResponse, MarkPrintedRequest, MarkPrintedResponse, StockRecord};
use tracing::{info, instrument};

/// Stock operations the label dialog depends on
#[async_trait]
pub trait StockProvider: Send + Sync {
    /// Stock currently stored in a box; a `null` payload is an empty box
    async fn box_items(&self, box_id: i64) -> ClientResult<Vec<StockRecord>>;

    /// Flag stock as barcode-printed
    async fn mark_printed(&self, stock_ids: &[i64]) -> ClientResult<MarkPrintedResponse>;
}

#[async_trait]
impl StockProvider for HttpClient {
    #[instrument(skip(self))]
    async fn box_items(&self, box_id: i64) -> ClientResult<Vec<StockRecord>> {
        let items = self
            .get::<DataResponse<Vec<StockRecord>>>(&format!("stocks/box/{}/items", box_id))
            .await?
            .into_data_or_default();
        info!(count = items.len(), "Box stock loaded");
        Ok(items)
    }

    #[instrument(skip(self, stock_ids), fields(count = stock_ids.len()))]
    async fn mark_printed(&self, stock_ids: &[i64]) -> ClientResult<MarkPrintedResponse> {
        let request = MarkPrintedRequest {
            stock_ids: stock_ids.to_vec(),
        };
        let response = self
            .post::<MarkPrintedResponse, _>("stocks-mark-printed", &request)
            .await?;
        info!(marked = ?response.count, "Stock marked printed");
        Ok(response)
    }
}

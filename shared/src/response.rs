//! Backend response types
//!
//! The stock backend wraps payloads as `{"data": ...}` and reports failures
//! as `{"error": "..."}`.

use serde::{Deserialize, Serialize};

/// Response envelope used by every list/detail endpoint
///
/// ```json
/// { "data": [ ... ] }
/// ```
///
/// `data` may be `null` or missing on empty results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Option<T>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data: Some(data) }
    }

    /// Take the payload, falling back to `T::default()` when absent
    pub fn into_data_or_default(self) -> T
    where
        T: Default,
    {
        self.data.unwrap_or_default()
    }
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body for `POST /stocks-mark-printed`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkPrintedRequest {
    pub stock_ids: Vec<i64>,
}

/// Response for `POST /stocks-mark-printed`
///
/// The backend only guarantees a 2xx status; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkPrintedResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Number of stock rows the backend flagged
    #[serde(default)]
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_response_missing_data_defaults() {
        let resp: DataResponse<Vec<i64>> = serde_json::from_str("{}").unwrap();
        assert!(resp.into_data_or_default().is_empty());

        let resp: DataResponse<Vec<i64>> = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(resp.into_data_or_default().is_empty());
    }

    #[test]
    fn test_mark_printed_request_shape() {
        let body = MarkPrintedRequest {
            stock_ids: vec![1, 2, 3],
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"stock_ids":[1,2,3]}"#
        );
    }

    #[test]
    fn test_mark_printed_response_accepts_empty_body() {
        let resp: MarkPrintedResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.message.is_none());
        assert!(resp.count.is_none());
    }

    #[test]
    fn test_mark_printed_response_reads_count() {
        let resp: MarkPrintedResponse =
            serde_json::from_str(r#"{"message":"Stocks marked as printed","count":2}"#).unwrap();
        assert_eq!(resp.count, Some(2));
    }
}

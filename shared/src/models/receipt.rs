//! Receipt Model
//!
//! Transaction snapshot handed to the receipt generator. Presentation only:
//! totals are taken verbatim from the caller.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Receipt flavour
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    #[default]
    Sale,
    /// Gold deposit (setor emas)
    Deposit,
}

/// One receipt line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReceiptLineItem {
    pub name: String,
    /// Weight in grams
    #[serde(default)]
    pub weight: Option<f64>,
    pub price: f64,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub gold_category: Option<String>,
}

/// Receipt input document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReceiptDocument {
    #[serde(rename = "type")]
    pub kind: ReceiptKind,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub store_address: Option<String>,
    #[serde(default)]
    pub store_phone: Option<String>,
    pub transaction_code: String,
    /// Local wall-clock time of the transaction
    ///
    /// Accepts a naive timestamp or RFC 3339 with an offset (`...Z`).
    #[serde(deserialize_with = "deserialize_local_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub cashier_name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub member_code: Option<String>,
    #[serde(default)]
    pub items: Vec<ReceiptLineItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub tax: Option<f64>,
    pub grand_total: f64,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub change_amount: Option<f64>,
    /// `cash`, `transfer`, `qris`, `debit`, `credit` or any backend value
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Deposit only
    #[serde(default)]
    pub total_weight_gross: Option<f64>,
    /// Deposit only
    #[serde(default)]
    pub total_weight_net: Option<f64>,
}

impl ReceiptDocument {
    pub fn is_deposit(&self) -> bool {
        self.kind == ReceiptKind::Deposit
    }
}

/// Deserialize a naive or offset timestamp into local wall-clock time
fn deserialize_local_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    raw.parse::<NaiveDateTime>().map_err(serde::de::Error::custom)
}

//! Stock Model

use serde::{Deserialize, Serialize};

/// Gold category as embedded in a product
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoldCategoryRef {
    #[serde(default)]
    pub code: Option<String>,
    /// Fineness as a fraction (0.75 = 75%)
    #[serde(default)]
    pub purity: Option<f64>,
    #[serde(default)]
    pub sell_price: f64,
}

/// Product as embedded in a stock record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    #[serde(default)]
    pub name: String,
    /// Weight in grams
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub gold_category: Option<GoldCategoryRef>,
}

/// Stock record as returned by `GET /stocks/box/{id}/items`
///
/// Only the fields needed for label printing are modelled; the backend
/// sends many more which are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRecord {
    pub id: i64,
    pub serial_number: String,
    #[serde(default)]
    pub barcode_printed: bool,
    #[serde(default)]
    pub product: Option<ProductRef>,
}

/// Read-only projection of a stock record needed to print one label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrintableStockItem {
    pub id: i64,
    /// QR payload
    pub serial_number: String,
    pub product_name: String,
    pub sell_price_per_unit: f64,
    pub already_printed: bool,
    #[serde(default)]
    pub weight_grams: Option<f64>,
    #[serde(default)]
    pub purity: Option<f64>,
}

impl PrintableStockItem {
    /// Weight used on info labels (0 when unknown)
    pub fn weight_or_zero(&self) -> f64 {
        self.weight_grams.unwrap_or(0.0)
    }

    /// Purity used on info labels (0 when unknown)
    pub fn purity_or_zero(&self) -> f64 {
        self.purity.unwrap_or(0.0)
    }
}

impl From<&StockRecord> for PrintableStockItem {
    fn from(record: &StockRecord) -> Self {
        let product = record.product.as_ref();
        let category = product.and_then(|p| p.gold_category.as_ref());

        Self {
            id: record.id,
            serial_number: record.serial_number.clone(),
            product_name: product.map(|p| p.name.clone()).unwrap_or_default(),
            sell_price_per_unit: category.map(|c| c.sell_price).unwrap_or(0.0),
            already_printed: record.barcode_printed,
            weight_grams: product.and_then(|p| p.weight),
            purity: category.and_then(|c| c.purity),
        }
    }
}

impl From<StockRecord> for PrintableStockItem {
    fn from(record: StockRecord) -> Self {
        Self::from(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_record_projection() {
        let json = r#"{
            "id": 7,
            "serial_number": "SN-0007",
            "barcode_printed": true,
            "status": "available",
            "product": {
                "name": "Cincin Polos",
                "weight": 2.5,
                "gold_category": { "code": "K18", "purity": 0.75, "sell_price": 950000 }
            }
        }"#;
        let record: StockRecord = serde_json::from_str(json).unwrap();
        let item = PrintableStockItem::from(&record);

        assert_eq!(item.id, 7);
        assert_eq!(item.serial_number, "SN-0007");
        assert_eq!(item.product_name, "Cincin Polos");
        assert_eq!(item.sell_price_per_unit, 950000.0);
        assert!(item.already_printed);
        assert_eq!(item.weight_grams, Some(2.5));
        assert_eq!(item.purity, Some(0.75));
    }

    #[test]
    fn test_stock_record_without_product() {
        let record: StockRecord =
            serde_json::from_str(r#"{"id": 1, "serial_number": "X"}"#).unwrap();
        let item = PrintableStockItem::from(record);

        assert_eq!(item.product_name, "");
        assert_eq!(item.sell_price_per_unit, 0.0);
        assert!(!item.already_printed);
        assert_eq!(item.weight_or_zero(), 0.0);
        assert_eq!(item.purity_or_zero(), 0.0);
    }
}

//! Receipt HTML generator for 80 mm thermal rolls
//!
//! Pure function of the [`ReceiptDocument`]: the same input always yields
//! the same markup. Sale and deposit receipts share one structure and only
//! differ in labels and in which optional blocks are present.

use crate::format::{escape_html, format_currency, format_date, format_weight, format_weight_spaced};
use shared::{ReceiptDocument, ReceiptKind, ReceiptLineItem};
use std::fmt::Write;

const DEFAULT_STORE_NAME: &str = "TOKO EMAS";
const DEFAULT_STORE_ADDRESS: &str = "Alamat Toko";

/// Weight summary shown on deposit receipts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSummary {
    pub gross: Option<f64>,
    pub net: Option<f64>,
}

/// Payment block shown on sale receipts
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentBlock {
    pub method_label: String,
    /// Present only for cash payments
    pub cash: Option<CashLines>,
}

/// Optional summary line (discount, tax)
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashLines {
    pub paid: f64,
    pub change: f64,
}

/// Display label for a payment method code
pub fn payment_method_label(method: &str) -> String {
    match method {
        "cash" => "TUNAI".to_string(),
        "transfer" => "TRANSFER".to_string(),
        "qris" => "QRIS".to_string(),
        "debit" => "DEBIT".to_string(),
        "credit" => "KREDIT".to_string(),
        other => other.to_uppercase(),
    }
}

/// A present, non-zero amount
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// A present, non-zero weight
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// A present, non-blank string
fn text(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

pub struct ReceiptRenderer<'a> {
    receipt: &'a ReceiptDocument,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(receipt: &'a ReceiptDocument) -> Self {
        Self { receipt }
    }

    fn is_deposit(&self) -> bool {
        self.receipt.kind == ReceiptKind::Deposit
    }

    /// Weight block: deposits with at least one weight
    pub fn weight_summary(&self) -> Option<WeightSummary> {
        if !self.is_deposit() {
            return None;
        }
        let gross = non_zero(self.receipt.total_weight_gross);
        let net = non_zero(self.receipt.total_weight_net);
        if gross.is_none() && net.is_none() {
            return None;
        }
        Some(WeightSummary { gross, net })
    }

    /// Payment block: sales with a paid amount
    pub fn payment_block(&self) -> Option<PaymentBlock> {
        if self.is_deposit() {
            return None;
        }
        let paid = self.receipt.paid_amount?;
        let method = self.receipt.payment_method.as_deref();

        Some(PaymentBlock {
            method_label: payment_method_label(method.unwrap_or("cash")),
            cash: (method == Some("cash")).then(|| CashLines {
                paid,
                change: self.receipt.change_amount.unwrap_or(0.0),
            }),
        })
    }

    /// Discount line, only for a positive discount
    pub fn discount_line(&self) -> Option<SummaryLine> {
        positive(self.receipt.discount).map(|amount| SummaryLine {
            label: "Diskon",
            value: format!("-{}", format_currency(amount)),
        })
    }

    /// Tax line, only for a positive tax
    pub fn tax_line(&self) -> Option<SummaryLine> {
        positive(self.receipt.tax).map(|amount| SummaryLine {
            label: "Pajak",
            value: format_currency(amount),
        })
    }

    pub fn render(&self) -> String {
        let r = self.receipt;
        let kind_title = if self.is_deposit() { "Setor Emas" } else { "Penjualan" };

        let mut body = String::new();
        self.write_header(&mut body);
        self.write_badge(&mut body);
        self.write_info(&mut body);
        self.write_items(&mut body);
        if let Some(weights) = self.weight_summary() {
            Self::write_weights(&mut body, &weights);
        }
        self.write_summary(&mut body);
        if let Some(payment) = self.payment_block() {
            Self::write_payment(&mut body, &payment);
        }
        if let Some(notes) = text(r.notes.as_ref()) {
            let _ = write!(
                body,
                "\n    <div class=\"notes-section\">\n      <div class=\"section-title\">📝 Catatan</div>\n      <div class=\"notes-text\">{}</div>\n    </div>",
                escape_html(notes)
            );
        }
        let _ = write!(
            body,
            "\n    <div class=\"barcode-section\">\n      <div class=\"divider-deco\">★ ★ ★ ★ ★</div>\n      <div class=\"barcode-text\">{}</div>\n    </div>",
            escape_html(&r.transaction_code)
        );
        body.push_str(FOOTER);

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>Struk {} - {}</title>\n  <style>{}</style>\n</head>\n<body>\n  <div class=\"receipt\">{}\n  </div>\n</body>\n</html>\n",
            kind_title,
            escape_html(&r.transaction_code),
            STYLESHEET,
            body
        )
    }

    fn write_header(&self, out: &mut String) {
        let r = self.receipt;
        let name = text(r.store_name.as_ref()).unwrap_or(DEFAULT_STORE_NAME);
        let address = text(r.store_address.as_ref()).unwrap_or(DEFAULT_STORE_ADDRESS);
        let phone = text(r.store_phone.as_ref())
            .map(|p| format!("<br>\n        Telp: {}", escape_html(p)))
            .unwrap_or_default();

        let _ = write!(
            out,
            "\n    <div class=\"header\">\n      <div class=\"store-name\">{}</div>\n      <div class=\"store-info\">\n        {}{}\n      </div>\n    </div>",
            escape_html(name),
            escape_html(address),
            phone
        );
    }

    fn write_badge(&self, out: &mut String) {
        let (class, label) = if self.is_deposit() {
            ("deposit", "⬇ SETOR EMAS")
        } else {
            ("sale", "🛒 PENJUALAN")
        };
        let _ = write!(
            out,
            "\n    <div class=\"tx-type\">\n      <span class=\"tx-badge {}\">{}</span>\n    </div>",
            class, label
        );
    }

    fn write_info(&self, out: &mut String) {
        let r = self.receipt;
        out.push_str("\n    <div class=\"info-section\">");
        let _ = write!(
            out,
            "\n      <div class=\"info-row\">\n        <span class=\"info-label\">No. Transaksi</span>\n        <span class=\"info-value tx-code\">{}</span>\n      </div>",
            escape_html(&r.transaction_code)
        );
        info_row(out, "Tanggal", &format_date(&r.date));
        if let Some(location) = text(r.location_name.as_ref()) {
            info_row(out, "Lokasi", &escape_html(location));
        }
        if let Some(cashier) = text(r.cashier_name.as_ref()) {
            info_row(out, "Kasir", &escape_html(cashier));
        }
        if let Some(customer) = text(r.customer_name.as_ref()) {
            let label = if self.is_deposit() { "Penyetor" } else { "Pelanggan" };
            let member = text(r.member_code.as_ref())
                .map(|code| format!(" ({})", escape_html(code)))
                .unwrap_or_default();
            info_row(out, label, &format!("{}{}", escape_html(customer), member));
        }
        out.push_str("\n    </div>");
    }

    fn write_items(&self, out: &mut String) {
        let noun = if self.is_deposit() { "Item" } else { "Produk" };
        let _ = write!(
            out,
            "\n    <div class=\"items-section\">\n      <div class=\"section-title\">📦 Daftar {}</div>\n      <table class=\"items-table\">\n        <tbody>",
            noun
        );
        for (idx, item) in self.receipt.items.iter().enumerate() {
            item_row(out, idx + 1, item);
        }
        out.push_str("\n        </tbody>\n      </table>\n    </div>");
    }

    fn write_weights(out: &mut String, weights: &WeightSummary) {
        out.push_str("\n    <div class=\"weight-section\">\n      <div class=\"section-title\">⚖ Ringkasan Berat</div>");
        for (label, value) in [("Berat Kotor", weights.gross), ("Berat Bersih", weights.net)] {
            if let Some(grams) = value {
                let _ = write!(
                    out,
                    "\n      <div class=\"weight-row\">\n        <span>{}</span>\n        <span><strong>{}</strong></span>\n      </div>",
                    label,
                    format_weight_spaced(grams)
                );
            }
        }
        out.push_str("\n    </div>");
    }

    fn write_summary(&self, out: &mut String) {
        let r = self.receipt;
        out.push_str("\n    <div class=\"summary-section\">");
        summary_row(out, "summary-row", "Subtotal", &format_currency(r.subtotal));
        if let Some(line) = self.discount_line() {
            summary_row(out, "summary-row discount", line.label, &line.value);
        }
        if let Some(line) = self.tax_line() {
            summary_row(out, "summary-row", line.label, &line.value);
        }
        let total_label = if self.is_deposit() { "TOTAL BAYAR" } else { "GRAND TOTAL" };
        summary_row(
            out,
            "summary-row total",
            total_label,
            &format_currency(r.grand_total),
        );
        out.push_str("\n    </div>");
    }

    fn write_payment(out: &mut String, payment: &PaymentBlock) {
        let _ = write!(
            out,
            "\n    <div class=\"payment-section\">\n      <div class=\"payment-row\">\n        <span>Metode Bayar<span class=\"payment-method\">{}</span></span>\n      </div>",
            escape_html(&payment.method_label)
        );
        if let Some(cash) = payment.cash {
            summary_row(out, "payment-row", "Dibayar", &format_currency(cash.paid));
            summary_row(
                out,
                "payment-row change-amount",
                "Kembalian",
                &format_currency(cash.change),
            );
        }
        out.push_str("\n    </div>");
    }
}

/// Generate the complete receipt document
pub fn generate_receipt_html(receipt: &ReceiptDocument) -> String {
    ReceiptRenderer::new(receipt).render()
}

fn info_row(out: &mut String, label: &str, value_html: &str) {
    let _ = write!(
        out,
        "\n      <div class=\"info-row\">\n        <span class=\"info-label\">{}</span>\n        <span class=\"info-value\">{}</span>\n      </div>",
        label, value_html
    );
}

fn summary_row(out: &mut String, class: &str, label: &str, value: &str) {
    let _ = write!(
        out,
        "\n      <div class=\"{}\">\n        <span>{}</span>\n        <span>{}</span>\n      </div>",
        class, label, value
    );
}

fn item_row(out: &mut String, number: usize, item: &ReceiptLineItem) {
    let mut details: Vec<String> = Vec::new();
    if let Some(weight) = non_zero(item.weight) {
        details.push(format_weight(weight));
    }
    if let Some(category) = text(item.gold_category.as_ref()) {
        details.push(escape_html(category));
    }
    if let Some(barcode) = text(item.barcode.as_ref()) {
        details.push(escape_html(barcode));
    }

    let _ = write!(
        out,
        "\n          <tr>\n            <td style=\"padding: 4px 0; vertical-align: top; font-size: 11px;\">\n              <div style=\"font-weight: 500;\">{}. {}</div>\n              <div style=\"font-size: 10px; color: #666; margin-top: 2px;\">{}</div>\n            </td>\n            <td style=\"padding: 4px 0; text-align: right; vertical-align: top; font-size: 11px; white-space: nowrap;\">{}</td>\n          </tr>",
        number,
        escape_html(&item.name),
        details.join(" • "),
        format_currency(item.price)
    );
}

const FOOTER: &str = "
    <div class=\"footer\">
      <div class=\"thank-you\">✨ Terima Kasih ✨</div>
      <div class=\"footer-note\">
        Simpan struk ini sebagai bukti transaksi<br>
        Barang yang sudah dibeli tidak dapat dikembalikan
      </div>
      <div class=\"divider-deco\">════════════════════════════════</div>
    </div>";

const STYLESHEET: &str = "
    @page { size: 80mm auto; margin: 0; }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: 'Courier New', 'Lucida Console', monospace;
      width: 80mm;
      max-width: 80mm;
      padding: 8px 10px;
      background: #fff;
      color: #000;
      font-size: 11px;
      line-height: 1.3;
    }
    .receipt { width: 100%; }
    .header { text-align: center; padding-bottom: 8px; border-bottom: 2px solid #000; margin-bottom: 8px; }
    .store-name { font-size: 16px; font-weight: bold; letter-spacing: 1px; margin-bottom: 4px; }
    .store-info { font-size: 9px; color: #333; line-height: 1.4; }
    .tx-type { text-align: center; padding: 6px 0; margin-bottom: 8px; }
    .tx-badge { display: inline-block; padding: 4px 12px; font-size: 12px; font-weight: bold; letter-spacing: 1px; border: 2px solid #000; border-radius: 4px; }
    .tx-badge.sale { background: #000; color: #fff; }
    .tx-badge.deposit { background: #fff; color: #000; }
    .info-section { padding: 8px 0; border-bottom: 1px dashed #666; }
    .info-row { display: flex; justify-content: space-between; margin-bottom: 3px; font-size: 10px; }
    .info-label { color: #666; }
    .info-value { font-weight: 500; text-align: right; max-width: 60%; }
    .tx-code { font-size: 12px; font-weight: bold; letter-spacing: 0.5px; }
    .items-section { padding: 8px 0; border-bottom: 1px dashed #666; }
    .section-title { font-size: 10px; font-weight: bold; text-transform: uppercase; letter-spacing: 1px; margin-bottom: 6px; color: #333; }
    .items-table { width: 100%; border-collapse: collapse; }
    .summary-section { padding: 8px 0; border-bottom: 1px dashed #666; }
    .summary-row { display: flex; justify-content: space-between; margin-bottom: 4px; font-size: 11px; }
    .summary-row.total { font-size: 14px; font-weight: bold; margin-top: 6px; padding-top: 6px; border-top: 1px solid #333; }
    .summary-row.discount { color: #c00; }
    .payment-section { padding: 8px 0; border-bottom: 1px dashed #666; }
    .payment-row { display: flex; justify-content: space-between; margin-bottom: 3px; font-size: 11px; }
    .payment-method { display: inline-block; padding: 2px 6px; background: #eee; border-radius: 2px; font-size: 10px; margin-left: 4px; }
    .change-amount { font-size: 13px; font-weight: bold; color: #060; }
    .weight-section { padding: 8px 10px; border-bottom: 1px dashed #666; background: #f9f9f9; margin: 0 -10px; }
    .weight-row { display: flex; justify-content: space-between; margin-bottom: 3px; font-size: 11px; }
    .notes-section { padding: 8px 0; border-bottom: 1px dashed #666; }
    .notes-text { font-size: 10px; font-style: italic; color: #333; background: #f5f5f5; padding: 6px; border-radius: 2px; }
    .footer { text-align: center; padding-top: 10px; }
    .thank-you { font-size: 12px; font-weight: bold; margin-bottom: 4px; }
    .footer-note { font-size: 9px; color: #666; line-height: 1.4; }
    .divider-deco { margin: 6px 0; text-align: center; font-size: 8px; letter-spacing: 2px; color: #999; }
    .barcode-section { text-align: center; padding: 8px 0; margin-top: 6px; }
    .barcode-text { font-family: 'Courier New', monospace; font-size: 14px; letter-spacing: 2px; margin-top: 4px; }
    @media print { body { width: 80mm; padding: 4px 6px; } }
  ";

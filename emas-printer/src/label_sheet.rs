//! Label sheet HTML builder
//!
//! Produces the self-contained document handed to the print frame. The page
//! is exactly `rows × row height` long so the printer cuts after the last
//! row, and all sizes come from [`LabelGeometry`].

use crate::format::{escape_html, format_purity, format_weight, mm};
use crate::grid::LabelGrid;
use crate::profile::{LabelGeometry, LabelLayout};
use crate::qr::QrImageMap;
use shared::PrintableStockItem;
use std::fmt::Write;

pub struct LabelSheet<'a> {
    geometry: &'a LabelGeometry,
    items: &'a [PrintableStockItem],
    images: &'a QrImageMap,
}

impl<'a> LabelSheet<'a> {
    pub fn new(
        geometry: &'a LabelGeometry,
        items: &'a [PrintableStockItem],
        images: &'a QrImageMap,
    ) -> Self {
        Self {
            geometry,
            items,
            images,
        }
    }

    pub fn grid(&self) -> LabelGrid<'a, PrintableStockItem> {
        LabelGrid::new(self.items, self.geometry.profile.columns_per_row)
    }

    pub fn render(&self) -> String {
        let grid = self.grid();
        let mut rows = String::new();
        for row in grid.iter_rows() {
            rows.push_str("<div class=\"row\">");
            for item in row {
                self.write_label(&mut rows, item);
            }
            rows.push_str("</div>");
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>Cetak Label</title>\n<style>\n{}</style>\n</head>\n<body><div class=\"sheet\">{}</div></body>\n</html>",
            self.stylesheet(grid.rows()),
            rows
        )
    }

    fn stylesheet(&self, rows: usize) -> String {
        let g = self.geometry;
        let p = &g.profile;
        let paper_w = mm(p.paper_width_mm);
        let page_h = mm(g.page_height_mm(rows));

        let mut css = String::new();
        let _ = writeln!(css, "@page{{size:{} {};margin:0}}", paper_w, page_h);
        css.push_str("*{margin:0;padding:0;box-sizing:border-box;line-height:1}\n");
        let _ = writeln!(
            css,
            "html,body{{font-family:Arial,sans-serif;width:{};height:{};font-size:0}}",
            paper_w, page_h
        );
        let _ = writeln!(css, ".sheet{{width:{};height:{}}}", paper_w, page_h);
        let _ = writeln!(
            css,
            ".row{{display:flex;flex-direction:row;align-items:flex-start;width:{};height:{};padding:{} {} {} {};column-gap:{};overflow:hidden;white-space:nowrap}}",
            paper_w,
            mm(p.paper_height_per_row_mm),
            mm(p.padding_top_mm()),
            mm(p.margin_horizontal_mm),
            mm(p.margin_vertical_mm),
            mm(p.padding_left_mm()),
            mm(p.gap_between_columns_mm)
        );
        css.push_str(&self.label_css());
        css
    }

    fn label_css(&self) -> String {
        let g = self.geometry;
        let w = g.label_width_mm;
        let h = g.label_height_mm;
        let qr = g.qr_edge_mm();
        let mut css = String::new();

        match g.profile.layout {
            LabelLayout::NameAndQr => {
                let _ = writeln!(
                    css,
                    ".label{{display:flex;flex:0 0 auto;flex-direction:column;align-items:center;justify-content:center;width:{};height:{};overflow:hidden}}",
                    mm(w),
                    mm(h)
                );
                let _ = writeln!(
                    css,
                    ".name{{font-size:6pt;font-weight:bold;color:#000;text-align:center;white-space:nowrap;overflow:hidden;text-overflow:ellipsis;max-width:{};line-height:1.4}}",
                    mm(w - 1.0)
                );
                let _ = writeln!(
                    css,
                    ".qr-img{{display:block;width:{};height:{};margin-top:0.5mm}}",
                    mm(qr),
                    mm(qr)
                );
            }
            LabelLayout::QrBesideInfo => {
                let _ = writeln!(
                    css,
                    ".label{{display:flex;flex:0 0 auto;flex-direction:row;align-items:center;width:{};height:{};overflow:hidden}}",
                    mm(w),
                    mm(h)
                );
                css.push_str(".qr-side{display:flex;align-items:center;justify-content:center;padding:0.5mm;padding-left:3mm;flex-shrink:0}\n");
                let _ = writeln!(
                    css,
                    ".qr-img{{display:block;width:{};height:{}}}",
                    mm(qr),
                    mm(qr)
                );
                css.push_str(".info-side{flex:1;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:0.5mm;overflow:hidden}\n");
                let _ = writeln!(
                    css,
                    ".info-text{{font-size:6pt;font-weight:900;color:#000;text-align:center;white-space:nowrap;overflow:hidden;text-overflow:ellipsis;max-width:{};line-height:1.4}}",
                    mm(w - qr - 2.0)
                );
            }
            LabelLayout::InfoOverQr => {
                let half = h / 2.0;
                let _ = writeln!(
                    css,
                    ".label{{display:flex;flex:0 0 auto;flex-direction:column;width:{};height:{};overflow:hidden}}",
                    mm(w),
                    mm(h)
                );
                let _ = writeln!(
                    css,
                    ".info-top{{height:{};display:flex;flex-direction:column;align-items:center;justify-content:center;padding:0.5mm;overflow:hidden}}",
                    mm(half)
                );
                let _ = writeln!(
                    css,
                    ".info-text{{font-size:7pt;font-weight:900;color:#000;text-align:center;white-space:nowrap;overflow:hidden;text-overflow:ellipsis;max-width:{};line-height:1.4}}",
                    mm(w - 1.0)
                );
                let _ = writeln!(
                    css,
                    ".qr-bottom{{height:{};display:flex;align-items:center;justify-content:center;padding:0.5mm}}",
                    mm(half)
                );
                let _ = writeln!(
                    css,
                    ".qr-img{{display:block;width:{};height:{}}}",
                    mm(qr),
                    mm(qr)
                );
            }
        }
        css
    }

    fn qr_img(&self, item: &PrintableStockItem) -> String {
        match self.images.get(&item.serial_number) {
            Some(url) => format!("<img src=\"{}\" class=\"qr-img\"/>", url),
            None => String::new(),
        }
    }

    fn info_lines(item: &PrintableStockItem) -> String {
        format!(
            "<div class=\"info-text\">{}</div><div class=\"info-text\">{}</div>",
            format_weight(item.weight_or_zero()),
            format_purity(item.purity_or_zero())
        )
    }

    fn write_label(&self, out: &mut String, item: &PrintableStockItem) {
        let qr = self.qr_img(item);
        let _ = match self.geometry.profile.layout {
            LabelLayout::NameAndQr => write!(
                out,
                "<div class=\"label\"><div class=\"name\">{}</div>{}</div>",
                escape_html(&item.product_name),
                qr
            ),
            LabelLayout::QrBesideInfo => write!(
                out,
                "<div class=\"label\"><div class=\"qr-side\">{}</div><div class=\"info-side\">{}</div></div>",
                qr,
                Self::info_lines(item)
            ),
            LabelLayout::InfoOverQr => write!(
                out,
                "<div class=\"label\"><div class=\"info-top\">{}</div><div class=\"qr-bottom\">{}</div></div>",
                Self::info_lines(item),
                qr
            ),
        };
    }
}

/// Convenience wrapper around [`LabelSheet::render`]
pub fn build_label_sheet(
    geometry: &LabelGeometry,
    items: &[PrintableStockItem],
    images: &QrImageMap,
) -> String {
    LabelSheet::new(geometry, items, images).render()
}

//! QR code rasterization for label previews and print documents
//!
//! Two resolutions are produced from the same payload:
//! - preview: painted straight into an on-screen canvas (96 dpi)
//! - print: PNG data URLs embedded in the label sheet (10 px/mm)
//!
//! Canvases are injected through [`PreviewSurface`] instead of being looked
//! up globally, so the encoding path runs without any UI.

use crate::error::{PrintError, PrintResult};
use crate::profile::LabelGeometry;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use shared::PrintableStockItem;
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QrLevel {
    #[default]
    L,
    M,
    Q,
    H,
}

impl From<QrLevel> for EcLevel {
    fn from(level: QrLevel) -> Self {
        match level {
            QrLevel::L => EcLevel::L,
            QrLevel::M => EcLevel::M,
            QrLevel::Q => EcLevel::Q,
            QrLevel::H => EcLevel::H,
        }
    }
}

/// Encoder options: output width, quiet zone and error correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    pub width_px: u32,
    /// Quiet zone in modules
    pub margin_modules: u32,
    pub error_correction: QrLevel,
}

impl QrOptions {
    /// On-screen canvas options: level L, no quiet zone
    pub fn preview(geometry: &LabelGeometry) -> Self {
        Self {
            width_px: geometry.preview_qr_px(),
            margin_modules: 0,
            error_correction: QrLevel::L,
        }
    }

    /// Print image options: level L, no quiet zone, higher resolution
    pub fn print(geometry: &LabelGeometry) -> Self {
        Self {
            width_px: geometry.print_qr_px(),
            margin_modules: 0,
            error_correction: QrLevel::L,
        }
    }
}

/// Encode `text` into a square grayscale raster of `width_px` pixels
///
/// When `width_px` is smaller than the module count the raster falls back
/// to one pixel per module.
pub fn encode_raster(text: &str, options: &QrOptions) -> PrintResult<GrayImage> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), options.error_correction.into())
        .map_err(|e| PrintError::QrEncode(format!("{}: {}", text, e)))?;

    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let total = module_count + 2 * options.margin_modules;
    let size = options.width_px.max(total);

    let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));

    for y in 0..size {
        let my = (y as u64 * total as u64 / size as u64) as u32;
        if my < options.margin_modules || my >= options.margin_modules + module_count {
            continue;
        }
        let row = (my - options.margin_modules) * module_count;

        for x in 0..size {
            let mx = (x as u64 * total as u64 / size as u64) as u32;
            if mx < options.margin_modules || mx >= options.margin_modules + module_count {
                continue;
            }
            let idx = (row + mx - options.margin_modules) as usize;
            if modules[idx] == qrcode::Color::Dark {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }

    Ok(img)
}

/// Encode `text` as a `data:image/png;base64,...` URL
pub fn encode_data_url(text: &str, options: &QrOptions) -> PrintResult<String> {
    let raster = encode_raster(text, options)?;
    let png = encode_png(raster)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

fn encode_png(raster: GrayImage) -> PrintResult<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(raster)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| PrintError::ImageEncode(e.to_string()))?;
    Ok(bytes)
}

// ========== Print images ==========

/// Serial number -> PNG data URL
pub type QrImageMap = BTreeMap<String, String>;

/// Encode the print-resolution QR image of every item
///
/// A serial that appears more than once is encoded once. Encoding failures
/// are logged and leave the serial out of the map; the label then prints
/// without a QR image.
pub fn encode_print_images(items: &[PrintableStockItem], geometry: &LabelGeometry) -> QrImageMap {
    let options = QrOptions::print(geometry);
    let mut map = QrImageMap::new();

    for item in items {
        if map.contains_key(&item.serial_number) {
            continue;
        }
        match encode_data_url(&item.serial_number, &options) {
            Ok(url) => {
                map.insert(item.serial_number.clone(), url);
            }
            Err(e) => {
                warn!(stock_id = item.id, error = %e, "QR code error");
            }
        }
    }

    debug!(count = map.len(), width_px = options.width_px, "Print QR images encoded");
    map
}

// ========== Preview ==========

/// A drawable QR target (one per label in the preview)
pub trait QrCanvas {
    fn draw(&mut self, raster: GrayImage);
}

/// Owner of the preview canvases, addressed by stock id
pub trait PreviewSurface {
    /// Render blank canvases for the current list, dropping the old ones
    fn mount(&mut self, items: &[PrintableStockItem]);

    /// `None` when no canvas exists yet for this stock
    fn canvas(&mut self, stock_id: i64) -> Option<&mut dyn QrCanvas>;
}

/// Outcome of one preview paint pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewReport {
    pub painted: usize,
    pub failed: usize,
    pub missing_canvas: usize,
}

/// Paint every item's QR code into its preview canvas
///
/// Must run after the surface has mounted canvases for the current list.
/// A failed encode is logged and skipped; the rest of the batch still paints.
pub fn paint_preview(
    items: &[PrintableStockItem],
    geometry: &LabelGeometry,
    surface: &mut dyn PreviewSurface,
) -> PreviewReport {
    let options = QrOptions::preview(geometry);
    let mut report = PreviewReport::default();

    for item in items {
        let Some(canvas) = surface.canvas(item.id) else {
            report.missing_canvas += 1;
            continue;
        };
        match encode_raster(&item.serial_number, &options) {
            Ok(raster) => {
                canvas.draw(raster);
                report.painted += 1;
            }
            Err(e) => {
                warn!(stock_id = item.id, error = %e, "Error generating QR code");
                report.failed += 1;
            }
        }
    }

    debug!(
        painted = report.painted,
        failed = report.failed,
        missing = report.missing_canvas,
        "Preview painted"
    );
    report
}

/// In-memory canvas
#[derive(Debug, Clone, Default)]
pub struct RasterCanvas {
    image: Option<GrayImage>,
}

impl RasterCanvas {
    pub fn image(&self) -> Option<&GrayImage> {
        self.image.as_ref()
    }

    pub fn is_blank(&self) -> bool {
        self.image.is_none()
    }
}

impl QrCanvas for RasterCanvas {
    fn draw(&mut self, raster: GrayImage) {
        self.image = Some(raster);
    }
}

/// In-memory preview surface
///
/// Canvases exist only for mounted stock ids, mirroring a rendered list.
#[derive(Debug, Clone, Default)]
pub struct RasterSurface {
    canvases: HashMap<i64, RasterCanvas>,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stock_id: i64) -> Option<&RasterCanvas> {
        self.canvases.get(&stock_id)
    }

    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }

    /// Write every painted canvas as `qr-<id>.png` into `dir`
    pub fn save_png(&self, dir: &Path) -> PrintResult<usize> {
        std::fs::create_dir_all(dir)?;
        let mut saved = 0;
        for (id, canvas) in &self.canvases {
            if let Some(img) = canvas.image() {
                let png = encode_png(img.clone())?;
                std::fs::write(dir.join(format!("qr-{}.png", id)), png)?;
                saved += 1;
            }
        }
        Ok(saved)
    }
}

impl PreviewSurface for RasterSurface {
    fn mount(&mut self, items: &[PrintableStockItem]) {
        self.canvases = items
            .iter()
            .map(|item| (item.id, RasterCanvas::default()))
            .collect();
    }

    fn canvas(&mut self, stock_id: i64) -> Option<&mut dyn QrCanvas> {
        self.canvases
            .get_mut(&stock_id)
            .map(|c| c as &mut dyn QrCanvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PrinterProfile;

    fn item(id: i64, serial: &str) -> PrintableStockItem {
        PrintableStockItem {
            id,
            serial_number: serial.to_string(),
            product_name: format!("Produk {}", id),
            sell_price_per_unit: 0.0,
            already_printed: false,
            weight_grams: None,
            purity: None,
        }
    }

    #[test]
    fn test_raster_is_exact_width() {
        let options = QrOptions {
            width_px: 120,
            margin_modules: 0,
            error_correction: QrLevel::L,
        };
        let img = encode_raster("SN-0001", &options).unwrap();
        assert_eq!(img.width(), 120);
        assert_eq!(img.height(), 120);
        // Finder pattern corner is dark without a quiet zone
        assert_eq!(img.get_pixel(0, 0), &Luma([0u8]));
    }

    #[test]
    fn test_raster_margin_is_white() {
        let options = QrOptions {
            width_px: 100,
            margin_modules: 4,
            error_correction: QrLevel::M,
        };
        let img = encode_raster("SN-0001", &options).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Luma([255u8]));
    }

    #[test]
    fn test_small_width_falls_back_to_module_count() {
        let options = QrOptions {
            width_px: 5,
            margin_modules: 0,
            error_correction: QrLevel::L,
        };
        let img = encode_raster("SN-0001", &options).unwrap();
        // Version 1 symbol is 21 modules wide
        assert_eq!(img.width(), 21);
    }

    #[test]
    fn test_data_url_prefix() {
        let g = PrinterProfile::STANDARD.geometry().unwrap();
        let url = encode_data_url("SN-0001", &QrOptions::print(&g)).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_oversized_payload_fails() {
        let g = PrinterProfile::STANDARD.geometry().unwrap();
        let huge = "X".repeat(8000);
        assert!(matches!(
            encode_raster(&huge, &QrOptions::preview(&g)),
            Err(PrintError::QrEncode(_))
        ));
    }

    #[test]
    fn test_print_images_dedupe_and_skip_failures() {
        let g = PrinterProfile::STANDARD.geometry().unwrap();
        let huge = "X".repeat(8000);
        let items = vec![item(1, "SN-A"), item(2, "SN-A"), item(3, &huge), item(4, "SN-B")];
        let map = encode_print_images(&items, &g);
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("SN-A"));
        assert!(map.contains_key("SN-B"));
        assert!(!map.contains_key(&huge));
    }

    #[test]
    fn test_paint_preview_into_mounted_canvases() {
        let g = PrinterProfile::STANDARD.geometry().unwrap();
        let huge = "X".repeat(8000);
        let items = vec![item(1, "SN-A"), item(2, &huge), item(3, "SN-C")];
        let mut surface = RasterSurface::new();
        surface.mount(&items[..2]);

        let report = paint_preview(&items, &g, &mut surface);
        assert_eq!(
            report,
            PreviewReport {
                painted: 1,
                failed: 1,
                missing_canvas: 1
            }
        );

        let canvas = surface.get(1).unwrap();
        assert_eq!(canvas.image().unwrap().width(), 45);
        assert!(surface.get(2).unwrap().is_blank());
    }

    #[test]
    fn test_save_png() {
        let g = PrinterProfile::STANDARD.geometry().unwrap();
        let items = vec![item(1, "SN-A"), item(2, "SN-B")];
        let mut surface = RasterSurface::new();
        surface.mount(&items);
        paint_preview(&items, &g, &mut surface);

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(surface.save_png(dir.path()).unwrap(), 2);
        assert!(dir.path().join("qr-1.png").exists());
    }
}

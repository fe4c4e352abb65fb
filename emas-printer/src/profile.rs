//! Printer profile and label geometry
//!
//! A profile describes one physical thermal printer + paper roll in
//! millimetres. Profiles are compile-time values bound to a printer model;
//! supporting a different printer means adding a preset, not a setting.

use crate::error::{PrintError, PrintResult};
use std::fmt;
use std::str::FromStr;

/// Screen conversion at 96 dpi
pub const PREVIEW_PX_PER_MM: f64 = 3.78;

/// Print rasters get more source pixels than the preview
pub const PRINT_PX_PER_MM: f64 = 10.0;

/// What goes inside one label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLayout {
    /// Product name on top, QR code below
    NameAndQr,
    /// QR code on the left, weight and purity on the right
    QrBesideInfo,
    /// Weight and purity on the top half, QR code on the bottom half
    InfoOverQr,
}

/// Physical description of the target printer and paper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterProfile {
    pub name: &'static str,
    pub paper_width_mm: f64,
    pub paper_height_per_row_mm: f64,
    pub margin_horizontal_mm: f64,
    pub margin_vertical_mm: f64,
    /// Extra padding above the top margin, for stock that feeds low
    pub top_offset_mm: f64,
    /// Extra padding left of the left margin
    pub left_offset_mm: f64,
    pub gap_between_columns_mm: f64,
    pub columns_per_row: usize,
    pub qr_size_mm: f64,
    /// Round the label width down to whole millimetres
    pub whole_mm_width: bool,
    pub layout: LabelLayout,
}

impl PrinterProfile {
    /// 73 mm roll, 23 mm rows, two 33 x 21 mm labels per row
    pub const STANDARD: PrinterProfile = PrinterProfile {
        name: "Label Standar",
        paper_width_mm: 73.0,
        paper_height_per_row_mm: 23.0,
        margin_horizontal_mm: 2.0,
        margin_vertical_mm: 1.0,
        top_offset_mm: 0.0,
        left_offset_mm: 0.0,
        gap_between_columns_mm: 2.0,
        columns_per_row: 2,
        qr_size_mm: 12.0,
        whole_mm_width: true,
        layout: LabelLayout::NameAndQr,
    };

    /// 74 x 23 mm sheet, row padded `5mm 2mm 2mm 4mm`, two 32 x 16 mm labels,
    /// QR beside weight/purity
    pub const SMALL: PrinterProfile = PrinterProfile {
        name: "Label Kecil",
        paper_width_mm: 74.0,
        paper_height_per_row_mm: 23.0,
        margin_horizontal_mm: 2.0,
        margin_vertical_mm: 2.0,
        top_offset_mm: 3.0,
        left_offset_mm: 2.0,
        gap_between_columns_mm: 4.0,
        columns_per_row: 2,
        qr_size_mm: 12.0,
        whole_mm_width: false,
        layout: LabelLayout::QrBesideInfo,
    };

    /// 88 x 27 mm sheet, row padded `5mm 2mm 2mm 5mm`, two 23.5 x 20 mm
    /// labels, weight/purity over QR
    pub const LARGE: PrinterProfile = PrinterProfile {
        name: "Label Besar",
        paper_width_mm: 88.0,
        paper_height_per_row_mm: 27.0,
        margin_horizontal_mm: 2.0,
        margin_vertical_mm: 2.0,
        top_offset_mm: 3.0,
        left_offset_mm: 3.0,
        gap_between_columns_mm: 34.0,
        columns_per_row: 2,
        qr_size_mm: 12.0,
        whole_mm_width: false,
        layout: LabelLayout::InfoOverQr,
    };

    /// Row padding above the first label
    pub fn padding_top_mm(&self) -> f64 {
        self.margin_vertical_mm + self.top_offset_mm
    }

    /// Row padding left of the first label
    pub fn padding_left_mm(&self) -> f64 {
        self.margin_horizontal_mm + self.left_offset_mm
    }

    /// Derive the label geometry
    ///
    /// Fails when the margins and gap leave no room for a label.
    pub fn geometry(&self) -> PrintResult<LabelGeometry> {
        if self.columns_per_row == 0 {
            return Err(PrintError::InvalidProfile(format!(
                "{}: columns_per_row must be > 0",
                self.name
            )));
        }

        let usable = self.paper_width_mm
            - self.padding_left_mm()
            - self.margin_horizontal_mm
            - self.gap_between_columns_mm;
        let mut label_width_mm = usable / self.columns_per_row as f64;
        if self.whole_mm_width {
            label_width_mm = label_width_mm.floor();
        }
        let label_height_mm =
            self.paper_height_per_row_mm - self.padding_top_mm() - self.margin_vertical_mm;

        if label_width_mm <= 0.0 || label_height_mm <= 0.0 {
            return Err(PrintError::InvalidProfile(format!(
                "{}: label size {}x{}mm",
                self.name, label_width_mm, label_height_mm
            )));
        }

        Ok(LabelGeometry {
            profile: *self,
            label_width_mm,
            label_height_mm,
        })
    }
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Derived label dimensions
///
/// Computed once per profile; every renderer reads these values instead of
/// recomputing them per item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub profile: PrinterProfile,
    pub label_width_mm: f64,
    pub label_height_mm: f64,
}

impl LabelGeometry {
    /// Left edge of the second label in a row
    pub fn second_column_left_mm(&self) -> f64 {
        self.profile.padding_left_mm()
            + self.label_width_mm
            + self.profile.gap_between_columns_mm
    }

    /// Physical page length for `rows` rows
    pub fn page_height_mm(&self, rows: usize) -> f64 {
        rows as f64 * self.profile.paper_height_per_row_mm
    }

    /// QR edge length actually drawn on the label
    pub fn qr_edge_mm(&self) -> f64 {
        match self.profile.layout {
            LabelLayout::InfoOverQr => self.label_height_mm / 2.0 - 2.0,
            LabelLayout::NameAndQr | LabelLayout::QrBesideInfo => self.profile.qr_size_mm,
        }
    }

    pub fn preview_qr_px(&self) -> u32 {
        (self.profile.qr_size_mm * PREVIEW_PX_PER_MM).round() as u32
    }

    pub fn print_qr_px(&self) -> u32 {
        (self.profile.qr_size_mm * PRINT_PX_PER_MM).round() as u32
    }
}

/// Preset selector used by configuration and the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelProfileKind {
    #[default]
    Standard,
    Small,
    Large,
}

impl LabelProfileKind {
    pub fn profile(self) -> PrinterProfile {
        match self {
            Self::Standard => PrinterProfile::STANDARD,
            Self::Small => PrinterProfile::SMALL,
            Self::Large => PrinterProfile::LARGE,
        }
    }
}

impl fmt::Display for LabelProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Small => "small",
            Self::Large => "large",
        };
        f.write_str(s)
    }
}

impl FromStr for LabelProfileKind {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "small" | "kecil" => Ok(Self::Small),
            "large" | "besar" => Ok(Self::Large),
            other => Err(PrintError::InvalidProfile(format!(
                "unknown label profile: {}",
                other
            ))),
        }
    }
}

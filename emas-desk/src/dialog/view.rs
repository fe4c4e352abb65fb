//! Read-only snapshot of what the dialog shows

use super::state::{DialogState, LabelSource};
use emas_printer::{LabelGeometry, LabelGrid, LabelLayout, format_purity, format_weight};
use shared::PrintableStockItem;

pub const EMPTY_MESSAGE: &str = "Tidak ada stok tersedia untuk dicetak";

/// One label in the on-screen preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLabel {
    pub stock_id: i64,
    /// Text lines beside the QR canvas
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogView {
    pub title: String,
    /// `Label Kecil`, `Label Besar`, ...
    pub profile_name: &'static str,
    pub item_count: usize,
    pub paper_caption: String,
    pub label_caption: String,
    /// Shown whenever the list is non-empty
    pub printed_badge: Option<String>,
    /// Shown only when some items are not printed yet
    pub unprinted_badge: Option<String>,
    pub print_button: String,
    pub print_enabled: bool,
    pub loading: bool,
    pub empty_message: Option<&'static str>,
    /// Preview grid, one entry per paper row
    pub rows: Vec<Vec<PreviewLabel>>,
}

impl DialogView {
    pub(crate) fn build(
        source: Option<&LabelSource>,
        items: &[PrintableStockItem],
        geometry: &LabelGeometry,
        state: DialogState,
    ) -> Self {
        let profile = &geometry.profile;
        let count = items.len();
        let printed = items.iter().filter(|i| i.already_printed).count();
        let unprinted = count - printed;
        let loading = state == DialogState::Loading;
        let printing = state.is_busy();

        let title = match source {
            Some(LabelSource::Box { name, .. }) => {
                let name = name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Box");
                format!("Cetak Label - {}", name)
            }
            _ => format!("Cetak Label ({} item)", count),
        };

        let rows = LabelGrid::new(items, profile.columns_per_row)
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|item| PreviewLabel {
                        stock_id: item.id,
                        lines: preview_lines(profile.layout, item),
                    })
                    .collect()
            })
            .collect();

        Self {
            title,
            profile_name: profile.name,
            item_count: count,
            paper_caption: format!(
                "Kertas {}x{}mm",
                profile.paper_width_mm, profile.paper_height_per_row_mm
            ),
            label_caption: format!(
                "Label {:.0}x{}mm",
                geometry.label_width_mm.round(),
                geometry.label_height_mm
            ),
            printed_badge: (count > 0).then(|| format!("{} sudah cetak", printed)),
            unprinted_badge: (count > 0 && unprinted > 0)
                .then(|| format!("{} belum cetak", unprinted)),
            print_button: if printing {
                "Mencetak...".to_string()
            } else {
                format!("Cetak ({} Label)", count)
            },
            print_enabled: !(loading || printing || count == 0),
            loading,
            empty_message: (!loading && count == 0).then_some(EMPTY_MESSAGE),
            rows,
        }
    }
}

fn preview_lines(layout: LabelLayout, item: &PrintableStockItem) -> Vec<String> {
    match layout {
        LabelLayout::NameAndQr => vec![item.product_name.clone()],
        LabelLayout::QrBesideInfo | LabelLayout::InfoOverQr => vec![
            format_weight(item.weight_or_zero()),
            format_purity(item.purity_or_zero()),
        ],
    }
}

//! Barcode label print dialog
//!
//! Loads the stock to label (a whole box or a caller selection), keeps the
//! QR preview painted, prints the label sheet through a fresh hidden frame
//! and, once printing finishes, offers to mark the stock as printed.
//!
//! Methods take `&mut self`, so a dialog never runs two jobs at once.

mod state;
mod view;

pub use state::{DialogState, LabelSource, PrintOutcome};
pub use view::{DialogView, EMPTY_MESSAGE, PreviewLabel};

use crate::ui::{OperatorUi, Toast};
use emas_client::StockProvider;
use emas_printer::{
    FrameHost, LabelGeometry, LabelProfileKind, PreviewReport, PreviewSurface, PrintFrame,
    PrintResult, Settle, SettlePoint, build_label_sheet, encode_print_images, paint_preview,
};
use shared::PrintableStockItem;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const LOAD_FAILED: &str = "Gagal memuat data stok.";
pub const MARK_FAILED: &str = "Gagal menandai stok sudah dicetak.";
pub const CONFIRM_MARK: &str = "Tandai stok sebagai sudah dicetak?";

/// Called after stock was successfully marked printed
pub type PrintCompleteCallback = Arc<dyn Fn() + Send + Sync>;

pub struct LabelPrintDialog {
    provider: Arc<dyn StockProvider>,
    frames: Arc<dyn FrameHost>,
    ui: Arc<dyn OperatorUi>,
    settle: Arc<dyn Settle>,
    profile_kind: LabelProfileKind,
    geometry: LabelGeometry,
    state: DialogState,
    source: Option<LabelSource>,
    items: Vec<PrintableStockItem>,
    on_print_complete: Option<PrintCompleteCallback>,
}

impl LabelPrintDialog {
    pub fn new(
        provider: Arc<dyn StockProvider>,
        frames: Arc<dyn FrameHost>,
        ui: Arc<dyn OperatorUi>,
        settle: Arc<dyn Settle>,
        profile_kind: LabelProfileKind,
    ) -> PrintResult<Self> {
        Ok(Self {
            provider,
            frames,
            ui,
            settle,
            profile_kind,
            geometry: profile_kind.profile().geometry()?,
            state: DialogState::Idle,
            source: None,
            items: Vec::new(),
            on_print_complete: None,
        })
    }

    pub fn with_on_print_complete(mut self, callback: PrintCompleteCallback) -> Self {
        self.on_print_complete = Some(callback);
        self
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn items(&self) -> &[PrintableStockItem] {
        &self.items
    }

    pub fn profile_kind(&self) -> LabelProfileKind {
        self.profile_kind
    }

    pub fn geometry(&self) -> &LabelGeometry {
        &self.geometry
    }

    pub fn view(&self) -> DialogView {
        DialogView::build(self.source.as_ref(), &self.items, &self.geometry, self.state)
    }

    /// Open the dialog for `source` and paint the preview
    ///
    /// A failed box fetch is reported to the operator and leaves the dialog
    /// open with an empty list.
    #[instrument(skip_all, fields(box_source = source.is_box()))]
    pub async fn open(
        &mut self,
        source: LabelSource,
        surface: &mut dyn PreviewSurface,
    ) -> PreviewReport {
        self.state = DialogState::Loading;
        self.items.clear();

        self.items = match &source {
            LabelSource::Box { id, .. } => self.load_box(*id).await,
            LabelSource::Selected(items) => items.clone(),
        };
        self.source = Some(source);
        self.state = DialogState::Ready;
        info!(count = self.items.len(), "Label dialog ready");

        surface.mount(&self.items);
        self.settle.wait(SettlePoint::InitialPaint).await;
        paint_preview(&self.items, &self.geometry, surface)
    }

    async fn load_box(&self, box_id: i64) -> Vec<PrintableStockItem> {
        match self.provider.box_items(box_id).await {
            Ok(records) => records.iter().map(PrintableStockItem::from).collect(),
            Err(e) => {
                error!(box_id, error = %e, "Failed to load box stock");
                let message = e.server_message().unwrap_or_else(|| LOAD_FAILED.to_string());
                self.ui.toast(Toast::error(message));
                Vec::new()
            }
        }
    }

    /// Switch label mode and repaint the preview
    pub async fn set_profile(
        &mut self,
        kind: LabelProfileKind,
        surface: &mut dyn PreviewSurface,
    ) -> PrintResult<PreviewReport> {
        self.geometry = kind.profile().geometry()?;
        self.profile_kind = kind;
        debug!(profile = %kind, "Label profile changed");

        if self.items.is_empty() {
            return Ok(PreviewReport::default());
        }
        surface.mount(&self.items);
        self.settle.wait(SettlePoint::PreviewPaint).await;
        Ok(paint_preview(&self.items, &self.geometry, surface))
    }

    /// Print every loaded label, then offer to mark the stock printed
    #[instrument(skip(self), fields(count = self.items.len(), profile = %self.profile_kind))]
    pub async fn print(&mut self) -> PrintOutcome {
        if self.state != DialogState::Ready || self.items.is_empty() {
            debug!(state = ?self.state, "Print skipped");
            return PrintOutcome::Skipped;
        }
        self.state = DialogState::Printing;

        let images = encode_print_images(&self.items, &self.geometry);
        let html = build_label_sheet(&self.geometry, &self.items, &images);

        let Some(mut frame) = self.frames.create_frame() else {
            warn!("Print frame unavailable");
            self.state = DialogState::Ready;
            return PrintOutcome::FrameUnavailable;
        };

        if let Err(e) = frame.write_document(&html) {
            error!(error = %e, "Failed to write label sheet");
            return self.abort(frame, e.to_string()).await;
        }

        self.settle.wait(SettlePoint::LabelImages).await;
        if let Err(e) = frame.print().await {
            error!(error = %e, "Print error");
            return self.abort(frame, e.to_string()).await;
        }
        info!(labels = self.items.len(), "Label sheet printed");

        self.state = DialogState::Confirming;
        let marked = if self.ui.confirm(CONFIRM_MARK) {
            self.state = DialogState::Marking;
            self.mark_printed().await
        } else {
            false
        };

        self.teardown(frame).await;
        PrintOutcome::Printed { marked }
    }

    async fn mark_printed(&self) -> bool {
        let ids: Vec<i64> = self.items.iter().map(|i| i.id).collect();
        match self.provider.mark_printed(&ids).await {
            Ok(_) => {
                self.ui.toast(Toast::success(format!(
                    "{} stok ditandai sudah dicetak.",
                    ids.len()
                )));
                if let Some(callback) = &self.on_print_complete {
                    callback();
                }
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to mark stock printed");
                let message = e.server_message().unwrap_or_else(|| MARK_FAILED.to_string());
                self.ui.toast(Toast::error(message));
                false
            }
        }
    }

    async fn abort(&mut self, frame: Box<dyn PrintFrame>, reason: String) -> PrintOutcome {
        self.teardown(frame).await;
        PrintOutcome::Failed(reason)
    }

    async fn teardown(&mut self, frame: Box<dyn PrintFrame>) {
        self.settle.wait(SettlePoint::FrameTeardown).await;
        frame.remove();
        self.state = DialogState::Ready;
    }

    /// Close the dialog and drop the loaded list
    pub fn close(&mut self) {
        self.state = DialogState::Idle;
        self.source = None;
        self.items.clear();
    }
}

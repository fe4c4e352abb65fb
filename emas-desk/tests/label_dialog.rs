// emas-desk/tests/label_dialog.rs
// Label print dialog against in-memory collaborators

use async_trait::async_trait;
use emas_client::{ClientError, ClientResult, StockProvider};
use emas_desk::{
    DialogState, LabelPrintDialog, LabelSource, OperatorUi, PrintOutcome, Toast, ToastVariant,
};
use emas_printer::{
    FrameHost, ImmediateSettle, LabelProfileKind, PreviewSurface, PrintError, PrintFrame,
    PrintResult, RasterSurface, SettlePoint,
};
use shared::{GoldCategoryRef, MarkPrintedResponse, PrintableStockItem, ProductRef, StockRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ========== Fakes ==========

#[derive(Default)]
struct FakeProvider {
    records: Vec<StockRecord>,
    fail_load: Option<String>,
    fail_mark: bool,
    marked: Mutex<Vec<Vec<i64>>>,
}

#[async_trait]
impl StockProvider for FakeProvider {
    async fn box_items(&self, _box_id: i64) -> ClientResult<Vec<StockRecord>> {
        match &self.fail_load {
            Some(body) => Err(ClientError::Internal(body.clone())),
            None => Ok(self.records.clone()),
        }
    }

    async fn mark_printed(&self, stock_ids: &[i64]) -> ClientResult<MarkPrintedResponse> {
        self.marked.lock().unwrap().push(stock_ids.to_vec());
        if self.fail_mark {
            return Err(ClientError::Internal("gateway timeout".to_string()));
        }
        Ok(MarkPrintedResponse::default())
    }
}

#[derive(Default)]
struct FrameLog {
    created: AtomicUsize,
    removed: AtomicUsize,
    printed: AtomicUsize,
    documents: Mutex<Vec<String>>,
}

struct FakeFrameHost {
    available: bool,
    fail_print: bool,
    log: Arc<FrameLog>,
}

impl FakeFrameHost {
    fn new() -> Self {
        Self {
            available: true,
            fail_print: false,
            log: Arc::new(FrameLog::default()),
        }
    }
}

impl FrameHost for FakeFrameHost {
    fn create_frame(&self) -> Option<Box<dyn PrintFrame>> {
        if !self.available {
            return None;
        }
        self.log.created.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(FakeFrame {
            fail_print: self.fail_print,
            log: self.log.clone(),
        }))
    }
}

struct FakeFrame {
    fail_print: bool,
    log: Arc<FrameLog>,
}

#[async_trait]
impl PrintFrame for FakeFrame {
    fn write_document(&mut self, html: &str) -> PrintResult<()> {
        self.log.documents.lock().unwrap().push(html.to_string());
        Ok(())
    }

    async fn print(&mut self) -> PrintResult<()> {
        if self.fail_print {
            return Err(PrintError::Surface("printer offline".to_string()));
        }
        self.log.printed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(self: Box<Self>) {
        self.log.removed.fetch_add(1, Ordering::SeqCst);
    }
}

struct RecordingUi {
    answer: bool,
    toasts: Mutex<Vec<Toast>>,
    questions: Mutex<Vec<String>>,
}

impl RecordingUi {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            toasts: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
        }
    }

    fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl OperatorUi for RecordingUi {
    fn toast(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }

    fn confirm(&self, message: &str) -> bool {
        self.questions.lock().unwrap().push(message.to_string());
        self.answer
    }
}

// ========== Helpers ==========

fn record(id: i64, printed: bool) -> StockRecord {
    StockRecord {
        id,
        serial_number: format!("SN-{:04}", id),
        barcode_printed: printed,
        product: Some(ProductRef {
            name: format!("Cincin {}", id),
            weight: Some(2.5),
            gold_category: Some(GoldCategoryRef {
                code: Some("K18".to_string()),
                purity: Some(0.75),
                sell_price: 1_000_000.0,
            }),
        }),
    }
}

fn item(id: i64) -> PrintableStockItem {
    PrintableStockItem::from(record(id, false))
}

struct Harness {
    provider: Arc<FakeProvider>,
    frames: Arc<FakeFrameHost>,
    ui: Arc<RecordingUi>,
    settle: Arc<ImmediateSettle>,
    completed: Arc<AtomicUsize>,
}

impl Harness {
    fn new(provider: FakeProvider, frames: FakeFrameHost, answer: bool) -> Self {
        Self {
            provider: Arc::new(provider),
            frames: Arc::new(frames),
            ui: Arc::new(RecordingUi::new(answer)),
            settle: Arc::new(ImmediateSettle::new()),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn dialog(&self) -> LabelPrintDialog {
        let completed = self.completed.clone();
        LabelPrintDialog::new(
            self.provider.clone(),
            self.frames.clone(),
            self.ui.clone(),
            self.settle.clone(),
            LabelProfileKind::Standard,
        )
        .unwrap()
        .with_on_print_complete(Arc::new(move || {
            completed.fetch_add(1, Ordering::SeqCst);
        }))
    }
}

fn box_source() -> LabelSource {
    LabelSource::Box {
        id: 3,
        name: Some("Etalase A".to_string()),
    }
}

// ========== Tests ==========

#[tokio::test]
async fn test_box_view_counts_printed_items() {
    let provider = FakeProvider {
        records: vec![record(1, true), record(2, true), record(3, false)],
        ..Default::default()
    };
    let h = Harness::new(provider, FakeFrameHost::new(), false);
    let mut dialog = h.dialog();
    let mut surface = RasterSurface::new();

    let report = dialog.open(box_source(), &mut surface).await;
    let view = dialog.view();

    assert_eq!(dialog.state(), DialogState::Ready);
    assert_eq!(view.title, "Cetak Label - Etalase A");
    assert_eq!(view.printed_badge.as_deref(), Some("2 sudah cetak"));
    assert_eq!(view.unprinted_badge.as_deref(), Some("1 belum cetak"));
    assert_eq!(view.print_button, "Cetak (3 Label)");
    assert!(view.print_enabled);
    assert_eq!(report.painted, 3);
    assert!(!surface.get(3).unwrap().is_blank());
    assert_eq!(h.settle.points(), vec![SettlePoint::InitialPaint]);
}

#[tokio::test]
async fn test_load_failure_shows_server_message() {
    let provider = FakeProvider {
        fail_load: Some(r#"{"error":"Box tidak ditemukan"}"#.to_string()),
        ..Default::default()
    };
    let h = Harness::new(provider, FakeFrameHost::new(), false);
    let mut dialog = h.dialog();

    dialog.open(box_source(), &mut RasterSurface::new()).await;

    assert_eq!(dialog.state(), DialogState::Ready);
    assert!(dialog.items().is_empty());
    let toasts = h.ui.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    assert_eq!(toasts[0].description, "Box tidak ditemukan");
    assert!(!dialog.view().print_enabled);
}

#[tokio::test]
async fn test_load_failure_generic_message() {
    let provider = FakeProvider {
        fail_load: Some("bad gateway".to_string()),
        ..Default::default()
    };
    let h = Harness::new(provider, FakeFrameHost::new(), false);
    let mut dialog = h.dialog();

    dialog.open(box_source(), &mut RasterSurface::new()).await;
    assert_eq!(h.ui.toasts()[0].description, "Gagal memuat data stok.");
}

#[tokio::test]
async fn test_print_confirm_marks_all_items() {
    let provider = FakeProvider {
        records: vec![record(1, true), record(2, true), record(3, false)],
        ..Default::default()
    };
    let h = Harness::new(provider, FakeFrameHost::new(), true);
    let mut dialog = h.dialog();
    dialog.open(box_source(), &mut RasterSurface::new()).await;

    let outcome = dialog.print().await;

    assert_eq!(outcome, PrintOutcome::Printed { marked: true });
    assert_eq!(dialog.state(), DialogState::Ready);
    assert_eq!(*h.provider.marked.lock().unwrap(), vec![vec![1, 2, 3]]);
    assert_eq!(h.completed.load(Ordering::SeqCst), 1);

    let toasts = h.ui.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].variant, ToastVariant::Success);
    assert_eq!(toasts[0].description, "3 stok ditandai sudah dicetak.");
    assert_eq!(
        *h.ui.questions.lock().unwrap(),
        vec!["Tandai stok sebagai sudah dicetak?".to_string()]
    );

    let log = &h.frames.log;
    assert_eq!(log.created.load(Ordering::SeqCst), 1);
    assert_eq!(log.printed.load(Ordering::SeqCst), 1);
    assert_eq!(log.removed.load(Ordering::SeqCst), 1);
    let documents = log.documents.lock().unwrap();
    assert!(documents[0].contains("@page{size:73mm 46mm;margin:0}"));
    assert_eq!(documents[0].matches("<img ").count(), 3);

    assert_eq!(
        h.settle.points(),
        vec![
            SettlePoint::InitialPaint,
            SettlePoint::LabelImages,
            SettlePoint::FrameTeardown
        ]
    );
}

#[tokio::test]
async fn test_print_declined_does_not_mark() {
    let provider = FakeProvider {
        records: vec![record(1, false)],
        ..Default::default()
    };
    let h = Harness::new(provider, FakeFrameHost::new(), false);
    let mut dialog = h.dialog();
    dialog.open(box_source(), &mut RasterSurface::new()).await;

    let outcome = dialog.print().await;

    assert_eq!(outcome, PrintOutcome::Printed { marked: false });
    assert!(h.provider.marked.lock().unwrap().is_empty());
    assert_eq!(h.completed.load(Ordering::SeqCst), 0);
    assert!(h.ui.toasts().is_empty());
    assert_eq!(h.frames.log.removed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mark_failure_skips_callback() {
    let provider = FakeProvider {
        records: vec![record(1, false), record(2, false)],
        fail_mark: true,
        ..Default::default()
    };
    let h = Harness::new(provider, FakeFrameHost::new(), true);
    let mut dialog = h.dialog();
    dialog.open(box_source(), &mut RasterSurface::new()).await;

    let outcome = dialog.print().await;

    assert_eq!(outcome, PrintOutcome::Printed { marked: false });
    assert_eq!(h.completed.load(Ordering::SeqCst), 0);
    let toasts = h.ui.toasts();
    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    assert_eq!(toasts[0].description, "Gagal menandai stok sudah dicetak.");
    assert_eq!(h.frames.log.removed.load(Ordering::SeqCst), 1);
    assert_eq!(dialog.state(), DialogState::Ready);
}

#[tokio::test]
async fn test_frame_unavailable_resets_state() {
    let mut frames = FakeFrameHost::new();
    frames.available = false;
    let h = Harness::new(FakeProvider::default(), frames, true);
    let mut dialog = h.dialog();
    dialog
        .open(LabelSource::Selected(vec![item(1)]), &mut RasterSurface::new())
        .await;

    let outcome = dialog.print().await;

    assert_eq!(outcome, PrintOutcome::FrameUnavailable);
    assert_eq!(dialog.state(), DialogState::Ready);
    assert!(dialog.view().print_enabled);
    assert!(h.ui.questions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_print_error_removes_frame() {
    let mut frames = FakeFrameHost::new();
    frames.fail_print = true;
    let h = Harness::new(FakeProvider::default(), frames, true);
    let mut dialog = h.dialog();
    dialog
        .open(LabelSource::Selected(vec![item(1)]), &mut RasterSurface::new())
        .await;

    let outcome = dialog.print().await;

    assert!(matches!(outcome, PrintOutcome::Failed(_)));
    assert_eq!(h.frames.log.removed.load(Ordering::SeqCst), 1);
    assert_eq!(dialog.state(), DialogState::Ready);
    assert!(h.ui.questions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_list_skips_print() {
    let h = Harness::new(FakeProvider::default(), FakeFrameHost::new(), true);
    let mut dialog = h.dialog();
    dialog.open(box_source(), &mut RasterSurface::new()).await;

    assert_eq!(dialog.print().await, PrintOutcome::Skipped);
    assert_eq!(h.frames.log.created.load(Ordering::SeqCst), 0);
    assert_eq!(
        dialog.view().empty_message,
        Some("Tidak ada stok tersedia untuk dicetak")
    );
}

#[tokio::test]
async fn test_selected_source_uses_given_items() {
    let h = Harness::new(FakeProvider::default(), FakeFrameHost::new(), false);
    let mut dialog = h.dialog();
    let items = vec![item(7), item(8)];

    dialog
        .open(LabelSource::Selected(items.clone()), &mut RasterSurface::new())
        .await;

    assert_eq!(dialog.items(), items.as_slice());
    assert_eq!(dialog.view().title, "Cetak Label (2 item)");
}

#[tokio::test]
async fn test_set_profile_repaints_preview() {
    let h = Harness::new(FakeProvider::default(), FakeFrameHost::new(), false);
    let mut dialog = h.dialog();
    let mut surface = RasterSurface::new();
    dialog
        .open(LabelSource::Selected(vec![item(1), item(2)]), &mut surface)
        .await;

    let report = dialog
        .set_profile(LabelProfileKind::Large, &mut surface)
        .await
        .unwrap();

    assert_eq!(report.painted, 2);
    assert_eq!(dialog.profile_kind(), LabelProfileKind::Large);
    let px = dialog.geometry().preview_qr_px();
    assert_eq!(surface.get(1).unwrap().image().unwrap().width(), px);
    assert_eq!(dialog.view().label_caption, "Label 24x20mm");
    assert_eq!(
        h.settle.points(),
        vec![SettlePoint::InitialPaint, SettlePoint::PreviewPaint]
    );
}

#[tokio::test]
async fn test_missing_canvas_does_not_abort_preview() {
    struct PartialSurface(RasterSurface);

    impl PreviewSurface for PartialSurface {
        fn mount(&mut self, items: &[PrintableStockItem]) {
            self.0.mount(&items[..1]);
        }

        fn canvas(&mut self, stock_id: i64) -> Option<&mut dyn emas_printer::QrCanvas> {
            self.0.canvas(stock_id)
        }
    }

    let h = Harness::new(FakeProvider::default(), FakeFrameHost::new(), false);
    let mut dialog = h.dialog();
    let mut surface = PartialSurface(RasterSurface::new());

    let report = dialog
        .open(LabelSource::Selected(vec![item(1), item(2)]), &mut surface)
        .await;

    assert_eq!(report.painted, 1);
    assert_eq!(report.missing_canvas, 1);
}

#[tokio::test]
async fn test_close_clears_list() {
    let h = Harness::new(FakeProvider::default(), FakeFrameHost::new(), false);
    let mut dialog = h.dialog();
    dialog
        .open(LabelSource::Selected(vec![item(1)]), &mut RasterSurface::new())
        .await;

    dialog.close();

    assert_eq!(dialog.state(), DialogState::Idle);
    assert!(dialog.items().is_empty());
    assert_eq!(dialog.print().await, PrintOutcome::Skipped);
}

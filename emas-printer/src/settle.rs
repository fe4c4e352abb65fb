//! Settle waits between print-pipeline steps
//!
//! The label and receipt flows pause at fixed points so the rendering host
//! can lay out the document and decode images before the print command.
//! Waits are abstracted behind [`Settle`] so tests run without real time.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tracing::trace;

/// Named pause points in the print pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettlePoint {
    /// After a label mode switch, before repainting preview QR canvases
    PreviewPaint,
    /// After the first item load, before painting preview QR canvases
    InitialPaint,
    /// After the label document reports loaded, before printing
    LabelImages,
    /// Receipt window: fallback print when no load event arrives
    ReceiptFallback,
    /// After printing, before the frame is removed
    FrameTeardown,
}

/// Durations for every [`SettlePoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelays {
    pub preview_paint: Duration,
    pub initial_paint: Duration,
    pub label_images: Duration,
    pub receipt_fallback: Duration,
    pub frame_teardown: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            preview_paint: Duration::from_millis(50),
            initial_paint: Duration::from_millis(100),
            label_images: Duration::from_millis(500),
            receipt_fallback: Duration::from_millis(500),
            frame_teardown: Duration::from_millis(100),
        }
    }
}

impl SettleDelays {
    /// All points zero
    pub fn zero() -> Self {
        Self {
            preview_paint: Duration::ZERO,
            initial_paint: Duration::ZERO,
            label_images: Duration::ZERO,
            receipt_fallback: Duration::ZERO,
            frame_teardown: Duration::ZERO,
        }
    }

    pub fn get(&self, point: SettlePoint) -> Duration {
        match point {
            SettlePoint::PreviewPaint => self.preview_paint,
            SettlePoint::InitialPaint => self.initial_paint,
            SettlePoint::LabelImages => self.label_images,
            SettlePoint::ReceiptFallback => self.receipt_fallback,
            SettlePoint::FrameTeardown => self.frame_teardown,
        }
    }
}

#[async_trait]
pub trait Settle: Send + Sync {
    async fn wait(&self, point: SettlePoint);
}

/// Real waits backed by the tokio timer
#[derive(Debug, Clone, Default)]
pub struct TimerSettle {
    delays: SettleDelays,
}

impl TimerSettle {
    pub fn new(delays: SettleDelays) -> Self {
        Self { delays }
    }

    pub fn delays(&self) -> &SettleDelays {
        &self.delays
    }
}

#[async_trait]
impl Settle for TimerSettle {
    async fn wait(&self, point: SettlePoint) {
        let delay = self.delays.get(point);
        trace!(?point, delay_ms = delay.as_millis() as u64, "settle");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Returns at once and records the points it was asked to wait at
#[derive(Debug, Default)]
pub struct ImmediateSettle {
    points: Mutex<Vec<SettlePoint>>,
}

impl ImmediateSettle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points waited at so far, in order
    pub fn points(&self) -> Vec<SettlePoint> {
        self.points
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Settle for ImmediateSettle {
    async fn wait(&self, point: SettlePoint) {
        if let Ok(mut points) = self.points.lock() {
            points.push(point);
        }
    }
}

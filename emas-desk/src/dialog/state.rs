//! Dialog inputs, lifecycle and outcomes

use shared::PrintableStockItem;

/// Where the dialog's labels come from
#[derive(Debug, Clone, PartialEq)]
pub enum LabelSource {
    /// Every stock item currently stored in a box, fetched on open
    Box { id: i64, name: Option<String> },
    /// Items chosen by the caller, used as given
    Selected(Vec<PrintableStockItem>),
}

impl LabelSource {
    pub fn is_box(&self) -> bool {
        matches!(self, Self::Box { .. })
    }
}

/// Dialog lifecycle
///
/// ```text
/// Idle -> Loading -> Ready -> Printing -> Confirming -> Marking -> Ready
///                      ^         |             |
///                      +---------+-------------+   (frame missing, declined)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Idle,
    Loading,
    Ready,
    Printing,
    Confirming,
    Marking,
}

impl DialogState {
    /// A print job or its follow-up is running
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Printing | Self::Confirming | Self::Marking)
    }
}

/// Result of one print request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// Nothing to print, still loading, or a job already running
    Skipped,
    /// The print frame could not be created
    FrameUnavailable,
    /// The surface rejected the document or the print call
    Failed(String),
    /// Printed; `marked` when the operator confirmed and the backend accepted
    Printed { marked: bool },
}

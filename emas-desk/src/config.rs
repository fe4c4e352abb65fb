//! Command line and environment configuration
//!
//! Every option can come from a flag or an environment variable; `.env` is
//! loaded before parsing.

use crate::logging::LogOptions;
use clap::{Args, Parser, Subcommand};
use emas_client::ClientConfig;
use emas_client::config::DEFAULT_BASE_URL;
use emas_printer::{LabelProfileKind, SettleDelays};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "emas-desk", version, about = "Cetak label barcode dan struk toko emas")]
pub struct Cli {
    #[command(flatten)]
    pub config: DeskConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct DeskConfig {
    /// Backend API root
    #[arg(long, env = "EMAS_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Bearer token for the backend
    #[arg(long, env = "EMAS_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "EMAS_API_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub api_timeout: u64,

    /// Log filter, e.g. `info,emas_desk=debug`
    #[arg(long, env = "EMAS_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Directory for daily log files
    #[arg(long, env = "EMAS_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// JSON log lines
    #[arg(long, env = "EMAS_LOG_JSON", global = true)]
    pub log_json: bool,

    /// Label profile: standard, small (kecil) or large (besar)
    #[arg(long, env = "EMAS_LABEL_PROFILE", default_value_t = LabelProfileKind::Standard, global = true)]
    pub profile: LabelProfileKind,

    /// Where print jobs are written
    #[arg(long, env = "EMAS_SPOOL_DIR", default_value = "spool", global = true)]
    pub spool_dir: PathBuf,

    /// Wait before printing labels, in milliseconds
    #[arg(long, env = "EMAS_LABEL_SETTLE_MS", global = true)]
    pub label_settle_ms: Option<u64>,

    /// Fallback receipt print delay, in milliseconds
    #[arg(long, env = "EMAS_RECEIPT_SETTLE_MS", global = true)]
    pub receipt_settle_ms: Option<u64>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print barcode labels
    Labels(LabelsArgs),
    /// Print a receipt
    Receipt(ReceiptArgs),
}

#[derive(Debug, Clone, Args)]
pub struct LabelsArgs {
    /// Print every item stored in this box
    #[arg(long = "box", value_name = "ID", conflicts_with = "selected", required_unless_present = "selected")]
    pub box_id: Option<i64>,

    /// Box name shown in the title
    #[arg(long, requires = "box_id")]
    pub box_name: Option<String>,

    /// JSON file with the selected items
    #[arg(long, value_name = "FILE")]
    pub selected: Option<PathBuf>,

    /// Save the QR preview as PNG files here
    #[arg(long, value_name = "DIR")]
    pub preview_dir: Option<PathBuf>,

    /// Mark items as printed without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReceiptArgs {
    /// JSON receipt document
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: PathBuf,
}

impl DeskConfig {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.api_url).with_timeout(self.api_timeout);
        if let Some(token) = self.api_token.as_deref().filter(|t| !t.is_empty()) {
            config = config.with_token(token);
        }
        config
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            level: self.log_level.clone(),
            dir: self.log_dir.clone(),
            json: self.log_json,
        }
    }

    pub fn settle_delays(&self) -> SettleDelays {
        let mut delays = SettleDelays::default();
        if let Some(ms) = self.label_settle_ms {
            delays.label_images = Duration::from_millis(ms);
        }
        if let Some(ms) = self.receipt_settle_ms {
            delays.receipt_fallback = Duration::from_millis(ms);
        }
        delays
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use emas_desk::config::{LabelsArgs, ReceiptArgs};
use emas_desk::{
    Cli, Command, ConsoleUi, DeskConfig, LabelPrintDialog, LabelSource, PrintOutcome,
    ReceiptPrintOutcome, SpoolFrameHost, SpoolPopupHost, print_receipt,
};
use emas_printer::{RasterSurface, Settle, TimerSettle};
use shared::{PrintableStockItem, ReceiptDocument};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Environment (.env) before parsing so clap sees it
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // 2. Logging
    let _log_guard = emas_desk::logging::init_logger(&cli.config.log_options())?;
    info!(version = env!("CARGO_PKG_VERSION"), "emas-desk starting");

    let settle: Arc<dyn Settle> = Arc::new(TimerSettle::new(cli.config.settle_delays()));

    // 3. Run
    match &cli.command {
        Command::Labels(args) => run_labels(&cli.config, args, settle).await,
        Command::Receipt(args) => run_receipt(&cli.config, args, settle).await,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

async fn run_labels(config: &DeskConfig, args: &LabelsArgs, settle: Arc<dyn Settle>) -> Result<()> {
    let provider = Arc::new(config.client_config().build_http_client()?);
    let frames = Arc::new(SpoolFrameHost::new(&config.spool_dir)?);
    let ui = Arc::new(ConsoleUi::new(args.yes));

    let source = match (&args.box_id, &args.selected) {
        (Some(id), _) => LabelSource::Box {
            id: *id,
            name: args.box_name.clone(),
        },
        (None, Some(path)) => LabelSource::Selected(read_json::<Vec<PrintableStockItem>>(path)?),
        (None, None) => anyhow::bail!("either --box or --selected is required"),
    };

    let mut dialog = LabelPrintDialog::new(provider, frames, ui, settle, config.profile)?
        .with_on_print_complete(Arc::new(|| info!("Stock list refresh requested")));

    let mut surface = RasterSurface::new();
    let report = dialog.open(source, &mut surface).await;

    let view = dialog.view();
    println!("{}", view.title);
    println!(
        "{} item • {} • {}",
        view.item_count, view.paper_caption, view.label_caption
    );
    if let Some(badge) = &view.printed_badge {
        match &view.unprinted_badge {
            Some(unprinted) => println!("{} • {}", badge, unprinted),
            None => println!("{}", badge),
        }
    }
    if let Some(message) = view.empty_message {
        println!("{}", message);
    }

    if let Some(dir) = &args.preview_dir {
        let saved = surface.save_png(dir)?;
        info!(saved, failed = report.failed, dir = %dir.display(), "Preview saved");
    } else if surface.is_empty() && !dialog.items().is_empty() {
        warn!("Preview surface has no canvases");
    }

    if !view.print_enabled {
        dialog.close();
        return Ok(());
    }

    println!("{}", view.print_button);
    let outcome = dialog.print().await;
    dialog.close();

    match outcome {
        PrintOutcome::Printed { marked } => {
            info!(marked, spool = %config.spool_dir.display(), "Labels printed");
            Ok(())
        }
        PrintOutcome::Skipped => Ok(()),
        PrintOutcome::FrameUnavailable => {
            anyhow::bail!("print frame unavailable in {}", config.spool_dir.display())
        }
        PrintOutcome::Failed(reason) => anyhow::bail!("label print failed: {}", reason),
    }
}

async fn run_receipt(config: &DeskConfig, args: &ReceiptArgs, settle: Arc<dyn Settle>) -> Result<()> {
    let doc: ReceiptDocument = read_json(&args.input)?;
    let host = SpoolPopupHost::new(&config.spool_dir)?;

    match print_receipt(&doc, &host, settle.as_ref()).await? {
        ReceiptPrintOutcome::Printed => {
            println!("Struk {} dicetak", doc.transaction_code);
        }
        ReceiptPrintOutcome::PopupBlocked => {
            warn!("Receipt window blocked, nothing printed");
        }
    }
    Ok(())
}

//! `parkval-sync` -- pushes spreadsheet form responses to the validation store.
//!
//! # Environment variables
//!
//! | Variable             | Required       | Default             | Description                      |
//! |----------------------|----------------|---------------------|----------------------------------|
//! | `FIREBASE_URL`       | yes (not dry)  | --                  | Realtime database URL            |
//! | `FIREBASE_SECRET`    | no             | --                  | Database secret (`auth` param)   |
//! | `STORE_ROOT`         | no             | `parkingValidation` | Root node of the document        |
//! | `SHEET_PATH`         | sync / init    | --                  | Spreadsheet file                 |
//! | `SHEET_NAME`         | no             | `ValidationsTab`    | Worksheet name                   |
//! | `SYNC_SOURCE`        | no             | `google-sheets`     | `metadata.source` tag            |
//!
//! Flags override the environment.

use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parkval_store::{MemoryStore, RestStore, StoreConfig, ValidationStore};
use parkval_sync::cli::{Cli, Commands, SheetArgs};
use parkval_sync::report::IssueReport;
use parkval_sync::SyncOutcome;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkval_sync=info,parkval_sheets=info,parkval_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "parkval-sync failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let vocab = cli
        .vocabulary
        .vocabulary()
        .context("Invalid status vocabulary")?;

    match cli.command {
        Commands::Sync(args) => {
            let store = store_for(&args)?;
            let outcome = parkval_sync::sync_sheet(
                &args.sheet_source(),
                store.as_ref(),
                &vocab,
                &args.options(),
                Utc::now(),
            )
            .await?;
            log_outcome(&outcome);
        }
        Commands::Init(args) => {
            let store = store_for(&args)?;
            let outcome = parkval_sync::init(
                &args.sheet_source(),
                store.as_ref(),
                &vocab,
                &args.options(),
                Utc::now(),
            )
            .await?;
            log_outcome(&outcome);
        }
        Commands::Check => {
            parkval_sync::check(&remote_store()?).await?;
        }
        Commands::Scan => {
            let scan = parkval_sync::scan_store(&remote_store()?, &vocab).await?;
            print!("{}", IssueReport(&scan));
        }
    }

    Ok(())
}

fn remote_store() -> anyhow::Result<RestStore> {
    let config = StoreConfig::from_env().context("Invalid store configuration")?;
    tracing::debug!(?config, "Loaded store configuration");
    Ok(RestStore::new(config)?)
}

/// Dry runs never touch the remote store, so they need no store config.
fn store_for(args: &SheetArgs) -> anyhow::Result<Box<dyn ValidationStore>> {
    if args.dry_run {
        Ok(Box::new(MemoryStore::new()))
    } else {
        Ok(Box::new(remote_store()?))
    }
}

fn log_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::NoData => {}
        SyncOutcome::DryRun { document, cleanup } => {
            tracing::info!(
                total_records = document.metadata.total_records,
                removed = cleanup.map(|c| c.removed_count),
                "Dry run complete, nothing written"
            );
        }
        SyncOutcome::Written {
            total_records,
            cleanup,
        } => {
            tracing::info!(
                total_records,
                removed = cleanup.map(|c| c.removed_count),
                "Store updated"
            );
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! catchfac operator tools.
//!
//! ```bash
//! # Seed the built-in sample sellers (or a file produced by export-sellers)
//! catchfac-admin seed-sellers [--file sellers.json] [--dry-run]
//!
//! # Write the built-in sample sellers to JSON
//! catchfac-admin export-sellers --out sample-sellers.json
//!
//! # Grant admin rights
//! catchfac-admin set-admin ops@example.com
//!
//! # Check the frontend image directory
//! catchfac-admin check-assets --dir public/images
//! ```

use catchfac::db::FirestoreDb;
use catchfac::ops;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catchfac-admin")]
#[command(author, version, about = "catchfac operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write seller profiles to Firestore
    SeedSellers {
        /// GCP project holding the Firestore database
        #[arg(long, env = "GCP_PROJECT_ID")]
        project: String,

        /// Seller file to load instead of the built-in samples
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Log what would be written without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Export the built-in sample sellers as JSON
    ExportSellers {
        #[arg(short, long, default_value = "sample-sellers.json")]
        out: PathBuf,
    },
    /// Grant the admin flag to a registered user
    SetAdmin {
        #[arg(long, env = "GCP_PROJECT_ID")]
        project: String,

        /// E-mail address of the user
        email: String,
    },
    /// Report which frontend images are present
    CheckAssets {
        #[arg(short, long, default_value = "public/images")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::SeedSellers {
            project,
            file,
            dry_run,
        } => {
            let db = FirestoreDb::new(&project).await?;
            let report = ops::seed_sellers(&db, file.as_deref(), dry_run).await?;
            tracing::info!(
                written = report.written,
                premium = report.premium,
                dry_run,
                "Seller seeding finished"
            );
        }
        Commands::ExportSellers { out } => {
            let count = ops::export_sellers(&out)?;
            tracing::info!(count, path = %out.display(), "Exported sellers");
        }
        Commands::SetAdmin { project, email } => {
            let db = FirestoreDb::new(&project).await?;
            let updated = ops::set_admin(&db, &email).await?;
            tracing::info!(%email, updated, "Admin flag applied");
        }
        Commands::CheckAssets { dir } => {
            let report = ops::check_assets(&dir)?;
            for name in &report.missing {
                tracing::warn!(file = *name, "Missing image");
            }
            tracing::info!(
                present = report.present.len(),
                missing = report.missing.len(),
                "Asset check finished"
            );
        }
    }
    Ok(())
}

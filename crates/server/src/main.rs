// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod extract;
mod import;
mod routes;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::{Parser, Subcommand};
use hotel_desk_persistence::Persistence;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::import::{ImportFiles, ImportSummary, run_import};
use crate::routes::{AppState, build_router};

/// Hotel Desk Server - HTTP API and CSV import tool for the hotel desk system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Path to the `SQLite` database file. If not provided, uses in-memory database.
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Port to bind the server to
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Load rooms, guests and bookings from CSV files, in that order.
    Import {
        /// Path to the `SQLite` database file.
        #[arg(short, long)]
        database: PathBuf,

        #[arg(long)]
        rooms: Option<PathBuf>,

        #[arg(long)]
        guests: Option<PathBuf>,

        #[arg(long)]
        bookings: Option<PathBuf>,

        /// Validate the files and report per-row results without writing.
        #[arg(long)]
        preview: bool,
    },
}

fn open_persistence(
    database: Option<&Path>,
) -> Result<Persistence, Box<dyn std::error::Error>> {
    let persistence: Persistence = if let Some(db_path) = database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence)
}

async fn serve(database: Option<&Path>, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    info!("Initializing Hotel Desk Server");

    let persistence: Persistence = open_persistence(database)?;
    let app: Router = build_router(AppState::new(persistence));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{port}").parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match args.command {
        Command::Serve { database, port } => serve(database.as_deref(), port).await,
        Command::Import {
            database,
            rooms,
            guests,
            bookings,
            preview,
        } => {
            let mut persistence: Persistence = open_persistence(Some(database.as_path()))?;
            let files: ImportFiles = ImportFiles {
                rooms,
                guests,
                bookings,
            };
            let summaries: Vec<ImportSummary> = run_import(&mut persistence, &files, preview)?;
            let rejected: usize = summaries.iter().map(|s| s.rejected).sum();
            if rejected > 0 {
                warn!(rejected, "Some rows were not accepted");
            }
            Ok(())
        }
    }
}

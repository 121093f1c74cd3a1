// ABOUTME: Vitalcoach CLI - computes analytics views from a JSON record fixture
// ABOUTME: Prints client metrics, client sections, or a doctor dashboard as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Metrics and visible sections of one client for the current week
//! vitalcoach-cli client --fixture demo.json --client c-001 --period week
//!
//! # Include hidden sections, pinned to a reference time
//! vitalcoach-cli client --fixture demo.json --client c-001 --all-sections \
//!     --now 2025-03-07T12:00:00Z
//!
//! # Caseload rollup of a doctor for a custom range
//! vitalcoach-cli dashboard --fixture demo.json --doctor d-001 \
//!     --period custom:2025-03-01T00:00:00Z/2025-03-15T00:00:00Z
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use vitalcoach::config::ServerConfig;
use vitalcoach::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "vitalcoach-cli",
    about = "Vitalcoach analytics CLI",
    long_about = "Computes client progress metrics, detail sections, and doctor dashboards from a JSON fixture of raw records."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show one client's metrics and detail sections
    Client {
        /// Fixture file with the raw records
        #[arg(long)]
        fixture: PathBuf,

        /// Client identifier
        #[arg(long)]
        client: String,

        /// Chart period (day, week, month, custom:<start>/<end>)
        #[arg(long)]
        period: Option<String>,

        /// Reference time in RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Also print sections that have no content
        #[arg(long)]
        all_sections: bool,
    },

    /// Show a doctor's caseload rollup
    Dashboard {
        /// Fixture file with the raw records
        #[arg(long)]
        fixture: PathBuf,

        /// Doctor identifier
        #[arg(long)]
        doctor: String,

        /// Chart period (day, week, month, custom:<start>/<end>)
        #[arg(long)]
        period: Option<String>,

        /// Reference time in RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let config = ServerConfig::from_env()?;
    info!("{}", config.summary());

    match cli.command {
        Command::Client {
            fixture,
            client,
            period,
            now,
            all_sections,
        } => commands::client::show(
            &config,
            &commands::ViewArgs {
                fixture,
                period,
                now,
            },
            &client,
            all_sections,
        ),
        Command::Dashboard {
            fixture,
            doctor,
            period,
            now,
        } => commands::dashboard::show(
            &config,
            &commands::ViewArgs {
                fixture,
                period,
                now,
            },
            &doctor,
        ),
    }
}

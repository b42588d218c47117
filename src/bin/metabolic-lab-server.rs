// ABOUTME: Server binary for the metabolic lab HTTP API
// ABOUTME: Parses CLI overrides, initializes logging and configuration, then serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metabolic Lab Server Binary

use anyhow::Result;
use clap::Parser;
use metabolic_lab_server::{config::ServerConfig, logging, server};
use tracing::info;

#[derive(Parser)]
#[command(name = "metabolic-lab-server")]
#[command(about = "Resting metabolic rate and body composition API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }

    info!("Starting metabolic lab server");
    info!("{}", config.summary());

    server::serve(config).await
}

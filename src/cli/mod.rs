//! CLI module for the user service
//!
//! - `serve`: run the HTTP API (default)
//! - `check-config`: print the effective configuration and exit

pub mod check_config;
pub mod serve;

use clap::{Parser, Subcommand};

/// User Service - REST API for user records
#[derive(Parser)]
#[command(name = "user-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),

    /// Load configuration, print it with secrets masked, and exit
    CheckConfig,
}

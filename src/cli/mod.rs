//! CLI module - Command-line interface for drug-pricing
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// drug-pricing - Drug identity, price quotes and generic alternatives
#[derive(Parser)]
#[command(name = "drug-pricing")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Look up a drug's identity
    #[command(alias = "s")]
    Search {
        /// Drug name
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Show plan and pharmacy price quotes for a drug
    #[command(alias = "p")]
    Pricing {
        /// Drug name
        name: String,
        /// 5-digit ZIP code
        zip_code: String,
    },

    /// Suggest generic alternatives for a drug
    #[command(alias = "alt")]
    Alternatives {
        /// Drug name
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;

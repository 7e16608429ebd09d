// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the ferret command-line interface.
//!
//! Three subcommands: `build` to turn a documentation corpus into an index
//! file, `inspect` to examine one, and `search` to query one from the
//! terminal the way a site's front-end would.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ferret",
    about = "Offline search index builder for documentation sites",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search index from a directory of document JSON files
    Build {
        /// Input directory containing manifest.json and document files
        #[arg(short, long)]
        input: String,

        /// Output directory for the searchindex file
        #[arg(short, long)]
        output: String,
    },

    /// Inspect a searchindex file's structure and transport size
    Inspect {
        /// Path to searchindex JSON file
        file: String,
    },

    /// Search a searchindex file and display ranked results
    Search {
        /// Path to searchindex JSON file
        file: String,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use ferret::build::run_build;
use ferret::{decode, search, SearchIndex, Tokenizer};

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { input, output } => run_build(&input, &output).map(|_| ()),
        Commands::Inspect { file } => inspect_file(&file),
        Commands::Search { file, query, limit } => run_search(&file, &query, limit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load and validate an index file, keeping the raw payload around for
/// size reporting.
fn load_index(path: &str) -> Result<(String, SearchIndex), String> {
    let payload = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let index = decode(&payload).map_err(|e| format!("Failed to load {}: {}", path, e))?;
    Ok((payload, index))
}

fn inspect_file(path: &str) -> Result<(), String> {
    let (payload, index) = load_index(path)?;
    let brotli_len = brotli_size(payload.as_bytes())?;
    display::print_inspect(&index, payload.len(), brotli_len);
    Ok(())
}

/// Compressed transport size: what the index actually costs over the wire
/// when the web server applies brotli.
fn brotli_size(bytes: &[u8]) -> Result<usize, String> {
    let mut compressed = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut compressed, 4096, 5, 22);
        writer
            .write_all(bytes)
            .map_err(|e| format!("Brotli compression failed: {}", e))?;
    }
    Ok(compressed.len())
}

fn run_search(path: &str, query: &str, limit: usize) -> Result<(), String> {
    let (_, index) = load_index(path)?;
    let results = search(&index, &Tokenizer::default(), query, Some(limit));
    display::print_results(&index, &results);
    Ok(())
}

//! The site-build pipeline: manifest in, index file out.
//!
//! Reads `manifest.json` plus per-document JSON files from an input
//! directory, builds the index, and writes a content-hash-named
//! `searchindex-{crc32}.json` to the output directory so deployments get
//! cache-busting for free.

pub mod document;
pub mod manifest;
pub mod parallel;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

pub use document::*;
pub use manifest::*;
pub use parallel::*;

use crate::catalog::ObjectTypeCatalog;
use crate::tokenize::Tokenizer;

/// Create a progress style for the build progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap()
    .progress_chars("━━╸")
}

/// Run the whole pipeline. Returns the path of the written index file.
///
/// Build-time errors are fatal by design: a corpus bug gets fixed
/// upstream, never papered over with a partial index.
pub fn run_build(input_dir: &str, output_dir: &str) -> Result<PathBuf, String> {
    let input_path = Path::new(input_dir);
    let output_path = Path::new(output_dir);

    // 1. Read manifest
    let manifest_path = input_path.join("manifest.json");
    let manifest_content = fs::read_to_string(&manifest_path)
        .map_err(|e| format!("Failed to read manifest: {}", e))?;
    let manifest: InputManifest = serde_json::from_str(&manifest_content)
        .map_err(|e| format!("Invalid manifest JSON: {}", e))?;
    if manifest.version != MANIFEST_VERSION {
        return Err(format!(
            "Unsupported manifest version {} (expected {})",
            manifest.version, MANIFEST_VERSION
        ));
    }

    // 2. Load documents with a progress bar
    #[cfg(feature = "parallel")]
    let load_pb = ProgressBar::new(manifest.documents.len() as u64);
    #[cfg(feature = "parallel")]
    {
        load_pb.set_style(create_progress_style());
        load_pb.set_prefix("Loading");
        load_pb.set_message("documents...");
    }

    #[cfg(feature = "parallel")]
    let documents = load_documents_with_progress(input_path, &manifest, &load_pb)?;
    #[cfg(not(feature = "parallel"))]
    let documents = load_documents(input_path, &manifest)?;

    #[cfg(feature = "parallel")]
    load_pb.finish_with_message(format!("loaded {} documents", documents.len()));

    // 3. Assemble sources + catalog and build
    let (sources, catalog) = assemble(&documents)?;
    let types = if manifest.object_types.is_empty() {
        ObjectTypeCatalog::standard()
    } else {
        ObjectTypeCatalog::from_types(manifest.object_types.clone())
    };
    let built = build_payload(&sources, &catalog, &types, &Tokenizer::default())?;

    // 4. Write the index under its content hash
    fs::create_dir_all(output_path).map_err(|e| format!("Failed to create output dir: {}", e))?;

    let hash = crc32fast::hash(built.payload.as_bytes());
    let filename = format!("searchindex-{:08x}.json", hash);
    let path = output_path.join(&filename);
    fs::write(&path, &built.payload)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    println!(
        "✓ {} ({} documents, {} objects, {} terms, {} bytes)",
        filename,
        built.index.doc_count(),
        built.index.objects.len(),
        built.index.term_count(),
        built.payload.len()
    );

    Ok(path)
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the ferret CLI.
//!
//! Colors are applied only when stdout is a TTY and `NO_COLOR` is unset, so
//! piping output into a file or another tool stays clean.

use std::sync::OnceLock;

use ferret::{ScoredResult, SearchIndex};

static COLOR: OnceLock<bool> = OnceLock::new();

/// Should output be colored? Cached after first call.
fn color_enabled() -> bool {
    *COLOR.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

fn paint(code: &str, text: &str) -> String {
    if color_enabled() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    paint("1", text)
}

pub fn dim(text: &str) -> String {
    paint("2", text)
}

pub fn cyan(text: &str) -> String {
    paint("36", text)
}

/// Render ranked results the way a site front-end would: title, source,
/// score, and any API objects that matched the whole query.
pub fn print_results(index: &SearchIndex, results: &[ScoredResult]) {
    if results.is_empty() {
        println!("{}", dim("no results"));
        return;
    }

    for (rank, result) in results.iter().enumerate() {
        let doc = &index.documents[result.document_id.as_usize()];
        println!(
            "{:>3}. {}  {}  {}",
            rank + 1,
            bold(&doc.title),
            dim(&doc.source_ref),
            cyan(&format!("score {}", result.score)),
        );
        for object in &result.matched_objects {
            let type_name = index
                .object_types
                .get(&object.type_code)
                .map_or(object.type_code.as_str(), |info| info.display_name.as_str());
            println!(
                "       {} {}  {}",
                dim(type_name),
                object.qualified_name,
                dim(&format!("#{}", object.anchor_id)),
            );
        }
    }
}

/// Render the structure summary for `inspect`.
pub fn print_inspect(index: &SearchIndex, raw_len: usize, brotli_len: usize) {
    let postings: usize = index.terms.values().map(Vec::len).sum();

    println!("{}", bold("searchindex structure"));
    println!("  schema version  {}", index.schema_version);
    println!("  documents       {}", index.doc_count());
    println!("  objects         {}", index.objects.len());
    println!("  object types    {}", index.object_types.len());
    println!("  terms           {}", index.term_count());
    println!("  postings        {}", postings);
    println!();
    println!("{}", bold("transport size"));
    println!("  raw             {} bytes", raw_len);
    println!(
        "  brotli          {} bytes {}",
        brotli_len,
        dim(&format!("({:.0}% of raw)", percentage(brotli_len, raw_len))),
    );
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

//! The fetch → parse → select → resolve → assemble pipeline
//!
//! Strictly sequential and single-pass. The network fetch is the only
//! suspension point; everything after it runs synchronously. The combined
//! document is printed only after the full loop completes, so a failure
//! anywhere discards partial results.

use std::time::Instant;

use thiserror::Error;

use aj_core::{combine, positive_domains, resolve_script, select_injection_rules, wrap_script};
use aj_core::ResolveError;
use aj_parser::parse_filter_list;

use crate::fetch::{fetch_filter_list, RetrievalError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("failed to start tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Runs the whole pipeline and writes the combined script to stdout.
pub fn run(url: &str, target: &str, verbose: bool) -> Result<(), PipelineError> {
    let start = Instant::now();

    let runtime = tokio::runtime::Runtime::new()?;
    let filter_text = runtime.block_on(fetch_filter_list(url))?;
    let fetch_time = start.elapsed();

    let generate_start = Instant::now();
    let stats = generate(&filter_text, target)?;
    let generate_time = generate_start.elapsed();

    if verbose {
        eprintln!("Fetched {} bytes from {}", filter_text.len(), url);
        eprintln!(
            "  Rules:    {} parsed, {} selected for {}",
            stats.parsed, stats.selected, target
        );
        eprintln!(
            "  Time:     {:.1}ms fetch, {:.1}ms generate",
            fetch_time.as_secs_f64() * 1000.0,
            generate_time.as_secs_f64() * 1000.0,
        );
    }

    println!("{}", stats.combined);
    Ok(())
}

/// Output of the processing stages, kept separate from `run` so the
/// pipeline can be exercised on inline filter text.
#[derive(Debug)]
pub struct Generated {
    pub combined: String,
    pub parsed: usize,
    pub selected: usize,
}

/// Parses `filter_text`, selects injection rules scoped to `target`,
/// resolves each one, and joins the guarded blocks into one document.
pub fn generate(filter_text: &str, target: &str) -> Result<Generated, PipelineError> {
    let rules = parse_filter_list(filter_text);
    let selected = select_injection_rules(&rules, target);

    let mut wrapped = Vec::with_capacity(selected.len());
    for rule in &selected {
        let script = resolve_script(rule)?;
        wrapped.push(wrap_script(&rule.raw, &positive_domains(rule), &script));
    }

    Ok(Generated {
        combined: combine(&wrapped),
        parsed: rules.len(),
        selected: wrapped.len(),
    })
}

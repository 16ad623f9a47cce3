//! adject CLI
//!
//! Downloads an ad-filtering rule list, selects the JavaScript-injection
//! rules scoped to a target domain, resolves each rule's payload, and
//! prints one combined script guarded by per-rule hostname checks.

use clap::Parser;

mod fetch;
mod pipeline;

#[derive(Parser)]
#[command(name = "adject")]
#[command(about = "Extracts domain-scoped JS injection rules from a filter list into one guarded script")]
struct Cli {
    /// Filter list URL to download
    #[arg(long, default_value = fetch::FILTER_LIST_URL)]
    url: String,

    /// Target domain the generated script is scoped to (subdomains included)
    #[arg(long, default_value = "youtube.com")]
    domain: String,

    /// Print rule counts and stage timings to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = pipeline::run(&cli.url, &cli.domain, cli.verbose) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

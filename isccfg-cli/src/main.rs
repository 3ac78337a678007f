use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use isccfg_core::{parse_reader_with, write_json, JsonStyle, KeyOrder, ParseOptions};
use log::info;

/// Convert an ISC-style configuration file (dhcpd.conf, named.conf) to JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file, or `-` for standard input
    path: PathBuf,

    /// Reject unclosed scopes and statements missing their ';'
    #[arg(long)]
    strict: bool,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Sort object keys instead of keeping declaration order
    #[arg(long)]
    sort_keys: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = if cli.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    };
    let style = JsonStyle {
        pretty: !cli.compact,
        key_order: if cli.sort_keys {
            KeyOrder::Sorted
        } else {
            KeyOrder::Insertion
        },
    };

    let root = if cli.path.as_os_str() == "-" {
        info!("reading configuration from stdin");
        parse_reader_with(io::stdin().lock(), &options).context("failed to parse <stdin>")?
    } else {
        info!("reading configuration from {}", cli.path.display());
        let file = File::open(&cli.path)
            .with_context(|| format!("failed to open {}", cli.path.display()))?;
        parse_reader_with(BufReader::new(file), &options)
            .with_context(|| format!("failed to parse {}", cli.path.display()))?
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_json(&root, &mut out, style).context("failed to write JSON")?;
    out.flush().context("failed to write JSON")?;
    Ok(())
}

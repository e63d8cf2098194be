//! lpmat - sparse tableau inspector
//!
//! Replays a system description onto an exact rational tableau and prints
//! the resulting rows in solved form together with matrix diagnostics.
//!
//! # Usage
//!
//! ```bash
//! lpmat system.lp
//! lpmat --check -v system.lp
//! ```

use std::path::PathBuf;

use clap::Parser;
use lpmat_core::{dsl, error::Result, System, TableauConfig};

/// Sparse tableau inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the system description file
    #[arg(value_name = "SYSTEM_FILE")]
    system_file: PathBuf,

    /// Verify the row/column cross-index after every operation
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Parse the system file
    let ast = dsl::parse_file(&args.system_file)?;

    // Replay it onto a tableau
    let config = TableauConfig::new().with_consistency_checks(args.check);
    let system = System::from_ast(ast, config)?;

    print!("{}", system);

    Ok(())
}

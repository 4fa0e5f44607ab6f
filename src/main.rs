//! ABA Generator CLI
//!
//! Reads a JSON configuration and a CSV of transactions and writes the ABA
//! file to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- config.json transactions.csv > payments.aba
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use aba_generator::{read_transactions, AbaConfig, AbaError, AbaGenerator, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(AbaError::MissingArgument);
    }

    let config = AbaConfig::from_reader(BufReader::new(File::open(&args[1])?))?;
    let transactions = read_transactions(BufReader::new(File::open(&args[2])?))?;

    let generator = AbaGenerator::new(config);

    let stdout = io::stdout();
    let handle = stdout.lock();
    generator.write_output(handle, &transactions)?;

    Ok(())
}

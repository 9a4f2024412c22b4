//! otpad Key Generator
//!
//! Prints a random key of the requested length.

use clap::Parser;
use otpad::cipher::keygen;

/// One-time pad key generator
#[derive(Parser, Debug)]
#[command(name = "otp-keygen")]
#[command(about = "Generate a random key over A-Z and space")]
#[command(version)]
struct Args {
    /// Number of symbols to generate
    length: usize,
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        // Usage errors exit 1 like every other failure
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });
    println!("{}", keygen::generate(args.length));
}

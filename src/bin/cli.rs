//! otpad Client Binary
//!
//! Sends an input file and a key file to a daemon and prints the result.

use clap::Parser;
use otpad::cipher::Payload;
use otpad::network::{Request, Session};
use otpad::{Config, Result, ServerKind};
use tracing_subscriber::{fmt, EnvFilter};

/// One-time pad client
#[derive(Parser, Debug)]
#[command(name = "otp-client")]
#[command(about = "Encode or decode a file through a one-time pad daemon")]
#[command(version)]
struct Args {
    /// File holding the text to transform (A-Z and space)
    input: String,

    /// File holding the key
    key: String,

    /// Daemon port
    port: u16,

    /// Kind of daemon to talk to (encode or decode)
    #[arg(short, long, default_value = "encode")]
    kind: ServerKind,

    /// Daemon host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Per-step read/write deadline in milliseconds (0 disables)
    #[arg(short, long, default_value = "30000")]
    timeout_ms: u64,

    /// Reject keys containing symbols outside the alphabet
    #[arg(long)]
    validate_key: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        // Usage errors exit 1 like every other failure
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("otp-client: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let config = Config::builder()
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .validate_key(args.validate_key)
        .build();

    let input = Payload::load(&args.input)?;
    let key = Payload::load(&args.key)?;
    let request = Request::new(args.kind, input, key, config.validate_key)?;

    let session = Session::connect((args.host.as_str(), args.port), &config)?;
    let result = session.transmit(&request)?;

    Ok(String::from_utf8_lossy(&result).into_owned())
}

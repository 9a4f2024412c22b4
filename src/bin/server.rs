//! otpad Daemon Binary
//!
//! Starts an encode or decode daemon on all interfaces.

use clap::Parser;
use otpad::network::Server;
use otpad::{Config, ServerKind};
use tracing_subscriber::{fmt, EnvFilter};

/// One-time pad daemon
#[derive(Parser, Debug)]
#[command(name = "otp-daemon")]
#[command(about = "Encode or decode one-time pad requests over TCP")]
#[command(version)]
struct Args {
    /// Port to listen on
    port: u16,

    /// Transform to perform (encode or decode)
    #[arg(short, long, default_value = "encode")]
    kind: ServerKind,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "64")]
    max_connections: usize,

    /// Per-step read/write deadline in milliseconds (0 disables)
    #[arg(short, long, default_value = "30000")]
    timeout_ms: u64,

    /// Reject keys containing symbols outside the alphabet
    #[arg(long)]
    validate_key: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,otpad=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        // Usage errors exit 1 like every other failure
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    tracing::info!("otpad daemon v{}", otpad::VERSION);

    let config = Config::builder()
        .listen_addr(format!("0.0.0.0:{}", args.port))
        .max_connections(args.max_connections)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .validate_key(args.validate_key)
        .build();

    let mut server = match Server::bind(config, args.kind) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start daemon: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Daemon error: {}", e);
        std::process::exit(1);
    }
}

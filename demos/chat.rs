//! Terminal chat client.
//!
//! Connects to the chat server, prints incoming chat messages and sends
//! every stdin line as a chat message.
//!
//! Usage:
//!
//! ```text
//! cargo run --example chat -- [--name NAME] [--host HOST] [--port PORT] [--debug]
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use chat_transport::client::{DEFAULT_HOST, DEFAULT_PORT};
use chat_transport::{OutboundMessage, Result, Transport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

/// Connect attempts before giving up.
const CONNECT_ATTEMPTS: u32 = 5;

/// Pause between connect attempts.
const RETRY_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone)]
struct Args {
    name: String,
    host: String,
    port: u16,
    debug: bool,
}

impl Args {
    /// Parse command-line arguments.
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };

        Self {
            name: value_of("--name").unwrap_or_else(|| "anonymous".to_string()),
            host: value_of("--host").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: value_of("--port")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            debug: args.iter().any(|a| a == "--debug"),
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging.
fn init_logging(debug: bool) {
    let filter = if debug {
        "chat_transport=debug"
    } else {
        "chat_transport=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Connect, retrying while the failure is recoverable.
async fn connect_with_retry(transport: &Transport) -> Result<()> {
    let mut attempt = 1;
    loop {
        match transport.connect().await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_recoverable() && attempt < CONNECT_ATTEMPTS => {
                warn!(error = %e, attempt, "Connect failed, retrying");
                attempt += 1;
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let transport = Transport::builder()
        .host(&args.host)
        .port(args.port)
        .chat_handler(|name: &str, text: &str| println!("<{name}> {text}"))
        .notifier(|message: &str| eprintln!("[!] {message}"))
        .build()?;

    connect_with_retry(&transport).await?;
    println!("Connected to {} as {}", transport.url(), args.name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let message = OutboundMessage::chat(&args.name, text);
        match transport.send(&message).await {
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "Send failed, reconnecting");
                connect_with_retry(&transport).await?;
                transport.send(&message).await?;
            }
            result => result?,
        }
    }

    Ok(())
}

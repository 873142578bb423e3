use tasknest::commands::Cli;
use tasknest::libs::loading::install_error_boundary;
use tasknest::msg_error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Off unless RUST_LOG is set; TASKNEST_DEBUG alone turns on debug output.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| match std::env::var("TASKNEST_DEBUG") {
            Ok(_) => EnvFilter::new("tasknest=debug"),
            Err(_) => EnvFilter::new("off"),
        });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    install_error_boundary();

    if let Err(e) = Cli::menu() {
        msg_error!(format!("{:#}", e));
        std::process::exit(1);
    }
}

//! Diagnostic logging setup

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding a level or a full filter spec.
pub const LOG_ENV: &str = "SHUGEN_LOG";

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

/// Build the filter directive.
///
/// `SHUGEN_LOG` wins when set; otherwise `--verbose` selects `debug` and the default is `warn`.
fn filter_directive(env_value: Option<&str>, verbose: bool) -> String {
    match env_value {
        Some(level) if is_plain_level(level) => level.to_ascii_lowercase(),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ if verbose => "debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Install the stderr fmt subscriber.
pub fn init(verbose: bool) {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = filter_directive(env_value.as_deref(), verbose);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .without_time()
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

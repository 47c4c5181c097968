//! Tracing subscriber setup.
//!
//! Logs go to stderr so that CSV written by the CLI on stdout stays clean.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn parse_level(level: &str) -> Level {
    match level.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs the global subscriber. `RUST_LOG` directives refine `log_level`.
pub fn init_tracing(log_level: &str, json_logs: bool) {
    let mut env_filter = EnvFilter::from_default_env().add_directive(parse_level(log_level).into());
    for directive in ["hyper=info", "h2=info", "reqwest=info"] {
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {e}");
    }
}

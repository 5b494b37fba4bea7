//! Shared plumbing for the command-line binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Process-wide setup every binary runs first: `.env` loading, the rustls
/// crypto provider, and tracing. `RUST_LOG` overrides the default filter.
pub fn init(default_directive: &str) {
    dotenvy::dotenv().ok();

    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.to_string()));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();
}

//! Tracing setup for the binary.
//!
//! `TUTORIAL_LOG` holds the filter directives (default `info,sqlx=warn`).
//! `TUTORIAL_LOG_FORMAT=json` switches to structured JSON lines.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sqlx=warn";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("TUTORIAL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match std::env::var("TUTORIAL_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

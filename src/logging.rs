//! Log setup
//!
//! The terminal owns stdout for the rendered page, so every event goes to
//! stderr. `RUST_LOG` overrides the per-environment directives.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Directives used when `RUST_LOG` is unset.
///
/// Page events (mount epochs, stale responses, field changes) are debug level
/// outside prod. The HTTP stack stays quiet unless something breaks.
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "profile_page=debug,reqwest=info,hyper=warn,info",
        Environment::Staging => "profile_page=debug,reqwest=warn,warn",
        Environment::Prod => "profile_page=info,warn",
    }
}

pub fn init_logging(env: &Environment) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(env))
            .context("Invalid default log directives")?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(env.is_dev())
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // One JSON object per event in prod, with the instrumented page
    // operation as the current span
    let initialized = if matches!(env, Environment::Prod) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json().with_current_span(true).with_span_list(false))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .try_init()
    };
    initialized.context("Logging already initialized")?;

    tracing::debug!(env = ?env, "Logging initialized");
    Ok(())
}

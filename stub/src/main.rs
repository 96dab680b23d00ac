use anyhow::{self, Result};
use responder::respond;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout belongs to the judge, logs go to stderr
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();

    match respond(stdin.lock(), stdout.lock()) {
        Ok(Some(summary)) => tracing::info!(?summary, "session finished"),
        Ok(None) => tracing::info!("no session parameters"),
        // The exit status is 0 no matter what.
        Err(e) => tracing::error!(error = %e, "session aborted"),
    }

    Ok(())
}

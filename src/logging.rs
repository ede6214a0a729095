//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout only carries the printed sequences.
//! `RUST_LOG` overrides the level given on the command line.

use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Error, Result};

pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|err| Error::Logging(format!("invalid log level {level:?}: {err}")))?,
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))
}

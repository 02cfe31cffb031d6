// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! The resolver crates are instrumented with Rust's `tracing` framework.
//!
//! Calling the [`init`] function will install a global tracing subscriber whose filter comes
//! from the `PERM_LOG` variable, which follows the same conventions as `RUST_LOG` (for
//! example `PERM_LOG=permission_resolver=debug`). Without it, only warnings and errors are
//! printed.

use perm_env::Environment;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

pub const PERM_LOG: &str = "PERM_LOG";

/// Initialize the tracing subscriber with a compact console layer.
pub fn init(env: &dyn Environment) -> Result<(), LoggingError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env.get(PERM_LOG).unwrap_or_default());

    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use perm_env::MapEnvironment;

    #[test]
    fn second_init_is_rejected() {
        let env = MapEnvironment::from([(PERM_LOG, "permission_resolver=debug")]);

        assert!(init(&env).is_ok());
        assert!(matches!(
            init(&env),
            Err(LoggingError::AlreadyInitialized(_))
        ));
    }
}

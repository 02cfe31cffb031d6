// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolver configuration, read from the environment.
//!
//! `PERM_SIMPLIFY_CRITERIA` makes the resolver simplify resolved criteria, turning filters that
//! reduce to `MatchAll`/`MatchNone` into definitive answers (default `false`).

use perm_env::{EnvError, Environment};

pub const PERM_SIMPLIFY_CRITERIA: &str = "PERM_SIMPLIFY_CRITERIA";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    pub simplify_criteria: bool,
}

impl ResolverConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, EnvError> {
        Ok(Self {
            simplify_criteria: env.enabled(PERM_SIMPLIFY_CRITERIA, false)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perm_env::MapEnvironment;

    #[test]
    fn defaults() {
        let config = ResolverConfig::from_env(&MapEnvironment::new()).unwrap();

        assert_eq!(config, ResolverConfig::default());
        assert!(!config.simplify_criteria);
    }

    #[test]
    fn simplification_enabled() {
        let env = MapEnvironment::from([(PERM_SIMPLIFY_CRITERIA, "on")]);

        assert_eq!(
            ResolverConfig::from_env(&env).unwrap(),
            ResolverConfig {
                simplify_criteria: true,
            }
        );
    }

    #[test]
    fn invalid_boolean() {
        let env = MapEnvironment::from([(PERM_SIMPLIFY_CRITERIA, "sometimes")]);

        assert!(matches!(
            ResolverConfig::from_env(&env),
            Err(EnvError::InvalidBoolean { .. })
        ));
    }
}

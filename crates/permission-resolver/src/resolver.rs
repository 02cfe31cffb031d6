// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Permission criterion resolution
//!
//! Turns the permission sets of the current user into a [`PermissionCriterion`]:
//!
//! - role assignments (permission sets) combine with OR,
//! - policies within a set combine with OR,
//! - limitations within a policy combine with AND,
//! - a role assignment's own limitation is ANDed with its policies.
//!
//! A definitive answer from the access source is returned as-is, without building a criterion.

use std::sync::Arc;

use permission_model::{
    Criterion, Limitation, PermissionCriterion, PermissionSet, Target, UserReference,
};
use tracing::{debug, error, instrument};

use crate::access_source::{AccessGrant, AccessSource};
use crate::config::ResolverConfig;
use crate::error::PermissionCriterionError;
use crate::limitation::LimitationRegistry;

const READ_MODULE: &str = "content";
const READ_FUNCTION: &str = "read";

pub struct PermissionCriterionResolver {
    access_source: Arc<dyn AccessSource>,
    limitation_registry: Arc<LimitationRegistry>,
    config: ResolverConfig,
}

/// What the policies of one permission set grant.
enum PolicyGrant {
    /// Some policy has no limitations
    Unconditional,
    /// One criterion per policy, to be ORed
    Restricted(Vec<Criterion>),
}

impl PermissionCriterionResolver {
    pub fn new(
        access_source: Arc<dyn AccessSource>,
        limitation_registry: Arc<LimitationRegistry>,
    ) -> Self {
        Self {
            access_source,
            limitation_registry,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve what the current user may access for `module`/`function`.
    ///
    /// `targets` are only passed to target-aware limitation types.
    #[instrument(
        level = "debug",
        skip(self, targets),
        fields(targets = targets.map(<[Target]>::len))
    )]
    pub fn resolve(
        &self,
        module: &str,
        function: &str,
        targets: Option<&[Target]>,
    ) -> Result<PermissionCriterion, PermissionCriterionError> {
        let permission_sets = match self.access_source.has_access(module, function)? {
            AccessGrant::Boolean(allowed) => {
                debug!(allowed, "Access source gave a definitive answer");
                return Ok(allowed.into());
            }
            AccessGrant::PermissionSets(permission_sets) => permission_sets,
        };

        if permission_sets.is_empty() {
            error!("Access source returned an empty list of permission sets");
            return Err(PermissionCriterionError::EmptyPermissionSets {
                module: module.to_string(),
                function: function.to_string(),
            });
        }

        let user = self.access_source.current_user_reference();
        let mut role_assignment_or_criteria = Vec::new();

        for permission_set in &permission_sets {
            let policy_grant = self.policy_grant(permission_set, &user, targets)?;

            match &permission_set.limitation {
                Some(role_limitation) => {
                    let role_criterion =
                        self.criterion_for_limitation(role_limitation, &user, targets)?;

                    let policy_criterion = match policy_grant {
                        PolicyGrant::Unconditional => None,
                        PolicyGrant::Restricted(criteria) => {
                            collapse(criteria, Criterion::LogicalOr)
                        }
                    };

                    role_assignment_or_criteria.push(match policy_criterion {
                        Some(policy_criterion) => {
                            Criterion::LogicalAnd(vec![role_criterion, policy_criterion])
                        }
                        None => role_criterion,
                    });
                }
                None => match policy_grant {
                    PolicyGrant::Unconditional => {
                        role_assignment_or_criteria.push(Criterion::MatchAll)
                    }
                    // Any policy matches globally, so splice them into the top-level OR
                    PolicyGrant::Restricted(criteria) => {
                        role_assignment_or_criteria.extend(criteria)
                    }
                },
            }
        }

        let resolved = match collapse(role_assignment_or_criteria, Criterion::LogicalOr) {
            Some(criterion) => PermissionCriterion::Filtered(criterion),
            None => PermissionCriterion::Denied,
        };

        let resolved = if self.config.simplify_criteria {
            resolved.simplify()
        } else {
            resolved
        };

        debug!(user = %user, %resolved, "Resolved permission criterion");

        Ok(resolved)
    }

    /// The criterion for reading content, for direct use by a query layer. Never a boolean:
    /// full access is `MatchAll`, no access is `MatchNone`.
    pub fn resolve_read_criterion(&self) -> Result<Criterion, PermissionCriterionError> {
        Ok(self
            .resolve(READ_MODULE, READ_FUNCTION, None)?
            .into_criterion())
    }

    fn policy_grant(
        &self,
        permission_set: &PermissionSet,
        user: &UserReference,
        targets: Option<&[Target]>,
    ) -> Result<PolicyGrant, PermissionCriterionError> {
        let mut policy_or_criteria = Vec::with_capacity(permission_set.policies.len());

        for policy in &permission_set.policies {
            if policy.is_unconditional() {
                // Makes the other policies of the set irrelevant (but not the role limitation)
                return Ok(PolicyGrant::Unconditional);
            }

            let limitation_and_criteria = policy
                .limitations
                .iter()
                .map(|limitation| self.criterion_for_limitation(limitation, user, targets))
                .collect::<Result<Vec<_>, _>>()?;

            policy_or_criteria.extend(collapse(limitation_and_criteria, Criterion::LogicalAnd));
        }

        Ok(PolicyGrant::Restricted(policy_or_criteria))
    }

    fn criterion_for_limitation(
        &self,
        limitation: &Limitation,
        user: &UserReference,
        targets: Option<&[Target]>,
    ) -> Result<Criterion, PermissionCriterionError> {
        let limitation_type = self
            .limitation_registry
            .lookup(limitation.identifier())
            .inspect_err(|e| error!("{e}"))?;

        Ok(limitation_type.criterion(limitation, user, targets)?)
    }
}

/// `None` for no criteria, the criterion itself for one, otherwise a `group` of them.
fn collapse(
    mut criteria: Vec<Criterion>,
    group: fn(Vec<Criterion>) -> Criterion,
) -> Option<Criterion> {
    match criteria.len() {
        0 | 1 => criteria.pop(),
        _ => Some(group(criteria)),
    }
}

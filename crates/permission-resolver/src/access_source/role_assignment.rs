// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! An [`AccessSource`] computed from role definitions and the current user's role assignments.

use std::collections::HashMap;

use permission_model::{Limitation, PermissionSet, Policy, UserReference};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AccessGrant, AccessSource, AccessSourceError};

/// Matches any module or function.
const ANY: &str = "*";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub identifier: String,
    #[serde(default)]
    pub policies: Vec<Policy>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub role: String,
    #[serde(default)]
    pub limitation: Option<Limitation>,
}

#[derive(Deserialize)]
struct AccessDocument {
    user: UserReference,
    roles: Vec<Role>,
    assignments: Vec<RoleAssignment>,
}

pub struct RoleAssignmentAccessSource {
    user: UserReference,
    roles: HashMap<String, Role>,
    assignments: Vec<RoleAssignment>,
}

impl RoleAssignmentAccessSource {
    pub fn new(user: UserReference, roles: Vec<Role>, assignments: Vec<RoleAssignment>) -> Self {
        Self {
            user,
            roles: roles
                .into_iter()
                .map(|role| (role.identifier.clone(), role))
                .collect(),
            assignments,
        }
    }

    /// Load from a JSON document of the form
    /// `{"user": {"user_id": 14}, "roles": [...], "assignments": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let AccessDocument {
            user,
            roles,
            assignments,
        } = serde_json::from_str(json)?;

        Ok(Self::new(user, roles, assignments))
    }
}

impl AccessSource for RoleAssignmentAccessSource {
    fn has_access(&self, module: &str, function: &str) -> Result<AccessGrant, AccessSourceError> {
        let mut permission_sets = Vec::new();

        for assignment in &self.assignments {
            let role = self
                .roles
                .get(&assignment.role)
                .ok_or_else(|| AccessSourceError::UnknownRole(assignment.role.clone()))?;

            // Wildcard policies grant everything only when the assignment itself is unrestricted
            let unrestricted = assignment.limitation.is_none();
            let mut policies = Vec::new();

            for policy in &role.policies {
                if policy.module == ANY && unrestricted {
                    debug!(role = %role.identifier, "Wildcard module policy grants access");
                    return Ok(AccessGrant::Boolean(true));
                }
                if policy.module != module && policy.module != ANY {
                    continue;
                }
                if policy.function == ANY && unrestricted {
                    debug!(role = %role.identifier, "Wildcard function policy grants access");
                    return Ok(AccessGrant::Boolean(true));
                }
                if policy.function != function && policy.function != ANY {
                    continue;
                }
                policies.push(policy.clone());
            }

            if !policies.is_empty() {
                permission_sets.push(PermissionSet::new(assignment.limitation.clone(), policies));
            }
        }

        Ok(if permission_sets.is_empty() {
            AccessGrant::Boolean(false)
        } else {
            AccessGrant::PermissionSets(permission_sets)
        })
    }

    fn current_user_reference(&self) -> UserReference {
        self.user
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The source of a user's granted permissions.
//!
//! An [`AccessSource`] answers "what may the current user do for `module`/`function`?" with
//! either a definitive boolean or the permission sets (one per applicable role assignment) that
//! the resolver turns into a criterion.

mod role_assignment;

use permission_model::{PermissionSet, UserReference};
use thiserror::Error;

pub use role_assignment::{Role, RoleAssignment, RoleAssignmentAccessSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessGrant {
    Boolean(bool),
    PermissionSets(Vec<PermissionSet>),
}

impl From<bool> for AccessGrant {
    fn from(value: bool) -> Self {
        AccessGrant::Boolean(value)
    }
}

pub trait AccessSource: Send + Sync {
    /// Must never return `PermissionSets` with an empty list: "no access" is `Boolean(false)`.
    fn has_access(&self, module: &str, function: &str) -> Result<AccessGrant, AccessSourceError>;

    fn current_user_reference(&self) -> UserReference;
}

#[derive(Error, Debug)]
pub enum AccessSourceError {
    #[error("Role '{0}' is assigned but not defined")]
    UnknownRole(String),

    #[error("{0}")]
    Generic(Box<dyn std::error::Error + Send + Sync>),
}

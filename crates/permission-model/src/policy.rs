// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::limitation::Limitation;

/// Grants `module`/`function` (for example `content`/`read`) to content satisfying all of its
/// limitations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub module: String,
    pub function: String,
    #[serde(default)]
    pub limitations: Vec<Limitation>,
}

impl Policy {
    pub fn new(
        module: impl Into<String>,
        function: impl Into<String>,
        limitations: Vec<Limitation>,
    ) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            limitations,
        }
    }

    /// A policy without limitations grants access to everything.
    pub fn is_unconditional(&self) -> bool {
        self.limitations.is_empty()
    }
}

/// One role assignment's contribution to a permission check: the policies of the role that
/// apply, and the limitation attached to the assignment itself (if any).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    #[serde(default)]
    pub limitation: Option<Limitation>,
    pub policies: Vec<Policy>,
}

impl PermissionSet {
    pub fn new(limitation: Option<Limitation>, policies: Vec<Policy>) -> Self {
        Self {
            limitation,
            policies,
        }
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::access_source::AccessSourceError;
use crate::limitation::TranslationError;

#[derive(Error, Debug)]
pub enum PermissionCriterionError {
    #[error("Received an empty list of permission sets from has_access('{module}', '{function}')")]
    EmptyPermissionSets { module: String, function: String },

    #[error("No limitation type registered for identifier '{0}'")]
    UnknownLimitation(String),

    #[error(transparent)]
    AccessSource(#[from] AccessSourceError),

    #[error(transparent)]
    Translation(#[from] TranslationError),
}

impl PermissionCriterionError {
    /// Whether the error points at a misconfigured system (as opposed to a failing
    /// collaborator). Such errors are not worth retrying.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PermissionCriterionError::EmptyPermissionSets { .. }
                | PermissionCriterionError::UnknownLimitation(_)
        )
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use permission_model::criterion::{CriterionTarget, CriterionValue, Operator};
use permission_model::{Criterion, Limitation, LimitationValue, UserReference};

use super::{LimitationTranslator, TranslationError, non_empty_values};

/// Value granting access to the user's own content.
const SELF: i64 = 1;
/// Legacy "session" value, treated like [`SELF`].
const SESSION: i64 = 2;

/// Limits access to content owned by the current user.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerLimitationType;

impl LimitationTranslator for OwnerLimitationType {
    fn criterion(
        &self,
        limitation: &Limitation,
        user: &UserReference,
    ) -> Result<Criterion, TranslationError> {
        for value in non_empty_values(limitation)? {
            if !matches!(value, LimitationValue::Integer(SELF | SESSION)) {
                return Err(TranslationError::InvalidValue {
                    identifier: limitation.identifier().to_string(),
                    value: value.clone(),
                });
            }
        }

        Criterion::predicate(
            CriterionTarget::Owner,
            Operator::Eq,
            CriterionValue::Integer(user.user_id()),
        )
        .map_err(TranslationError::invalid_criterion(limitation))
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use permission_model::criterion::{CriterionTarget, CriterionValue, Operator};
use permission_model::{Criterion, Limitation, UserReference};

use super::{LimitationTranslator, TranslationError, integer_values, text_values};

/// Limits access to content whose `target` property is one of the limitation's values.
///
/// Covers the limitation types that map one-to-one onto a content property: `Section`,
/// `Class` (content type), `State`, `Node` (location) and `Subtree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueListLimitationType {
    target: CriterionTarget,
}

impl ValueListLimitationType {
    pub fn new(target: CriterionTarget) -> Self {
        Self { target }
    }

    pub fn section() -> Self {
        Self::new(CriterionTarget::SectionId)
    }

    pub fn content_type() -> Self {
        Self::new(CriterionTarget::ContentTypeId)
    }

    pub fn object_state() -> Self {
        Self::new(CriterionTarget::ObjectStateId)
    }

    pub fn location() -> Self {
        Self::new(CriterionTarget::LocationId)
    }

    pub fn subtree() -> Self {
        Self::new(CriterionTarget::Subtree)
    }
}

impl LimitationTranslator for ValueListLimitationType {
    fn criterion(
        &self,
        limitation: &Limitation,
        _user: &UserReference,
    ) -> Result<Criterion, TranslationError> {
        let value = match self.target {
            CriterionTarget::Subtree | CriterionTarget::LanguageCode => {
                CriterionValue::Texts(text_values(limitation)?)
            }
            _ => CriterionValue::Integers(integer_values(limitation)?),
        };

        Criterion::predicate(self.target, Operator::In, value)
            .map_err(TranslationError::invalid_criterion(limitation))
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use permission_model::limitation::identifier;
use permission_model::{Criterion, Limitation, Target, UserReference};

use super::{
    LanguageLimitationType, LimitationTranslator, OwnerLimitationType,
    TargetAwareLimitationTranslator, TranslationError, ValueListLimitationType,
};
use crate::error::PermissionCriterionError;

/// A registered limitation type, tagged with the shape of its translator.
#[derive(Clone)]
pub enum LimitationType {
    Standard(Arc<dyn LimitationTranslator>),
    TargetAware(Arc<dyn TargetAwareLimitationTranslator>),
}

impl LimitationType {
    pub fn standard(translator: impl LimitationTranslator + 'static) -> Self {
        LimitationType::Standard(Arc::new(translator))
    }

    pub fn target_aware(translator: impl TargetAwareLimitationTranslator + 'static) -> Self {
        LimitationType::TargetAware(Arc::new(translator))
    }

    /// Translate the limitation. Targets are only seen by target-aware types.
    pub fn criterion(
        &self,
        limitation: &Limitation,
        user: &UserReference,
        targets: Option<&[Target]>,
    ) -> Result<Criterion, TranslationError> {
        match self {
            LimitationType::Standard(translator) => translator.criterion(limitation, user),
            LimitationType::TargetAware(translator) => {
                translator.criterion_by_target(limitation, user, targets)
            }
        }
    }
}

impl fmt::Debug for LimitationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitationType::Standard(_) => f.write_str("LimitationType::Standard"),
            LimitationType::TargetAware(_) => f.write_str("LimitationType::TargetAware"),
        }
    }
}

/// Maps limitation identifiers to their types. Built once at startup.
#[derive(Clone, Default, Debug)]
pub struct LimitationRegistry {
    types: HashMap<String, LimitationType>,
}

impl LimitationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all limitation types shipped with the resolver.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();

        registry.register(
            identifier::OWNER,
            LimitationType::standard(OwnerLimitationType),
        );
        registry.register(
            identifier::SECTION,
            LimitationType::standard(ValueListLimitationType::section()),
        );
        registry.register(
            identifier::CONTENT_TYPE,
            LimitationType::standard(ValueListLimitationType::content_type()),
        );
        registry.register(
            identifier::OBJECT_STATE,
            LimitationType::standard(ValueListLimitationType::object_state()),
        );
        registry.register(
            identifier::LOCATION,
            LimitationType::standard(ValueListLimitationType::location()),
        );
        registry.register(
            identifier::SUBTREE,
            LimitationType::standard(ValueListLimitationType::subtree()),
        );
        registry.register(
            identifier::LANGUAGE,
            LimitationType::target_aware(LanguageLimitationType),
        );

        registry
    }

    /// Register a type, returning the one previously registered for the identifier, if any.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        limitation_type: LimitationType,
    ) -> Option<LimitationType> {
        self.types.insert(identifier.into(), limitation_type)
    }

    pub fn lookup(&self, identifier: &str) -> Result<&LimitationType, PermissionCriterionError> {
        self.types
            .get(identifier)
            .ok_or_else(|| PermissionCriterionError::UnknownLimitation(identifier.to_string()))
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

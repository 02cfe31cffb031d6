// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use permission_model::criterion::{CriterionTarget, CriterionValue, Operator};
use permission_model::limitation::identifier;
use permission_model::{
    Criterion, Limitation, PermissionSet, Policy, Target, UserReference,
};
use permission_resolver::access_source::{AccessGrant, AccessSource, AccessSourceError};
use permission_resolver::limitation::{
    LanguageLimitationType, LimitationRegistry, LimitationTranslator, LimitationType,
    OwnerLimitationType, TargetAwareLimitationTranslator, TranslationError,
    ValueListLimitationType,
};

pub const USER_ID: i64 = 14;

/// Answers every check with the same grant and records what was asked.
pub struct FixedAccessSource {
    grant: Result<AccessGrant, String>,
    checks: Mutex<Vec<(String, String)>>,
}

impl FixedAccessSource {
    pub fn new(grant: AccessGrant) -> Arc<Self> {
        Arc::new(Self {
            grant: Ok(grant),
            checks: Mutex::new(vec![]),
        })
    }

    pub fn sets(permission_sets: Vec<PermissionSet>) -> Arc<Self> {
        Self::new(AccessGrant::PermissionSets(permission_sets))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            grant: Err(message.to_string()),
            checks: Mutex::new(vec![]),
        })
    }

    pub fn checks(&self) -> Vec<(String, String)> {
        self.checks.lock().unwrap().clone()
    }
}

impl AccessSource for FixedAccessSource {
    fn has_access(&self, module: &str, function: &str) -> Result<AccessGrant, AccessSourceError> {
        self.checks
            .lock()
            .unwrap()
            .push((module.to_string(), function.to_string()));

        self.grant
            .clone()
            .map_err(|message| AccessSourceError::Generic(message.into()))
    }

    fn current_user_reference(&self) -> UserReference {
        UserReference::new(USER_ID)
    }
}

/// Counts translations performed by the wrapped limitation type.
pub struct Counting<T> {
    inner: T,
    calls: Arc<AtomicUsize>,
}

impl<T: LimitationTranslator> LimitationTranslator for Counting<T> {
    fn criterion(
        &self,
        limitation: &Limitation,
        user: &UserReference,
    ) -> Result<Criterion, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.criterion(limitation, user)
    }
}

impl<T: TargetAwareLimitationTranslator> TargetAwareLimitationTranslator for Counting<T> {
    fn criterion_by_target(
        &self,
        limitation: &Limitation,
        user: &UserReference,
        targets: Option<&[Target]>,
    ) -> Result<Criterion, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.criterion_by_target(limitation, user, targets)
    }
}

/// The built-in limitation types, each counting into the returned counter.
pub fn counting_registry() -> (Arc<LimitationRegistry>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counting = |inner| Counting {
        inner,
        calls: calls.clone(),
    };

    let mut registry = LimitationRegistry::new();
    for (identifier, inner) in [
        (identifier::SECTION, ValueListLimitationType::section()),
        (identifier::CONTENT_TYPE, ValueListLimitationType::content_type()),
        (identifier::OBJECT_STATE, ValueListLimitationType::object_state()),
        (identifier::SUBTREE, ValueListLimitationType::subtree()),
    ] {
        registry.register(identifier, LimitationType::standard(counting(inner)));
    }
    registry.register(
        identifier::OWNER,
        LimitationType::standard(Counting {
            inner: OwnerLimitationType,
            calls: calls.clone(),
        }),
    );
    registry.register(
        identifier::LANGUAGE,
        LimitationType::target_aware(Counting {
            inner: LanguageLimitationType,
            calls: calls.clone(),
        }),
    );

    (Arc::new(registry), calls)
}

pub fn section(ids: &[i64]) -> Limitation {
    Limitation::with_ids(identifier::SECTION, ids.iter().copied())
}

pub fn content_type(ids: &[i64]) -> Limitation {
    Limitation::with_ids(identifier::CONTENT_TYPE, ids.iter().copied())
}

pub fn state(ids: &[i64]) -> Limitation {
    Limitation::with_ids(identifier::OBJECT_STATE, ids.iter().copied())
}

pub fn subtree(paths: &[&str]) -> Limitation {
    Limitation::with_codes(identifier::SUBTREE, paths.iter().copied())
}

pub fn language(codes: &[&str]) -> Limitation {
    Limitation::with_codes(identifier::LANGUAGE, codes.iter().copied())
}

pub fn read_policy(limitations: Vec<Limitation>) -> Policy {
    Policy::new("content", "read", limitations)
}

pub fn ids_criterion(target: CriterionTarget, ids: &[i64]) -> Criterion {
    Criterion::predicate(target, Operator::In, CriterionValue::Integers(ids.to_vec())).unwrap()
}

pub fn section_criterion(ids: &[i64]) -> Criterion {
    ids_criterion(CriterionTarget::SectionId, ids)
}

pub fn content_type_criterion(ids: &[i64]) -> Criterion {
    ids_criterion(CriterionTarget::ContentTypeId, ids)
}

pub fn state_criterion(ids: &[i64]) -> Criterion {
    ids_criterion(CriterionTarget::ObjectStateId, ids)
}

pub fn subtree_criterion(paths: &[&str]) -> Criterion {
    Criterion::predicate(
        CriterionTarget::Subtree,
        Operator::In,
        CriterionValue::Texts(paths.iter().map(|p| p.to_string()).collect()),
    )
    .unwrap()
}

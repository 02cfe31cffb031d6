// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Limitation types
//!
//! Each limitation identifier maps to exactly one limitation type, which translates a
//! [`Limitation`] into a [`Criterion`]. Most types only need the limitation and the current
//! user ([`LimitationTranslator`]); some also depend on the objects being acted upon
//! ([`TargetAwareLimitationTranslator`]). The [`LimitationRegistry`] records which shape each
//! type has, so the resolver knows whether to pass targets along.

mod language;
mod owner;
mod registry;
mod value_list;

use permission_model::criterion::InvalidCriterionError;
use permission_model::{Criterion, Limitation, LimitationValue, Target, UserReference};
use thiserror::Error;

pub use language::LanguageLimitationType;
pub use owner::OwnerLimitationType;
pub use registry::{LimitationRegistry, LimitationType};
pub use value_list::ValueListLimitationType;

pub trait LimitationTranslator: Send + Sync {
    fn criterion(
        &self,
        limitation: &Limitation,
        user: &UserReference,
    ) -> Result<Criterion, TranslationError>;
}

pub trait TargetAwareLimitationTranslator: Send + Sync {
    /// `targets` may be absent; the translator decides what the limitation means then.
    fn criterion_by_target(
        &self,
        limitation: &Limitation,
        user: &UserReference,
        targets: Option<&[Target]>,
    ) -> Result<Criterion, TranslationError>;
}

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Limitation '{identifier}' has no values")]
    EmptyValues { identifier: String },

    #[error("Invalid value {value} for limitation '{identifier}'")]
    InvalidValue {
        identifier: String,
        value: LimitationValue,
    },

    #[error("Could not build a criterion for limitation '{identifier}': {source}")]
    InvalidCriterion {
        identifier: String,
        #[source]
        source: InvalidCriterionError,
    },

    #[error("{0}")]
    Generic(Box<dyn std::error::Error + Send + Sync>),
}

impl TranslationError {
    fn invalid_criterion(limitation: &Limitation) -> impl FnOnce(InvalidCriterionError) -> Self {
        let identifier = limitation.identifier().to_string();
        move |source| TranslationError::InvalidCriterion { identifier, source }
    }
}

fn non_empty_values(limitation: &Limitation) -> Result<&[LimitationValue], TranslationError> {
    match limitation.values() {
        [] => Err(TranslationError::EmptyValues {
            identifier: limitation.identifier().to_string(),
        }),
        values => Ok(values),
    }
}

fn invalid_value(limitation: &Limitation, value: &LimitationValue) -> TranslationError {
    TranslationError::InvalidValue {
        identifier: limitation.identifier().to_string(),
        value: value.clone(),
    }
}

pub(crate) fn integer_values(limitation: &Limitation) -> Result<Vec<i64>, TranslationError> {
    non_empty_values(limitation)?
        .iter()
        .map(|value| match value {
            LimitationValue::Integer(id) => Ok(*id),
            other => Err(invalid_value(limitation, other)),
        })
        .collect()
}

pub(crate) fn text_values(limitation: &Limitation) -> Result<Vec<String>, TranslationError> {
    non_empty_values(limitation)?
        .iter()
        .map(|value| match value {
            LimitationValue::Text(text) => Ok(text.clone()),
            other => Err(invalid_value(limitation, other)),
        })
        .collect()
}

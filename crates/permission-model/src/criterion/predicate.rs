// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Leaf criteria.
//!
//! A [`Predicate`] compares one property of a content item (its section, owner, locations, etc.)
//! against a value. Each [`CriterionTarget`] declares which operators it supports and the shape
//! of value each operator takes; [`Predicate::new`] refuses anything else, so a query layer never
//! sees, for example, a `BETWEEN` with three bounds.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The content property a predicate is evaluated against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CriterionTarget {
    ContentId,
    LocationId,
    ParentLocationId,
    ContentTypeId,
    SectionId,
    /// Location path strings such as `/1/2/42/`, matched by prefix
    Subtree,
    LanguageCode,
    ObjectStateId,
    Owner,
    Created,
    Modified,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    In,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CriterionValue {
    Integer(i64),
    Integers(Vec<i64>),
    Text(String),
    Texts(Vec<String>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCriterionError {
    #[error("Criterion '{target}' does not support operator '{operator}' with value {value}")]
    UnsupportedSpecification {
        target: CriterionTarget,
        operator: Operator,
        value: CriterionValue,
    },
}

#[derive(Debug, Clone, Copy)]
enum ValueFormat {
    Single,
    List,
}

#[derive(Debug, Clone, Copy)]
enum ValueKind {
    Integer,
    Text,
}

/// One accepted (operator, value shape) combination.
#[derive(Debug, Clone, Copy)]
struct Specification {
    operator: Operator,
    format: ValueFormat,
    kind: ValueKind,
    // Exact number of list entries, if constrained
    count: Option<usize>,
}

impl Specification {
    const fn single(operator: Operator, kind: ValueKind) -> Self {
        Self {
            operator,
            format: ValueFormat::Single,
            kind,
            count: None,
        }
    }

    const fn list(operator: Operator, kind: ValueKind) -> Self {
        Self {
            operator,
            format: ValueFormat::List,
            kind,
            count: None,
        }
    }

    const fn pair(operator: Operator, kind: ValueKind) -> Self {
        Self {
            operator,
            format: ValueFormat::List,
            kind,
            count: Some(2),
        }
    }

    fn accepts(&self, operator: Operator, value: &CriterionValue) -> bool {
        if self.operator != operator {
            return false;
        }

        let list_len = match (self.format, self.kind, value) {
            (ValueFormat::Single, ValueKind::Integer, CriterionValue::Integer(_))
            | (ValueFormat::Single, ValueKind::Text, CriterionValue::Text(_)) => return true,
            (ValueFormat::List, ValueKind::Integer, CriterionValue::Integers(values)) => {
                values.len()
            }
            (ValueFormat::List, ValueKind::Text, CriterionValue::Texts(values)) => values.len(),
            _ => return false,
        };

        list_len > 0 && self.count.is_none_or(|count| count == list_len)
    }
}

const IDENTIFIER_SPECIFICATIONS: &[Specification] = &[
    Specification::single(Operator::Eq, ValueKind::Integer),
    Specification::list(Operator::In, ValueKind::Integer),
];

const CODE_SPECIFICATIONS: &[Specification] = &[
    Specification::single(Operator::Eq, ValueKind::Text),
    Specification::list(Operator::In, ValueKind::Text),
];

const DATE_SPECIFICATIONS: &[Specification] = &[
    Specification::single(Operator::Eq, ValueKind::Integer),
    Specification::single(Operator::Gt, ValueKind::Integer),
    Specification::single(Operator::Gte, ValueKind::Integer),
    Specification::single(Operator::Lt, ValueKind::Integer),
    Specification::single(Operator::Lte, ValueKind::Integer),
    Specification::list(Operator::In, ValueKind::Integer),
    Specification::pair(Operator::Between, ValueKind::Integer),
];

impl CriterionTarget {
    pub fn name(&self) -> &'static str {
        match self {
            CriterionTarget::ContentId => "content_id",
            CriterionTarget::LocationId => "location_id",
            CriterionTarget::ParentLocationId => "parent_location_id",
            CriterionTarget::ContentTypeId => "content_type_id",
            CriterionTarget::SectionId => "section_id",
            CriterionTarget::Subtree => "subtree",
            CriterionTarget::LanguageCode => "language_code",
            CriterionTarget::ObjectStateId => "object_state_id",
            CriterionTarget::Owner => "owner",
            CriterionTarget::Created => "created",
            CriterionTarget::Modified => "modified",
        }
    }

    fn specifications(&self) -> &'static [Specification] {
        match self {
            CriterionTarget::ContentId
            | CriterionTarget::LocationId
            | CriterionTarget::ParentLocationId
            | CriterionTarget::ContentTypeId
            | CriterionTarget::SectionId
            | CriterionTarget::ObjectStateId
            | CriterionTarget::Owner => IDENTIFIER_SPECIFICATIONS,
            CriterionTarget::Subtree | CriterionTarget::LanguageCode => CODE_SPECIFICATIONS,
            CriterionTarget::Created | CriterionTarget::Modified => DATE_SPECIFICATIONS,
        }
    }
}

/// A validated leaf criterion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "PredicateRepr", into = "PredicateRepr")]
pub struct Predicate {
    target: CriterionTarget,
    operator: Operator,
    value: CriterionValue,
}

impl Predicate {
    pub fn new(
        target: CriterionTarget,
        operator: Operator,
        value: CriterionValue,
    ) -> Result<Self, InvalidCriterionError> {
        let supported = target
            .specifications()
            .iter()
            .any(|specification| specification.accepts(operator, &value));

        if supported {
            Ok(Self {
                target,
                operator,
                value,
            })
        } else {
            Err(InvalidCriterionError::UnsupportedSpecification {
                target,
                operator,
                value,
            })
        }
    }

    pub fn target(&self) -> CriterionTarget {
        self.target
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &CriterionValue {
        &self.value
    }
}

#[derive(Serialize, Deserialize)]
struct PredicateRepr {
    target: CriterionTarget,
    operator: Operator,
    value: CriterionValue,
}

impl TryFrom<PredicateRepr> for Predicate {
    type Error = InvalidCriterionError;

    fn try_from(repr: PredicateRepr) -> Result<Self, Self::Error> {
        Predicate::new(repr.target, repr.operator, repr.value)
    }
}

impl From<Predicate> for PredicateRepr {
    fn from(predicate: Predicate) -> Self {
        Self {
            target: predicate.target,
            operator: predicate.operator,
            value: predicate.value,
        }
    }
}

impl Display for CriterionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Eq => "=",
            Operator::In => "IN",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Between => "BETWEEN",
        })
    }
}

impl Display for CriterionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            f.write_str("[")?;
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str("]")
        }

        match self {
            CriterionValue::Integer(value) => write!(f, "{value}"),
            CriterionValue::Integers(values) => list(f, values),
            CriterionValue::Text(value) => write!(f, "'{value}'"),
            CriterionValue::Texts(values) => {
                let quoted: Vec<_> = values.iter().map(|v| format!("'{v}'")).collect();
                list(f, &quoted)
            }
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn identifier_targets_accept_eq_and_in() {
        assert!(
            Predicate::new(
                CriterionTarget::SectionId,
                Operator::Eq,
                CriterionValue::Integer(1)
            )
            .is_ok()
        );
        assert!(
            Predicate::new(
                CriterionTarget::SectionId,
                Operator::In,
                CriterionValue::Integers(vec![1, 2])
            )
            .is_ok()
        );
        assert!(
            Predicate::new(
                CriterionTarget::SectionId,
                Operator::Gt,
                CriterionValue::Integer(1)
            )
            .is_err()
        );
        assert!(
            Predicate::new(
                CriterionTarget::SectionId,
                Operator::In,
                CriterionValue::Texts(vec!["standard".into()])
            )
            .is_err()
        );
    }

    #[multiplatform_test]
    fn empty_lists_are_rejected() {
        let result = Predicate::new(
            CriterionTarget::ContentTypeId,
            Operator::In,
            CriterionValue::Integers(vec![]),
        );

        assert_eq!(
            result,
            Err(InvalidCriterionError::UnsupportedSpecification {
                target: CriterionTarget::ContentTypeId,
                operator: Operator::In,
                value: CriterionValue::Integers(vec![]),
            })
        );
    }

    #[multiplatform_test]
    fn between_takes_exactly_two_bounds() {
        let between = |values: Vec<i64>| {
            Predicate::new(
                CriterionTarget::Created,
                Operator::Between,
                CriterionValue::Integers(values),
            )
        };

        assert!(between(vec![10, 20]).is_ok());
        assert!(between(vec![10]).is_err());
        assert!(between(vec![10, 20, 30]).is_err());
    }

    #[multiplatform_test]
    fn display() {
        let predicate = Predicate::new(
            CriterionTarget::LanguageCode,
            Operator::In,
            CriterionValue::Texts(vec!["eng-GB".into(), "fre-FR".into()]),
        )
        .unwrap();

        assert_eq!(predicate.to_string(), "language_code IN ['eng-GB', 'fre-FR']");
    }

    #[multiplatform_test]
    fn deserialization_validates() {
        let valid: Predicate = serde_json::from_str(
            r#"{"target": "owner", "operator": "eq", "value": 14}"#,
        )
        .unwrap();
        assert_eq!(valid.value(), &CriterionValue::Integer(14));

        let invalid = serde_json::from_str::<Predicate>(
            r#"{"target": "owner", "operator": "between", "value": [1, 2]}"#,
        );
        assert!(invalid.is_err());
    }
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! In-memory evaluation of criteria against already loaded content.

use serde::{Deserialize, Serialize};

use super::{Criterion, CriterionTarget, CriterionValue, Operator, Predicate};

/// The content properties that criteria can refer to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentInfo {
    pub id: i64,
    pub content_type_id: i64,
    pub section_id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub object_state_ids: Vec<i64>,
    #[serde(default)]
    pub locations: Vec<LocationInfo>,
    pub created: i64,
    pub modified: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub id: i64,
    pub parent_id: i64,
    pub path_string: String,
}

impl Criterion {
    pub fn matches(&self, content: &ContentInfo) -> bool {
        match self {
            Criterion::Predicate(predicate) => predicate.matches(content),
            Criterion::LogicalAnd(operands) => operands.iter().all(|c| c.matches(content)),
            Criterion::LogicalOr(operands) => operands.iter().any(|c| c.matches(content)),
            Criterion::MatchAll => true,
            Criterion::MatchNone => false,
        }
    }
}

impl Predicate {
    /// Content with several values for the target (multiple locations, languages or states)
    /// matches if any of them does.
    pub fn matches(&self, content: &ContentInfo) -> bool {
        match self.target() {
            CriterionTarget::ContentId => self.matches_integers(&[content.id]),
            CriterionTarget::ContentTypeId => self.matches_integers(&[content.content_type_id]),
            CriterionTarget::SectionId => self.matches_integers(&[content.section_id]),
            CriterionTarget::Owner => self.matches_integers(&[content.owner_id]),
            CriterionTarget::Created => self.matches_integers(&[content.created]),
            CriterionTarget::Modified => self.matches_integers(&[content.modified]),
            CriterionTarget::ObjectStateId => self.matches_integers(&content.object_state_ids),
            CriterionTarget::LocationId => {
                let ids: Vec<_> = content.locations.iter().map(|l| l.id).collect();
                self.matches_integers(&ids)
            }
            CriterionTarget::ParentLocationId => {
                let ids: Vec<_> = content.locations.iter().map(|l| l.parent_id).collect();
                self.matches_integers(&ids)
            }
            CriterionTarget::LanguageCode => self.matches_texts(
                content.language_codes.iter().map(String::as_str),
                |code, value| code == value,
            ),
            CriterionTarget::Subtree => self.matches_texts(
                content.locations.iter().map(|l| l.path_string.as_str()),
                |path, subtree| path.starts_with(subtree),
            ),
        }
    }

    fn matches_integers(&self, fields: &[i64]) -> bool {
        fields
            .iter()
            .any(|field| match (self.operator(), self.value()) {
                (Operator::Eq, CriterionValue::Integer(value)) => field == value,
                (Operator::Gt, CriterionValue::Integer(value)) => field > value,
                (Operator::Gte, CriterionValue::Integer(value)) => field >= value,
                (Operator::Lt, CriterionValue::Integer(value)) => field < value,
                (Operator::Lte, CriterionValue::Integer(value)) => field <= value,
                (Operator::In, CriterionValue::Integers(values)) => values.contains(field),
                (Operator::Between, CriterionValue::Integers(values)) => match values.as_slice() {
                    [low, high] => low <= field && field <= high,
                    _ => false,
                },
                _ => false,
            })
    }

    fn matches_texts<'a>(
        &self,
        fields: impl IntoIterator<Item = &'a str>,
        field_matches: fn(&str, &str) -> bool,
    ) -> bool {
        fields
            .into_iter()
            .any(|field| match (self.operator(), self.value()) {
                (Operator::Eq, CriterionValue::Text(value)) => field_matches(field, value),
                (Operator::In, CriterionValue::Texts(values)) => {
                    values.iter().any(|value| field_matches(field, value))
                }
                _ => false,
            })
    }
}

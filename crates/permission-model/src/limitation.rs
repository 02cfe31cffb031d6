// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Identifiers of the limitation types known to the platform.
pub mod identifier {
    pub const OWNER: &str = "Owner";
    pub const SECTION: &str = "Section";
    pub const CONTENT_TYPE: &str = "Class";
    pub const OBJECT_STATE: &str = "State";
    pub const LOCATION: &str = "Node";
    pub const SUBTREE: &str = "Subtree";
    pub const LANGUAGE: &str = "Language";
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum LimitationValue {
    Integer(i64),
    Text(String),
}

/// A named constraint that narrows a policy or a whole role assignment, such as "only content
/// in sections 1 and 3" (`Section`, `[1, 3]`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Limitation {
    identifier: String,
    #[serde(default)]
    values: Vec<LimitationValue>,
}

impl Limitation {
    pub fn new(identifier: impl Into<String>, values: Vec<LimitationValue>) -> Self {
        Self {
            identifier: identifier.into(),
            values,
        }
    }

    pub fn with_ids(identifier: impl Into<String>, ids: impl IntoIterator<Item = i64>) -> Self {
        Self::new(identifier, ids.into_iter().map(LimitationValue::Integer).collect())
    }

    pub fn with_codes<S: Into<String>>(
        identifier: impl Into<String>,
        codes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            identifier,
            codes
                .into_iter()
                .map(|code| LimitationValue::Text(code.into()))
                .collect(),
        )
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn values(&self) -> &[LimitationValue] {
        &self.values
    }
}

impl Display for LimitationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitationValue::Integer(value) => write!(f, "{value}"),
            LimitationValue::Text(value) => write!(f, "'{value}'"),
        }
    }
}

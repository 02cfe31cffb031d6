// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// An object being acted upon, for permission checks that depend on it (for example, creating
/// content in a given language under a given parent).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    Version {
        language_codes: Vec<String>,
    },
    Location {
        location_id: i64,
        path_string: String,
    },
    ContentCreate {
        content_type_id: i64,
        section_id: i64,
        language_code: String,
    },
}

impl Target {
    /// Languages the action touches, if the target carries any.
    pub fn language_codes(&self) -> Vec<&str> {
        match self {
            Target::Version { language_codes } => {
                language_codes.iter().map(String::as_str).collect()
            }
            Target::ContentCreate { language_code, .. } => vec![language_code.as_str()],
            Target::Location { .. } => vec![],
        }
    }
}

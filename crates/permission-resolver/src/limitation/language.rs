// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use permission_model::criterion::{CriterionTarget, CriterionValue, Operator};
use permission_model::{Criterion, Limitation, Target, UserReference};

use super::{TargetAwareLimitationTranslator, TranslationError, text_values};

/// Limits access to content in the given languages.
///
/// When the action targets specific languages (a version being edited, or content being
/// created), only those of the limitation's languages the action touches remain. If the action
/// touches none of them, nothing matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageLimitationType;

impl TargetAwareLimitationTranslator for LanguageLimitationType {
    fn criterion_by_target(
        &self,
        limitation: &Limitation,
        _user: &UserReference,
        targets: Option<&[Target]>,
    ) -> Result<Criterion, TranslationError> {
        let mut language_codes = text_values(limitation)?;

        let target_codes: Vec<&str> = targets
            .unwrap_or_default()
            .iter()
            .flat_map(Target::language_codes)
            .collect();

        if !target_codes.is_empty() {
            language_codes.retain(|code| target_codes.contains(&code.as_str()));

            if language_codes.is_empty() {
                return Ok(Criterion::MatchNone);
            }
        }

        Criterion::predicate(
            CriterionTarget::LanguageCode,
            Operator::In,
            CriterionValue::Texts(language_codes),
        )
        .map_err(TranslationError::invalid_criterion(limitation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permission_model::limitation::identifier;

    fn translate(targets: Option<&[Target]>) -> Criterion {
        LanguageLimitationType
            .criterion_by_target(
                &Limitation::with_codes(identifier::LANGUAGE, ["eng-GB", "ger-DE"]),
                &UserReference::new(14),
                targets,
            )
            .unwrap()
    }

    #[test]
    fn without_targets_all_languages_apply() {
        assert_eq!(
            translate(None).to_string(),
            "language_code IN ['eng-GB', 'ger-DE']"
        );
        assert_eq!(
            translate(Some(&[])).to_string(),
            "language_code IN ['eng-GB', 'ger-DE']"
        );
    }

    #[test]
    fn targets_narrow_the_languages() {
        let targets = [
            Target::Version {
                language_codes: vec!["ger-DE".into(), "fre-FR".into()],
            },
            Target::Location {
                location_id: 2,
                path_string: "/1/2/".into(),
            },
        ];

        assert_eq!(
            translate(Some(&targets)).to_string(),
            "language_code IN ['ger-DE']"
        );
    }

    #[test]
    fn disjoint_targets_match_nothing() {
        let targets = [Target::ContentCreate {
            content_type_id: 2,
            section_id: 1,
            language_code: "fre-FR".into(),
        }];

        assert_eq!(translate(Some(&targets)), Criterion::MatchNone);
    }
}
